use async_trait::async_trait;
use crate::offer::Offer;
use crate::search::SearchParams;

/// Failures reported by an offer source
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Malformed offer payload: {0}")]
    Decode(String),
}

/// Upstream provider of flight offers
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch offers for one search. Parameters are expected to be validated.
    async fn fetch_offers(&self, params: &SearchParams) -> Result<Vec<Offer>, SourceError>;
}

/// Fixed offer list, for local runs and tests
pub struct StaticOfferSource {
    offers: Vec<Offer>,
}

impl StaticOfferSource {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }
}

#[async_trait]
impl OfferSource for StaticOfferSource {
    async fn fetch_offers(&self, params: &SearchParams) -> Result<Vec<Offer>, SourceError> {
        let max = params.max_or_default() as usize;
        let offers: Vec<Offer> = self
            .offers
            .iter()
            .filter(|offer| serves_route(offer, params))
            .take(max)
            .cloned()
            .collect();

        tracing::debug!(
            "Static source matched {} offers for {}-{}",
            offers.len(),
            params.origin_location_code,
            params.destination_location_code
        );
        Ok(offers)
    }
}

/// First departure and final arrival of the outbound leg match the search route.
fn serves_route(offer: &Offer, params: &SearchParams) -> bool {
    let Some(leg) = offer.first_itinerary() else {
        return false;
    };
    match (leg.first_segment(), leg.last_segment()) {
        (Some(first), Some(last)) => {
            first.departure.iata_code == params.origin_location_code
                && last.arrival.iata_code == params.destination_location_code
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{FlightEndpoint, Itinerary, Price, PricingOptions, Segment};

    fn offer(id: &str, from: &str, to: &str) -> Offer {
        Offer {
            offer_type: "flight-offer".to_string(),
            id: id.to_string(),
            source: "GDS".to_string(),
            instant_ticketing_required: false,
            non_homogeneous: false,
            one_way: true,
            last_ticketing_date: None,
            number_of_bookable_seats: 1,
            itineraries: vec![Itinerary {
                duration: "PT3H".to_string(),
                segments: vec![Segment {
                    departure: FlightEndpoint { iata_code: from.to_string(), at: "2024-02-20T07:30:00".to_string() },
                    arrival: FlightEndpoint { iata_code: to.to_string(), at: "2024-02-20T10:30:00".to_string() },
                    carrier_code: "TK".to_string(),
                    number: "1".to_string(),
                    duration: "PT3H".to_string(),
                    number_of_stops: 0,
                    aircraft: None,
                }],
            }],
            price: Price {
                currency: "USD".to_string(),
                total: "100.00".to_string(),
                base: "80.00".to_string(),
                fees: vec![],
                grand_total: "100.00".to_string(),
            },
            pricing_options: PricingOptions::default(),
            validating_airline_codes: vec!["TK".to_string()],
            traveler_pricings: vec![],
        }
    }

    #[tokio::test]
    async fn test_static_source_filters_by_route() {
        let source = StaticOfferSource::new(vec![
            offer("1", "IST", "JFK"),
            offer("2", "IST", "LHR"),
            offer("3", "IST", "JFK"),
        ]);

        let params = SearchParams::new("IST", "JFK");
        let offers = source.fetch_offers(&params).await.unwrap();
        let ids: Vec<&str> = offers.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_static_source_honours_max() {
        let source = StaticOfferSource::new(vec![offer("1", "IST", "JFK"), offer("2", "IST", "JFK")]);
        let mut params = SearchParams::new("IST", "JFK");
        params.max = Some(1);
        assert_eq!(source.fetch_offers(&params).await.unwrap().len(), 1);
    }
}
