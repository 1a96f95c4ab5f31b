use aero_core::offer::{
    Aircraft, CheckedBags, FareDetails, Fee, FlightEndpoint, Itinerary, Offer, Price,
    PricingOptions, Segment, TravelerPricing,
};

/// Builds offers for the unit tests, starting from a one-way IST -> LHR flight.
pub struct OfferBuilder {
    offer: Offer,
}

impl OfferBuilder {
    pub fn new(id: &str) -> Self {
        let price = Price {
            currency: "USD".to_string(),
            total: "450.75".to_string(),
            base: "380.00".to_string(),
            fees: vec![Fee { amount: "70.75".to_string(), fee_type: "SUPPLIER".to_string() }],
            grand_total: "450.75".to_string(),
        };

        Self {
            offer: Offer {
                offer_type: "flight-offer".to_string(),
                id: id.to_string(),
                source: "GDS".to_string(),
                instant_ticketing_required: false,
                non_homogeneous: false,
                one_way: true,
                last_ticketing_date: Some("2024-02-15".to_string()),
                number_of_bookable_seats: 4,
                itineraries: vec![leg("IST", "2024-02-20T07:30:00", "LHR", "2024-02-20T09:15:00", "PT3H45M")],
                price: price.clone(),
                pricing_options: PricingOptions {
                    fare_type: vec!["PUBLISHED".to_string()],
                    included_checked_bags_only: false,
                },
                validating_airline_codes: vec!["BA".to_string()],
                traveler_pricings: vec![TravelerPricing {
                    traveler_id: "1".to_string(),
                    fare_option: "STANDARD".to_string(),
                    traveler_type: "ADULT".to_string(),
                    price,
                    fare_details_by_segment: vec![FareDetails {
                        segment_id: "1".to_string(),
                        cabin: "ECONOMY".to_string(),
                        fare_basis: "KPROMO".to_string(),
                        branded_fare: None,
                        booking_class: "K".to_string(),
                        included_checked_bags: Some(CheckedBags { quantity: 1 }),
                    }],
                }],
            },
        }
    }

    pub fn price(mut self, total: &str) -> Self {
        self.offer.price.total = total.to_string();
        self.offer.price.grand_total = total.to_string();
        self
    }

    pub fn duration(mut self, token: &str) -> Self {
        self.offer.itineraries[0].duration = token.to_string();
        self
    }

    pub fn one_way(mut self, one_way: bool) -> Self {
        self.offer.one_way = one_way;
        self
    }

    pub fn fare_types(mut self, tags: &[&str]) -> Self {
        self.offer.pricing_options.fare_type = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn checked_bags(mut self, included: bool) -> Self {
        self.offer.pricing_options.included_checked_bags_only = included;
        self
    }

    pub fn stops(mut self, stops: u32) -> Self {
        self.offer.itineraries[0].segments[0].number_of_stops = stops;
        self
    }

    pub fn connection(mut self, via: &str) -> Self {
        let first = &mut self.offer.itineraries[0].segments[0];
        let final_arrival = first.arrival.clone();
        first.arrival = FlightEndpoint { iata_code: via.to_string(), at: "2024-02-20T12:00:00".to_string() };
        let mut second = first.clone();
        second.departure = FlightEndpoint { iata_code: via.to_string(), at: "2024-02-20T13:30:00".to_string() };
        second.arrival = final_arrival;
        second.number = "900".to_string();
        self.offer.itineraries[0].segments.push(second);
        self
    }

    pub fn return_leg(mut self) -> Self {
        self.offer.one_way = false;
        self.offer
            .itineraries
            .push(leg("LHR", "2024-02-27T18:00:00", "IST", "2024-02-27T23:55:00", "PT3H55M"));
        self
    }

    pub fn build(self) -> Offer {
        self.offer
    }
}

fn leg(from: &str, dep: &str, to: &str, arr: &str, duration: &str) -> Itinerary {
    Itinerary {
        duration: duration.to_string(),
        segments: vec![Segment {
            departure: FlightEndpoint { iata_code: from.to_string(), at: dep.to_string() },
            arrival: FlightEndpoint { iata_code: to.to_string(), at: arr.to_string() },
            carrier_code: "BA".to_string(),
            number: "678".to_string(),
            duration: duration.to_string(),
            number_of_stops: 0,
            aircraft: Some(Aircraft { code: "320".to_string() }),
        }],
    }
}

pub fn ids<'a, I>(offers: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Offer>,
{
    offers.into_iter().map(|o| o.id.as_str()).collect()
}
