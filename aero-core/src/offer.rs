use serde::{Deserialize, Serialize};

/// Fare tag that marks an offer as refundable.
pub const REFUNDABLE_FARE: &str = "REFUNDABLE";

// ============================================================================
// Flight Offer (Amadeus Flight Offers Search v2 shape)
// ============================================================================

/// One priced itinerary option returned by the offer source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "type", default)]
    pub offer_type: String,
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub instant_ticketing_required: bool,
    #[serde(default)]
    pub non_homogeneous: bool,
    pub one_way: bool,
    #[serde(default)]
    pub last_ticketing_date: Option<String>,
    #[serde(default)]
    pub number_of_bookable_seats: u32,
    pub itineraries: Vec<Itinerary>,
    pub price: Price,
    pub pricing_options: PricingOptions,
    #[serde(default)]
    pub validating_airline_codes: Vec<String>,
    #[serde(default)]
    pub traveler_pricings: Vec<TravelerPricing>,
}

impl Offer {
    pub fn is_round_trip(&self) -> bool {
        !self.one_way
    }

    /// Outbound leg
    pub fn first_itinerary(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }

    pub fn is_refundable(&self) -> bool {
        self.pricing_options
            .fare_type
            .iter()
            .any(|tag| tag == REFUNDABLE_FARE)
    }

    pub fn includes_checked_bags(&self) -> bool {
        self.pricing_options.included_checked_bags_only
    }

    /// Numeric magnitude of the total price. Unparseable totals yield NaN.
    pub fn total_amount(&self) -> f64 {
        self.price.total_amount()
    }

    /// Primary carrier shown for the offer.
    pub fn validating_carrier(&self) -> Option<&str> {
        self.validating_airline_codes.first().map(String::as_str)
    }

    /// Check the structural invariants the ranking and display code rely on.
    pub fn validate(&self) -> Result<(), OfferError> {
        if self.itineraries.is_empty() {
            return Err(OfferError::NoItineraries(self.id.clone()));
        }

        if let Some(index) = self.itineraries.iter().position(|i| i.segments.is_empty()) {
            return Err(OfferError::EmptyItinerary {
                offer_id: self.id.clone(),
                index,
            });
        }

        let total = self.total_amount();
        if !total.is_finite() || total < 0.0 {
            return Err(OfferError::InvalidPrice {
                offer_id: self.id.clone(),
                total: self.price.total.clone(),
            });
        }

        Ok(())
    }
}

/// One directional journey (outbound or return)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// ISO-8601 duration token, e.g. `PT13H35M`
    pub duration: String,
    pub segments: Vec<Segment>,
}

impl Itinerary {
    pub fn total_stops(&self) -> u32 {
        self.segments.iter().map(|s| s.number_of_stops).sum()
    }

    pub fn first_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

/// One physical flight between two airports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    pub carrier_code: String,
    pub number: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub number_of_stops: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<Aircraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: String,
    /// Local date-time, `YYYY-MM-DDTHH:MM:SS`
    pub at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aircraft {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    pub total: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub fees: Vec<Fee>,
    #[serde(default)]
    pub grand_total: String,
}

impl Price {
    pub fn total_amount(&self) -> f64 {
        self.total.trim().parse::<f64>().unwrap_or(f64::NAN)
    }

    pub fn base_amount(&self) -> f64 {
        self.base.trim().parse::<f64>().unwrap_or(f64::NAN)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fee {
    pub amount: String,
    #[serde(rename = "type")]
    pub fee_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingOptions {
    #[serde(default)]
    pub fare_type: Vec<String>,
    #[serde(default)]
    pub included_checked_bags_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPricing {
    pub traveler_id: String,
    #[serde(default)]
    pub fare_option: String,
    #[serde(default)]
    pub traveler_type: String,
    pub price: Price,
    #[serde(default)]
    pub fare_details_by_segment: Vec<FareDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareDetails {
    pub segment_id: String,
    #[serde(default)]
    pub cabin: String,
    #[serde(default)]
    pub fare_basis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branded_fare: Option<String>,
    #[serde(rename = "class", default)]
    pub booking_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_checked_bags: Option<CheckedBags>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckedBags {
    pub quantity: u32,
}

/// Offer invariant violations
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OfferError {
    #[error("Offer {0} has no itineraries")]
    NoItineraries(String),

    #[error("Offer {offer_id} has an itinerary without segments at index {index}")]
    EmptyItinerary { offer_id: String, index: usize },

    #[error("Offer {offer_id} has an invalid total price: {total:?}")]
    InvalidPrice { offer_id: String, total: String },
}
