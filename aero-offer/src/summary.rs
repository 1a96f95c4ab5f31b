use aero_core::offer::{Itinerary, Offer, Segment};
use serde::Serialize;
use crate::carriers::carrier_name;
use crate::duration::format_duration;
use crate::format::{format_amount, format_date, format_money, format_time};
use crate::stops::stop_text;

// ============================================================================
// List card
// ============================================================================

/// Display-ready fields for one row of the result list
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferSummary {
    pub id: String,
    pub carrier: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub departure_date: String,
    pub arrival_time: String,
    pub arrival_date: String,
    pub duration: String,
    pub stops: String,
    pub price: String,
    /// Total rounded to whole units, e.g. "USD 451"
    pub price_per_person: String,
    pub checked_bag_included: bool,
    pub round_trip: bool,
}

impl OfferSummary {
    pub fn from_offer(offer: &Offer) -> Self {
        let leg = offer.first_itinerary();
        let ends = leg.map(LegEnds::of).unwrap_or_default();

        Self {
            id: offer.id.clone(),
            carrier: offer.validating_carrier().map(carrier_name).unwrap_or_default(),
            origin: ends.origin,
            destination: ends.destination,
            departure_time: format_time(&ends.departure_at),
            departure_date: format_date(&ends.departure_at),
            arrival_time: format_time(&ends.arrival_at),
            arrival_date: format_date(&ends.arrival_at),
            duration: leg.map(|l| format_duration(&l.duration)).unwrap_or_default(),
            stops: stop_text(leg.map(Itinerary::total_stops).unwrap_or(0)),
            price: format_money(&offer.price.currency, &offer.price.total),
            price_per_person: format_amount(&offer.price.currency, offer.total_amount(), 0)
                .unwrap_or_else(|| format_money(&offer.price.currency, &offer.price.total)),
            checked_bag_included: offer.includes_checked_bags(),
            round_trip: offer.is_round_trip(),
        }
    }
}

#[derive(Default)]
struct LegEnds {
    origin: String,
    destination: String,
    departure_at: String,
    arrival_at: String,
}

impl LegEnds {
    fn of(leg: &Itinerary) -> Self {
        let mut ends = LegEnds::default();
        if let Some(first) = leg.first_segment() {
            ends.origin = first.departure.iata_code.clone();
            ends.departure_at = first.departure.at.clone();
        }
        if let Some(last) = leg.last_segment() {
            ends.destination = last.arrival.iata_code.clone();
            ends.arrival_at = last.arrival.at.clone();
        }
        ends
    }
}

// ============================================================================
// Details view
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetails {
    pub id: String,
    pub overview: OfferSummary,
    pub bookable_seats: u32,
    pub last_ticketing_date: Option<String>,
    /// "Required" or "Not Required"
    pub instant_ticketing: String,
    pub validating_airline: Option<String>,
    pub legs: Vec<LegDetails>,
    pub fare: FareBreakdown,
    pub traveler_type: Option<String>,
    pub fare_option: Option<String>,
    pub fare_details: Vec<SegmentFare>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegDetails {
    /// "Outbound" or "Return"
    pub label: String,
    pub duration: String,
    pub stops: String,
    pub segments: Vec<SegmentDetails>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDetails {
    pub flight: String,
    pub carrier: String,
    pub origin: String,
    pub departure_time: String,
    pub departure_date: String,
    pub destination: String,
    pub arrival_time: String,
    pub arrival_date: String,
    pub duration: String,
    pub aircraft: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base: String,
    pub fees: Vec<FareLine>,
    /// Total minus base, two decimals; absent when either does not parse
    pub taxes_and_fees: Option<String>,
    pub total: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FareLine {
    pub label: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentFare {
    pub segment_id: String,
    pub cabin: String,
    pub booking_class: String,
    pub fare_basis: String,
    pub branded_fare: Option<String>,
    pub checked_bags: Option<u32>,
}

impl OfferDetails {
    pub fn from_offer(offer: &Offer) -> Self {
        let currency = &offer.price.currency;

        let legs = offer
            .itineraries
            .iter()
            .enumerate()
            .map(|(idx, leg)| LegDetails {
                label: if idx == 0 { "Outbound" } else { "Return" }.to_string(),
                duration: format_duration(&leg.duration),
                stops: stop_text(leg.total_stops()),
                segments: leg.segments.iter().map(SegmentDetails::from_segment).collect(),
            })
            .collect();

        let fare = FareBreakdown {
            base: format_money(currency, &offer.price.base),
            fees: offer
                .price
                .fees
                .iter()
                .map(|fee| FareLine {
                    label: format!("{} Fees", fee.fee_type),
                    amount: format_money(currency, &fee.amount),
                })
                .collect(),
            taxes_and_fees: format_amount(currency, offer.price.total_amount() - offer.price.base_amount(), 2),
            total: format_money(currency, &offer.price.total),
        };

        // Only the first traveler's fare is shown
        let traveler = offer.traveler_pricings.first();
        let fare_details = traveler
            .map(|tp| {
                tp.fare_details_by_segment
                    .iter()
                    .map(|fd| SegmentFare {
                        segment_id: fd.segment_id.clone(),
                        cabin: fd.cabin.clone(),
                        booking_class: fd.booking_class.clone(),
                        fare_basis: fd.fare_basis.clone(),
                        branded_fare: fd.branded_fare.clone(),
                        checked_bags: fd.included_checked_bags.as_ref().map(|b| b.quantity),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: offer.id.clone(),
            overview: OfferSummary::from_offer(offer),
            bookable_seats: offer.number_of_bookable_seats,
            last_ticketing_date: offer.last_ticketing_date.clone(),
            instant_ticketing: if offer.instant_ticketing_required { "Required" } else { "Not Required" }
                .to_string(),
            validating_airline: offer.validating_carrier().map(carrier_name),
            legs,
            fare,
            traveler_type: traveler.map(|tp| tp.traveler_type.clone()),
            fare_option: traveler.map(|tp| tp.fare_option.clone()),
            fare_details,
        }
    }
}

impl SegmentDetails {
    fn from_segment(segment: &Segment) -> Self {
        Self {
            flight: format!("{} {}", segment.carrier_code, segment.number),
            carrier: carrier_name(&segment.carrier_code),
            origin: segment.departure.iata_code.clone(),
            departure_time: format_time(&segment.departure.at),
            departure_date: format_date(&segment.departure.at),
            destination: segment.arrival.iata_code.clone(),
            arrival_time: format_time(&segment.arrival.at),
            arrival_date: format_date(&segment.arrival.at),
            duration: format_duration(&segment.duration),
            aircraft: segment.aircraft.as_ref().map(|a| a.code.clone()),
        }
    }
}
