use aero_core::Offer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use crate::duration::parse_duration;

/// Result ordering selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    /// Accepted but applies no ordering
    Departure,
    /// Any key the engine does not know; applies no ordering
    Unrecognized,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Departure => "departure",
            SortKey::Unrecognized => "unrecognized",
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value {
            "price" => SortKey::Price,
            "duration" => SortKey::Duration,
            "departure" => SortKey::Departure,
            _ => SortKey::Unrecognized,
        }
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortKey::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TripTypeFilter {
    #[default]
    All,
    OneWay,
    RoundTrip,
}

impl TripTypeFilter {
    pub fn matches(&self, offer: &Offer) -> bool {
        match self {
            TripTypeFilter::All => true,
            TripTypeFilter::OneWay => offer.one_way,
            TripTypeFilter::RoundTrip => offer.is_round_trip(),
        }
    }
}

/// How `SortKey::Duration` compares the outbound duration tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DurationOrdering {
    /// Raw string comparison of the token ("PT10H5M" sorts before "PT9H30M")
    #[default]
    Lexicographic,
    /// Parsed elapsed time; unparseable tokens sort last
    Elapsed,
}

/// Filter and sort options for one ranking pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterConfig {
    #[serde(alias = "sort_by")]
    pub sort_by: SortKey,
    #[serde(alias = "trip_type")]
    pub trip_type: TripTypeFilter,
    #[serde(alias = "refundable_only")]
    pub refundable_only: bool,
    #[serde(alias = "checked_bags_only")]
    pub checked_bags_only: bool,
    #[serde(alias = "duration_ordering")]
    pub duration_ordering: DurationOrdering,
}

impl FilterConfig {
    fn keeps(&self, offer: &Offer) -> bool {
        self.trip_type.matches(offer)
            && (!self.refundable_only || offer.is_refundable())
            && (!self.checked_bags_only || offer.includes_checked_bags())
    }
}

/// Filter then stably sort `offers` for display.
///
/// The result borrows from the input, so it is always a subsequence of it in
/// some order and the input is left untouched. Trip type, refundable and
/// checked-bag filters run first, each skipped when not requested; the sort
/// keeps the relative order of offers with equal keys.
pub fn rank<'a>(offers: &'a [Offer], config: &FilterConfig) -> Vec<&'a Offer> {
    let mut ranked: Vec<&Offer> = offers.iter().filter(|o| config.keeps(o)).collect();

    match config.sort_by {
        SortKey::Price => {
            ranked.sort_by(|a, b| compare_amounts(a.total_amount(), b.total_amount()));
        }
        SortKey::Duration => match config.duration_ordering {
            DurationOrdering::Lexicographic => {
                ranked.sort_by(|a, b| outbound_duration(a).cmp(outbound_duration(b)));
            }
            DurationOrdering::Elapsed => {
                ranked.sort_by(|a, b| compare_elapsed(elapsed_minutes(a), elapsed_minutes(b)));
            }
        },
        SortKey::Departure | SortKey::Unrecognized => {}
    }

    ranked
}

/// Ascending, NaN after every number, NaNs equal to each other.
pub fn compare_amounts(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn outbound_duration(offer: &Offer) -> &str {
    offer.first_itinerary().map(|i| i.duration.as_str()).unwrap_or("")
}

fn elapsed_minutes(offer: &Offer) -> Option<u64> {
    parse_duration(outbound_duration(offer)).map(|d| d.total_minutes())
}

fn compare_elapsed(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
