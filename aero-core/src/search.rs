use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::iata::normalize_location_code;
use crate::offer::Offer;
use crate::{CoreError, CoreResult};

pub const DEFAULT_ADULTS: u32 = 1;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Parameters for one flight-offers search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub origin_location_code: String,
    pub destination_location_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

fn default_adults() -> u32 { DEFAULT_ADULTS }

impl SearchParams {
    pub fn new(origin: &str, destination: &str) -> Self {
        Self {
            origin_location_code: origin.to_string(),
            destination_location_code: destination.to_string(),
            departure_date: None,
            return_date: None,
            adults: DEFAULT_ADULTS,
            max: Some(DEFAULT_MAX_RESULTS),
        }
    }

    /// Validate and normalize the search form input.
    pub fn validated(mut self) -> CoreResult<Self> {
        self.origin_location_code = normalize_location_code(&self.origin_location_code, "Origin")?;
        self.destination_location_code =
            normalize_location_code(&self.destination_location_code, "Destination")?;

        if self.origin_location_code == self.destination_location_code {
            return Err(CoreError::ValidationError(
                "Origin and destination cannot be the same".to_string(),
            ));
        }

        self.departure_date = normalize_date(self.departure_date, "departureDate")?;
        self.return_date = normalize_date(self.return_date, "returnDate")?;

        if let (Some(dep), Some(ret)) = (&self.departure_date, &self.return_date) {
            // ISO dates compare correctly as strings
            if ret < dep {
                return Err(CoreError::ValidationError(
                    "returnDate cannot be before departureDate".to_string(),
                ));
            }
        }

        if self.adults == 0 {
            return Err(CoreError::ValidationError("At least one adult is required".to_string()));
        }

        if self.max == Some(0) {
            return Err(CoreError::ValidationError("max must be greater than zero".to_string()));
        }

        Ok(self)
    }

    pub fn max_or_default(&self) -> u32 {
        self.max.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}

fn normalize_date(value: Option<String>, field: &str) -> CoreResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|d| Some(d.format("%Y-%m-%d").to_string()))
                .map_err(|_| {
                    CoreError::ValidationError(format!("{} must be YYYY-MM-DD, got {:?}", field, trimmed))
                })
        }
    }
}

/// Response envelope of the flight-offers endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchResponse {
    #[serde(default)]
    pub meta: SearchMeta,
    #[serde(default)]
    pub data: Vec<Offer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SearchLinks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}
