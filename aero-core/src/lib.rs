pub mod offer;
pub mod search;
pub mod source;
pub mod iata;
pub mod pii;

pub use offer::{Offer, Itinerary, Segment, Price, PricingOptions, OfferError, REFUNDABLE_FARE};
pub use search::{SearchParams, FlightSearchResponse};
pub use source::{OfferSource, SourceError, StaticOfferSource};
pub use pii::Masked;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
