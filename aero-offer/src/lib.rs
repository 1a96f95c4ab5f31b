pub mod ranking;
pub mod duration;
pub mod stops;
pub mod format;
pub mod carriers;
pub mod summary;
pub mod session;

#[cfg(test)]
mod fixtures;

pub use ranking::{rank, DurationOrdering, FilterConfig, SortKey, TripTypeFilter};
pub use duration::{format_duration, parse_duration, FlightDuration};
pub use stops::{stop_text, total_stops};
pub use summary::{OfferDetails, OfferSummary};
pub use session::{run_search, SearchOutcome, SearchSession, SessionRegistry, SharedSession};
