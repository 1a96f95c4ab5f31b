use aero_core::{Offer, OfferSource, SearchParams, SourceError};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::ranking::{rank, FilterConfig};

/// Message shown when the latest search failed. The previous results stay visible.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search flights. Please try again.";

/// Proof that a search was issued; carries its sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Result replaced the displayed offers
    Applied { count: usize },
    /// A newer search was issued before this one completed; result discarded
    Stale,
    /// The latest search failed; displayed offers unchanged
    Failed(SourceError),
}

/// State of one search screen: filters, the latest applied results and
/// in-flight bookkeeping.
#[derive(Debug)]
pub struct SearchSession {
    pub id: Uuid,
    filters: FilterConfig,
    offers: Vec<Offer>,
    last_params: Option<SearchParams>,
    last_error: Option<String>,
    issued_seq: u64,
    applied_seq: Option<u64>,
    loading: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SearchSession {
    pub fn new(filters: FilterConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            filters,
            offers: Vec::new(),
            last_params: None,
            last_error: None,
            issued_seq: 0,
            applied_seq: None,
            loading: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Register a new search. Any search still in flight becomes stale.
    pub fn begin_search(&mut self, params: SearchParams) -> SearchTicket {
        self.issued_seq += 1;
        self.loading = true;
        self.last_error = None;
        self.last_params = Some(params);
        self.updated_at = Utc::now();
        SearchTicket { seq: self.issued_seq }
    }

    /// Apply the result of the search identified by `ticket` if it is still the latest.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<Offer>, SourceError>,
    ) -> SearchOutcome {
        if ticket.seq != self.issued_seq {
            tracing::warn!(
                "Session {}: discarding stale search #{} (latest is #{})",
                self.id, ticket.seq, self.issued_seq
            );
            return SearchOutcome::Stale;
        }

        self.loading = false;
        self.updated_at = Utc::now();

        match result {
            Ok(offers) => {
                let count = offers.len();
                self.offers = offers;
                self.applied_seq = Some(ticket.seq);
                self.last_error = None;
                tracing::info!("Session {}: search #{} applied with {} offers", self.id, ticket.seq, count);
                SearchOutcome::Applied { count }
            }
            Err(err) => {
                tracing::error!("Session {}: search #{} failed: {}", self.id, ticket.seq, err);
                self.last_error = Some(SEARCH_FAILED_MESSAGE.to_string());
                SearchOutcome::Failed(err)
            }
        }
    }

    pub fn set_filters(&mut self, filters: FilterConfig) {
        self.filters = filters;
        self.updated_at = Utc::now();
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// Offers from the latest applied search, in source order
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Offers to display under the current filters
    pub fn ranked(&self) -> Vec<&Offer> {
        rank(&self.offers, &self.filters)
    }

    pub fn find_offer(&self, offer_id: &str) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id == offer_id)
    }

    pub fn has_searched(&self) -> bool {
        self.issued_seq > 0
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_params(&self) -> Option<&SearchParams> {
        self.last_params.as_ref()
    }

    /// Sequence number of the search whose results are displayed
    pub fn applied_seq(&self) -> Option<u64> {
        self.applied_seq
    }

    /// Record client activity that does not change the session
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.updated_at <= cutoff
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

/// Run one search against `source` for `session`.
///
/// The session lock is held only to issue the ticket and to apply the
/// result, never across the network call.
pub async fn run_search<S>(
    session: &Mutex<SearchSession>,
    source: &S,
    params: SearchParams,
) -> SearchOutcome
where
    S: OfferSource + ?Sized,
{
    let ticket = {
        let mut guard = session.lock().await;
        guard.begin_search(params.clone())
    };

    let result = source.fetch_offers(&params).await;

    let mut guard = session.lock().await;
    guard.complete_search(ticket, result)
}

pub type SharedSession = Arc<Mutex<SearchSession>>;

/// Live search sessions keyed by id (one per open search screen)
pub struct SessionRegistry {
    sessions: HashMap<Uuid, SharedSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Open a session and return its id
    pub fn create(&mut self, filters: FilterConfig) -> Uuid {
        let session = SearchSession::new(filters);
        let id = session.id;
        self.sessions.insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.get(id).cloned()
    }

    /// Tear down a session, dropping its results
    pub fn remove(&mut self, id: &Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Drop sessions with no activity for `max_idle`. Sessions locked by a
    /// request in progress are kept. Returns how many were removed.
    pub fn cleanup_idle(&mut self, max_idle: Duration) -> usize {
        let Some(cutoff) = Utc::now().checked_sub_signed(max_idle) else {
            return 0;
        };
        let initial_count = self.sessions.len();

        self.sessions.retain(|id, session| match session.try_lock() {
            Ok(guard) if guard.idle_since(cutoff) => {
                tracing::debug!(
                    "Evicting idle session {} (opened {}, last active {})",
                    id, guard.created_at, guard.updated_at
                );
                false
            }
            _ => true,
        });

        initial_count - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
}
