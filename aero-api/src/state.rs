use aero_core::OfferSource;
use aero_offer::{FilterConfig, SessionRegistry, SharedSession};
use aero_store::app_config::{SearchDefaults, SessionSettings};
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn OfferSource>,
    pub sessions: Arc<RwLock<SessionRegistry>>,
    /// Filters a session gets when it is opened without any
    pub default_filters: FilterConfig,
    pub search_defaults: SearchDefaults,
}

impl AppState {
    pub fn new(
        source: Arc<dyn OfferSource>,
        default_filters: FilterConfig,
        search_defaults: SearchDefaults,
    ) -> Self {
        Self {
            source,
            sessions: Arc::new(RwLock::new(SessionRegistry::new())),
            default_filters,
            search_defaults,
        }
    }

    /// Look up a session and mark it active. The registry lock is released
    /// before returning.
    pub async fn session(&self, id: &Uuid) -> Result<SharedSession, AppError> {
        let session = self
            .sessions
            .read()
            .await
            .get(id)
            .ok_or_else(|| AppError::NotFoundError(format!("Session not found: {}", id)))?;
        session.lock().await.touch();
        Ok(session)
    }

    pub async fn sweep_idle_sessions(&self, max_idle: Duration) -> usize {
        let removed = self.sessions.write().await.cleanup_idle(max_idle);
        if removed > 0 {
            tracing::info!("Evicted {} idle sessions", removed);
        }
        removed
    }

    /// Periodically evict sessions idle longer than the configured timeout
    pub fn spawn_idle_sweeper(&self, settings: &SessionSettings) -> JoinHandle<()> {
        let state = self.clone();
        let max_idle = i64::try_from(settings.idle_timeout_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::weeks(52));
        let every = std::time::Duration::from_secs(settings.sweep_interval_seconds.max(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                state.sweep_idle_sessions(max_idle).await;
            }
        })
    }
}
