use aero_core::SearchParams;
use aero_offer::session::SEARCH_FAILED_MESSAGE;
use aero_offer::{run_search, FilterConfig, OfferDetails, OfferSummary, SearchOutcome, SearchSession};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
    pub filters: FilterConfig,
}

/// Search form as submitted. Missing counts fall back to the configured defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub origin_location_code: String,
    #[serde(default)]
    pub destination_location_code: String,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub adults: Option<u32>,
    pub max: Option<u32>,
}

/// What the result list shows for a session
#[derive(Debug, Serialize)]
pub struct OffersView {
    pub count: usize,
    pub offers: Vec<OfferSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub loading: bool,
    /// Parameters of the latest search issued for the session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchParams>,
}

impl OffersView {
    fn of(session: &SearchSession) -> Self {
        let offers: Vec<OfferSummary> = session.ranked().into_iter().map(OfferSummary::from_offer).collect();
        Self {
            count: offers.len(),
            offers,
            error: session.last_error().map(str::to_string),
            loading: session.is_loading(),
            search: session.last_params().cloned(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", delete(close_session))
        .route("/v1/sessions/{id}/search", post(search))
        .route("/v1/sessions/{id}/filters", put(update_filters))
        .route("/v1/sessions/{id}/offers", get(list_offers))
        .route("/v1/sessions/{id}/offers/{offer_id}", get(offer_details))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/sessions
/// Open a search session; the body, when present, holds its initial filters
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let filters = if body.iter().all(u8::is_ascii_whitespace) {
        state.default_filters.clone()
    } else {
        serde_json::from_slice::<FilterConfig>(&body)
            .map_err(|e| AppError::ValidationError(format!("Invalid filters: {}", e)))?
    };

    let id = state.sessions.write().await.create(filters.clone());
    tracing::info!("Opened search session {}", id);

    Ok((StatusCode::CREATED, Json(SessionCreated { id, filters })))
}

/// DELETE /v1/sessions/{id}
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.write().await.remove(&id).map_err(AppError::from_session)?;
    tracing::info!("Closed search session {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/sessions/{id}/search
/// Query the offer source and replace the session's results
pub async fn search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<OffersView>, AppError> {
    let params = SearchParams {
        origin_location_code: req.origin_location_code,
        destination_location_code: req.destination_location_code,
        departure_date: req.departure_date,
        return_date: req.return_date,
        adults: req.adults.unwrap_or(state.search_defaults.default_adults),
        max: Some(req.max.unwrap_or(state.search_defaults.default_max)),
    }
    .validated()
    .map_err(AppError::from_core)?;

    let session = state.session(&id).await?;

    match run_search(&session, state.source.as_ref(), params).await {
        SearchOutcome::Applied { .. } => {
            let guard = session.lock().await;
            Ok(Json(OffersView::of(&guard)))
        }
        SearchOutcome::Failed(_) => Err(AppError::UpstreamError(SEARCH_FAILED_MESSAGE.to_string())),
        SearchOutcome::Stale => Err(AppError::ConflictError(
            "Search was superseded by a newer search".to_string(),
        )),
    }
}

/// PUT /v1/sessions/{id}/filters
/// Re-rank the current results; no new search is issued
pub async fn update_filters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(filters): Json<FilterConfig>,
) -> Result<Json<OffersView>, AppError> {
    let session = state.session(&id).await?;
    let mut guard = session.lock().await;
    guard.set_filters(filters);
    Ok(Json(OffersView::of(&guard)))
}

/// GET /v1/sessions/{id}/offers
pub async fn list_offers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OffersView>, AppError> {
    let session = state.session(&id).await?;
    let guard = session.lock().await;
    Ok(Json(OffersView::of(&guard)))
}

/// GET /v1/sessions/{id}/offers/{offer_id}
pub async fn offer_details(
    State(state): State<AppState>,
    Path((id, offer_id)): Path<(Uuid, String)>,
) -> Result<Json<OfferDetails>, AppError> {
    let session = state.session(&id).await?;
    let guard = session.lock().await;
    guard
        .find_offer(&offer_id)
        .map(|offer| Json(OfferDetails::from_offer(offer)))
        .ok_or_else(|| AppError::NotFoundError(format!("Offer not found: {}", offer_id)))
}
