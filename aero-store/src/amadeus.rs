use aero_core::search::FlightSearchResponse;
use aero_core::{Masked, Offer, OfferSource, SearchParams, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::error::Error as StdError;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::app_config::OfferSourceConfig;

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Lifetime assumed when the token response carries no `expires_in`
const DEFAULT_TOKEN_TTL_SECS: i64 = 1799;
const DEFAULT_REFRESH_MARGIN_SECS: i64 = 30;

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn format_reqwest_error(err: &reqwest::Error) -> String {
    // Chained causes carry the DNS/TLS/socket detail
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !cause_msg.is_empty() && !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        source = cause.source();
    }

    message
}

fn summarize_response_body(raw: &str) -> String {
    const MAX_CHARS: usize = 800;
    let compact = raw.replace(['\n', '\r'], " ");
    match compact.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => format!("{}…", &compact[..cut]),
        None => compact,
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: Masked<String>,
    refresh_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Utc::now() < self.refresh_at
    }
}

/// When a token issued at `now` should be replaced. Lifetimes that do not fit
/// a `Duration` or push past the calendar fall back to the default.
fn refresh_deadline(now: DateTime<Utc>, expires_in: Option<i64>, margin: Duration) -> DateTime<Utc> {
    let default_ttl = Duration::seconds(DEFAULT_TOKEN_TTL_SECS);
    let deadline = |ttl: Duration| ttl.checked_sub(&margin).and_then(|d| now.checked_add_signed(d));

    expires_in
        .and_then(Duration::try_seconds)
        .and_then(&deadline)
        .or_else(|| deadline(default_ttl))
        .unwrap_or(now)
}

/// `OfferSource` backed by the Amadeus Self-Service flight-offers search.
///
/// Exchanges client credentials for a bearer token, caches it until shortly
/// before expiry and fetches offers with it.
#[derive(Debug)]
pub struct AmadeusClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: Masked<String>,
    refresh_margin: Duration,
    token: Mutex<Option<AccessToken>>,
}

impl AmadeusClient {
    pub fn new(config: &OfferSourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SourceError::Network(format_reqwest_error(&e)))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_margin: Duration::try_seconds(config.token_refresh_margin_seconds.max(0))
                .unwrap_or_else(|| Duration::seconds(DEFAULT_REFRESH_MARGIN_SECS)),
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cached bearer token, refreshed when missing or about to expire
    async fn bearer(&self) -> Result<Masked<String>, SourceError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken, SourceError> {
        debug!("Requesting Amadeus access token");

        let response = self
            .client
            .post(self.url(TOKEN_PATH))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose().as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(format_reqwest_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format_reqwest_error(&e)))?;

        if !status.is_success() {
            return Err(SourceError::Auth(format!(
                "token request failed ({}): {}",
                status,
                summarize_response_body(&body)
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::Auth(format!("malformed token response: {}", e)))?;

        let refresh_at = refresh_deadline(Utc::now(), parsed.expires_in, self.refresh_margin);
        debug!("Amadeus token refresh due at {}", refresh_at);

        Ok(AccessToken {
            value: Masked(parsed.access_token),
            refresh_at,
        })
    }

    /// Run a flight-offers search and return the raw response
    pub async fn search(&self, params: &SearchParams) -> Result<FlightSearchResponse, SourceError> {
        let token = self.bearer().await?;

        let mut query: Vec<(&str, String)> = vec![
            ("originLocationCode", params.origin_location_code.clone()),
            ("destinationLocationCode", params.destination_location_code.clone()),
        ];
        if let Some(date) = &params.departure_date {
            query.push(("departureDate", date.clone()));
        }
        if let Some(date) = &params.return_date {
            query.push(("returnDate", date.clone()));
        }
        query.push(("adults", params.adults.to_string()));
        query.push(("max", params.max_or_default().to_string()));

        let response = self
            .client
            .get(self.url(OFFERS_PATH))
            .bearer_auth(token.expose())
            .query(&query)
            .send()
            .await
            .map_err(|e| SourceError::Network(format_reqwest_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(format_reqwest_error(&e)))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Force a fresh token on the next search
            self.token.lock().await.take();
            return Err(SourceError::Auth(format!(
                "offer search rejected: {}",
                summarize_response_body(&body)
            )));
        }
        if !status.is_success() {
            return Err(SourceError::Network(format!(
                "offer search failed ({}): {}",
                status,
                summarize_response_body(&body)
            )));
        }

        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl OfferSource for AmadeusClient {
    async fn fetch_offers(&self, params: &SearchParams) -> Result<Vec<Offer>, SourceError> {
        let response = self.search(params).await?;
        let received = response.data.len();

        let offers: Vec<Offer> = response
            .data
            .into_iter()
            .filter(|offer| match offer.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Dropping offer {}: {}", offer.id, e);
                    false
                }
            })
            .collect();

        info!(
            "Fetched {} offers for {} -> {} ({} dropped)",
            offers.len(),
            params.origin_location_code,
            params.destination_location_code,
            received - offers.len()
        );
        Ok(offers)
    }
}
