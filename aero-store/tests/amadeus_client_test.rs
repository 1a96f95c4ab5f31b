use aero_core::{OfferSource, SearchParams, SourceError};
use aero_store::app_config::OfferSourceConfig;
use aero_store::AmadeusClient;
use httpmock::prelude::*;
use serde_json::{json, Value};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const OFFERS_PATH: &str = "/v2/shopping/flight-offers";

fn config_for(server: &MockServer) -> OfferSourceConfig {
    OfferSourceConfig {
        base_url: server.base_url(),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".into(),
        timeout_seconds: 5,
        token_refresh_margin_seconds: 30,
    }
}

fn offer_json(id: &str, total: &str) -> Value {
    json!({
        "type": "flight-offer",
        "id": id,
        "source": "GDS",
        "oneWay": true,
        "numberOfBookableSeats": 9,
        "itineraries": [{
            "duration": "PT3H45M",
            "segments": [{
                "departure": { "iataCode": "IST", "at": "2024-02-20T07:30:00" },
                "arrival": { "iataCode": "LHR", "at": "2024-02-20T09:15:00" },
                "carrierCode": "TK",
                "number": "1979",
                "duration": "PT3H45M",
                "numberOfStops": 0
            }]
        }],
        "price": { "currency": "EUR", "total": total, "base": "100.00", "grandTotal": total },
        "pricingOptions": { "fareType": ["PUBLISHED"], "includedCheckedBagsOnly": true },
        "validatingAirlineCodes": ["TK"]
    })
}

fn params() -> SearchParams {
    let mut params = SearchParams::new("IST", "LHR");
    params.departure_date = Some("2024-02-20".to_string());
    params.adults = 2;
    params
}

async fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
    let token = token.to_string();
    server
        .mock_async(move |when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .x_www_form_urlencoded_tuple("grant_type", "client_credentials")
                .x_www_form_urlencoded_tuple("client_id", "test-client")
                .x_www_form_urlencoded_tuple("client_secret", "test-secret");
            then.status(200).json_body(json!({
                "type": "amadeusOAuth2Token",
                "access_token": token,
                "token_type": "Bearer",
                "expires_in": 1799
            }));
        })
        .await
}

#[tokio::test]
async fn test_token_exchange_then_bearer_search() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "abc123").await;
    let offers = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(OFFERS_PATH)
                .header("Authorization", "Bearer abc123")
                .query_param("originLocationCode", "IST")
                .query_param("destinationLocationCode", "LHR")
                .query_param("departureDate", "2024-02-20")
                .query_param("adults", "2")
                .query_param("max", "10");
            then.status(200).json_body(json!({
                "meta": { "count": 2 },
                "data": [offer_json("1", "210.40"), offer_json("2", "188.00")]
            }));
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    let result = client.fetch_offers(&params()).await.unwrap();

    token.assert_async().await;
    offers.assert_async().await;
    let ids: Vec<&str> = result.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(result[0].includes_checked_bags());
}

#[tokio::test]
async fn test_token_is_reused_across_searches() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "reused").await;
    let offers = server
        .mock_async(|when, then| {
            when.method(GET).path(OFFERS_PATH).header("Authorization", "Bearer reused");
            then.status(200).json_body(json!({ "meta": { "count": 0 }, "data": [] }));
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    assert!(client.fetch_offers(&params()).await.unwrap().is_empty());
    assert!(client.fetch_offers(&params()).await.unwrap().is_empty());

    token.assert_hits_async(1).await;
    offers.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_rejected_credentials_map_to_auth() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(401).json_body(json!({ "error": "invalid_client" }));
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_offers(&params()).await.unwrap_err();
    assert!(matches!(err, SourceError::Auth(_)));
}

#[tokio::test]
async fn test_unauthorized_search_drops_cached_token() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server, "stale").await;
    let offers = server
        .mock_async(|when, then| {
            when.method(GET).path(OFFERS_PATH);
            then.status(401).json_body(json!({ "errors": [{ "code": 38190 }] }));
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    let first = client.fetch_offers(&params()).await.unwrap_err();
    let second = client.fetch_offers(&params()).await.unwrap_err();

    assert!(matches!(first, SourceError::Auth(_)));
    assert!(matches!(second, SourceError::Auth(_)));
    // one token request per search since each 401 discards the token
    token.assert_hits_async(2).await;
    offers.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_server_error_maps_to_network() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc").await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(OFFERS_PATH);
            then.status(500).body("upstream exploded");
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    match client.fetch_offers(&params()).await {
        Err(SourceError::Network(msg)) => assert!(msg.contains("upstream exploded")),
        other => panic!("expected network error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_maps_to_decode() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc").await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(OFFERS_PATH);
            then.status(200).body("{\"data\": [ not json");
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    let err = client.fetch_offers(&params()).await.unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[tokio::test]
async fn test_invalid_offers_are_dropped() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc").await;

    let mut no_legs = offer_json("no-legs", "99.00");
    no_legs["itineraries"] = json!([]);
    let bad_price = offer_json("bad-price", "n/a");

    server
        .mock_async(move |when, then| {
            when.method(GET).path(OFFERS_PATH);
            then.status(200).json_body(json!({
                "meta": { "count": 3 },
                "data": [no_legs, offer_json("good", "150.00"), bad_price]
            }));
        })
        .await;

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    let result = client.fetch_offers(&params()).await.unwrap();
    let ids: Vec<&str> = result.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["good"]);
}

#[tokio::test]
async fn test_return_date_is_forwarded() {
    let server = MockServer::start_async().await;
    mock_token(&server, "abc").await;
    let offers = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(OFFERS_PATH)
                .query_param("returnDate", "2024-02-27")
                .query_param("max", "3");
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;

    let mut round_trip = params();
    round_trip.return_date = Some("2024-02-27".to_string());
    round_trip.max = Some(3);

    let client = AmadeusClient::new(&config_for(&server)).unwrap();
    client.fetch_offers(&round_trip).await.unwrap();
    offers.assert_async().await;
}
