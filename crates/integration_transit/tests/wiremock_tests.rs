//! Integration tests for the Digitransit clients (wiremock-based)

use domain::value_objects::GeoLocation;
use domain::TravelMode;
use integration_transit::{
    DigitransitConfig, DigitransitGeocodingClient, DigitransitRoutingClient, GeocodingClient,
    GeocodingError, RoutingClient, TransitError,
};
use proptest::prelude::*;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODING_PATH: &str = "/geocoding/v1/search";
const ROUTING_PATH: &str = "/routing/v1/routers/hsl/index/graphql";

fn config_for_mock(base_url: &str) -> DigitransitConfig {
    DigitransitConfig::for_testing(base_url)
}

fn feature(name: &str, lon: f64, lat: f64) -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [lon, lat] },
        "properties": {
            "id": format!("node:{name}"),
            "name": name,
            "confidence": 0.9,
            "accuracy": "point",
            "label": format!("{name}, Helsinki")
        }
    })
}

fn search_response(count: usize) -> serde_json::Value {
    let features: Vec<_> = (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f64 / 1000.0;
            feature(&format!("Place {i}"), 24.93 + offset, 60.19 + offset)
        })
        .collect();
    serde_json::json!({ "type": "FeatureCollection", "features": features })
}

const fn sample_plan_json() -> &'static str {
    r#"{
        "data": {
            "plan": {
                "itineraries": [{
                    "startTime": 1772438400000,
                    "endTime": 1772440920000,
                    "walkTime": 540,
                    "walkDistance": 612.4,
                    "legs": [
                        {
                            "from": { "name": "Origin", "lat": 60.199152, "lon": 24.933884 },
                            "to": { "name": "Pasila", "lat": 60.1987, "lon": 24.9327 },
                            "startTime": 1772438400000,
                            "endTime": 1772438580000,
                            "mode": "WALK",
                            "duration": 180.0,
                            "distance": 210.5,
                            "route": null
                        },
                        {
                            "from": { "name": "Pasila", "lat": 60.1987, "lon": 24.9327 },
                            "to": { "name": "Kauppatori", "lat": 60.1676, "lon": 24.9526 },
                            "startTime": 1772438580000,
                            "endTime": 1772440920000,
                            "mode": "TRAM",
                            "duration": 2340.0,
                            "distance": 4300.0,
                            "route": { "shortName": "9", "longName": "Pasila-Jätkäsaari" }
                        }
                    ]
                }]
            }
        }
    }"#
}

fn pasila() -> GeoLocation {
    GeoLocation::new(60.199_152, 24.933_884).unwrap()
}

fn suomenlinna() -> GeoLocation {
    GeoLocation::new(60.145_8, 24.988_3).unwrap()
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn test_search_sends_text_size_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("text", "Ratapihantie 13"))
        .and(query_param("size", "1"))
        .and(query_param("digitransit-subscription-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
    let candidates = client.search("Ratapihantie 13", 1).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Place 0");
    // [lon, lat] as sent by the geocoder
    assert!((candidates[0].coordinates[0] - 24.93).abs() < 1e-9);
    assert!((candidates[0].coordinates[1] - 60.19).abs() < 1e-9);
}

#[tokio::test]
async fn test_search_truncates_to_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(10)))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let candidates = client.search("Kamppi", 3).await.unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[2].name, "Place 2");
}

#[tokio::test]
async fn test_search_fewer_results_than_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(2)))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let candidates = client.search("Kamppi", 5).await.unwrap();
    assert_eq!(candidates.len(), 2);
}

#[tokio::test]
async fn test_search_no_features_is_empty_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(0)))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let candidates = client.search("xyzzy-nowhere", 1).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_search_http_error_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.search("Kamppi", 1).await.unwrap_err();
    assert!(matches!(err, GeocodingError::Http { status: 401 }));
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_search_zero_size_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(1)))
        .expect(0)
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.search("Kamppi", 0).await.unwrap_err();
    assert!(matches!(err, GeocodingError::InvalidQuery(_)));
}

#[tokio::test]
async fn test_search_without_key_sends_empty_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .and(query_param("digitransit-subscription-key", ""))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let config = DigitransitConfig {
        api_key: None,
        ..config_for_mock(&server.uri())
    };
    let client = DigitransitGeocodingClient::new(&config).unwrap();

    let err = client.search("Kamppi", 1).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_search_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.search("Kamppi", 1).await.unwrap_err();
    assert!(matches!(err, GeocodingError::ParseError(_)));
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(4)))
        .expect(2)
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();

    let first = client.search("Suomenlinna", 2).await.unwrap();
    let second = client.search("Suomenlinna", 2).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_connection_refused() {
    // Nothing listens on the discard port
    let client = DigitransitGeocodingClient::new(&config_for_mock("http://127.0.0.1:9")).unwrap();

    let err = client.search("Kamppi", 1).await.unwrap_err();
    assert!(matches!(err, GeocodingError::ConnectionFailed(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn search_never_exceeds_size(upstream in 0usize..12, size in 1u8..8) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let count = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(GEOCODING_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(search_response(upstream)))
                .mount(&server)
                .await;

            let client = DigitransitGeocodingClient::new(&config_for_mock(&server.uri())).unwrap();
            client.search("Kamppi", size).await.unwrap().len()
        });

        prop_assert!(count <= usize::from(size));
        prop_assert_eq!(count, upstream.min(usize::from(size)));
        prop_assert_eq!(count == 0, upstream == 0);
    }
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_plan_posts_graphql_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTING_PATH))
        .and(header("content-type", "application/graphql"))
        .and(header("digitransit-subscription-key", "test-key"))
        .and(body_string_contains("numItineraries: 1"))
        .and(body_string_contains("from: { lat: 60.199152, lon: 24.933884 }"))
        .and(body_string_contains("to: { lat: 60.1458, lon: 24.9883 }"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_plan_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(&config_for_mock(&server.uri())).unwrap();
    let itinerary = client.plan(&pasila(), &suomenlinna()).await.unwrap();

    assert_eq!(itinerary.legs.len(), 2);
    assert_eq!(itinerary.legs[0].mode, TravelMode::Walk);
    assert_eq!(itinerary.legs[1].from.name, "Pasila");
    assert_eq!(itinerary.legs[1].to.name, "Kauppatori");
    assert_eq!(itinerary.legs[1].route_name(), Some("9"));
    assert_eq!(itinerary.transfers(), 0);
    assert_eq!(itinerary.start_place().unwrap().name, "Pasila");
}

#[tokio::test]
async fn test_plan_uses_configured_router() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/routing/v1/routers/finland/index/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_plan_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = DigitransitConfig {
        router: "finland".to_string(),
        ..config_for_mock(&server.uri())
    };
    let client = DigitransitRoutingClient::new(&config).unwrap();

    assert!(client.plan(&pasila(), &suomenlinna()).await.is_ok());
}

#[tokio::test]
async fn test_plan_server_error_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.plan(&pasila(), &suomenlinna()).await.unwrap_err();
    assert!(matches!(err, TransitError::Http { status: 503 }));
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_plan_missing_data_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "errors": [{ "message": "boom" }] })),
        )
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.plan(&pasila(), &suomenlinna()).await.unwrap_err();
    assert!(matches!(err, TransitError::InvalidResponse(ref msg) if msg.contains("boom")));
}

#[tokio::test]
async fn test_plan_empty_itineraries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "data": { "plan": { "itineraries": [] } } })),
        )
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(&config_for_mock(&server.uri())).unwrap();

    let err = client.plan(&pasila(), &suomenlinna()).await.unwrap_err();
    assert!(matches!(err, TransitError::NoItineraryFound { .. }));
}
