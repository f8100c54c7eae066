//! Integration tests for the provider clients (wiremock-based)

use chrono::{TimeZone, Utc};
use domain::{Coordinate, TransitMode};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_transit::{
    DigitransitConfig, DigitransitGeocodingClient, DigitransitRoutingClient, GeocodingClient,
    GeocodingError, NominatimConfig, NominatimGeocodingClient, RoutingClient, TransitError,
};

fn digitransit_for_mock(base_url: &str) -> DigitransitConfig {
    DigitransitConfig {
        routing_url: format!("{base_url}/routing/v2/hsl/gtfs/v1"),
        geocoding_base_url: base_url.to_string(),
        subscription_key: Some("secret-key".to_string()),
        timeout_secs: 5,
        ..DigitransitConfig::default()
    }
}

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn helsinki() -> Coordinate {
    Coordinate::new(60.1699, 24.9384).unwrap()
}

fn espoo() -> Coordinate {
    Coordinate::new(60.2055, 24.6559).unwrap()
}

const fn sample_plan_json() -> &'static str {
    r#"{"data": {"plan": {"itineraries": [
        {
            "duration": 1500, "walkDistance": 250.0,
            "legs": [{
                "mode": "BUS", "startTime": 1770796800000, "endTime": 1770798300000,
                "duration": 1500.0, "distance": 14000.0,
                "from": {"name": "Kamppi", "lat": 60.1686, "lon": 24.9316},
                "to": {"name": "Tapiola", "lat": 60.1750, "lon": 24.8050},
                "route": {"shortName": "550", "longName": "Itäkeskus - Westendinasema"},
                "intermediatePlaces": [{"name": "Ruoholahti", "lat": 60.1633, "lon": 24.9147}]
            }]
        },
        {
            "duration": 1800, "walkDistance": 600.0,
            "legs": [{
                "mode": "RAIL", "startTime": 1770797000000, "endTime": 1770798800000,
                "duration": 1800.0, "distance": 16000.0,
                "from": {"name": "Helsinki", "lat": 60.1710, "lon": 24.9414},
                "to": {"name": "Espoo", "lat": 60.2052, "lon": 24.6561},
                "route": {"shortName": "U", "longName": null},
                "intermediatePlaces": null
            }]
        }
    ]}}}"#
}

const fn sample_features_json() -> &'static str {
    r#"{"features": [
        {
            "geometry": {"coordinates": [24.9316, 60.1686]},
            "properties": {"label": "Kamppi, Helsinki", "localadmin": "Helsinki", "region": "Uusimaa"}
        },
        {
            "geometry": {"coordinates": [24.8050, 60.1750]},
            "properties": {"label": "Tapiola, Espoo", "localadmin": "Espoo", "region": "Uusimaa"}
        }
    ]}"#
}

// --- Routing engine ---

#[tokio::test]
async fn test_plan_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/routing/v2/hsl/gtfs/v1"))
        .and(header("digitransit-subscription-key", "secret-key"))
        .and(body_partial_json(serde_json::json!({
            "variables": {"numItineraries": 5}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_plan_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let itineraries = client.plan(helsinki(), espoo(), None, 5).await.unwrap();

    assert_eq!(itineraries.len(), 2);
    assert_eq!(itineraries[0].duration_seconds, 1500);
    assert_eq!(itineraries[0].legs[0].mode, TransitMode::Bus);
    assert_eq!(itineraries[0].legs[0].route_short_name.as_deref(), Some("550"));
    assert_eq!(itineraries[1].legs[0].mode, TransitMode::Train);
    assert!(itineraries[1].legs[0].intermediate_stops.is_empty());
}

#[tokio::test]
async fn test_plan_sends_local_date_and_time() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "variables": {"date": "2026-10-19", "time": "08:30:00", "numItineraries": 3}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_plan_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let departure = Utc.with_ymd_and_hms(2026, 10, 19, 5, 30, 0).unwrap();
    let result = client.plan(helsinki(), espoo(), Some(departure), 3).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_plan_no_itineraries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"data": {"plan": {"itineraries": []}}}"#),
        )
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let itineraries = client.plan(helsinki(), espoo(), None, 5).await.unwrap();
    assert!(itineraries.is_empty());
}

#[tokio::test]
async fn test_plan_server_error_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let err = client.plan(helsinki(), espoo(), None, 5).await.unwrap_err();
    assert!(matches!(err, TransitError::RequestFailed(ref m) if m.contains("503")));
}

#[tokio::test]
async fn test_plan_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let err = client.plan(helsinki(), espoo(), None, 5).await.unwrap_err();
    assert!(matches!(
        err,
        TransitError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn test_plan_graphql_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"errors": [{"message": "Invalid coordinates"}]}"#),
        )
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let err = client.plan(helsinki(), espoo(), None, 5).await.unwrap_err();
    assert!(matches!(err, TransitError::QueryRejected(_)));
}

#[tokio::test]
async fn test_plan_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();

    let err = client.plan(helsinki(), espoo(), None, 5).await.unwrap_err();
    assert!(matches!(err, TransitError::ParseError(_)));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": {"feeds": []}}"#))
        .mount(&server)
        .await;

    let client = DigitransitRoutingClient::new(
        &digitransit_for_mock(&server.uri()),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();
    assert!(client.is_healthy().await);

    let unreachable = DigitransitRoutingClient::new(
        &digitransit_for_mock("http://127.0.0.1:1"),
        chrono_tz::Europe::Helsinki,
    )
    .unwrap();
    assert!(!unreachable.is_healthy().await);
}

// --- Digitransit geocoding ---

#[tokio::test]
async fn test_digitransit_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v1/search"))
        .and(query_param("text", "Kamppi"))
        .and(query_param("size", "10"))
        .and(query_param("lang", "fi"))
        .and(header("digitransit-subscription-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_features_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&digitransit_for_mock(&server.uri())).unwrap();
    let candidates = client.search("Kamppi").await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].display_name, "Kamppi, Helsinki");
    assert_eq!(candidates[1].local_admin_area, "Espoo");
}

#[tokio::test]
async fn test_digitransit_suggest_uses_autocomplete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geocoding/v1/autocomplete"))
        .and(query_param("text", "Kam"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_features_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&digitransit_for_mock(&server.uri())).unwrap();
    let candidates = client.suggest("Kam").await.unwrap();
    assert_eq!(candidates.len(), 2);
}

#[tokio::test]
async fn test_digitransit_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = DigitransitGeocodingClient::new(&digitransit_for_mock(&server.uri())).unwrap();
    let err = client.search("Kamppi").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RequestFailed(_)));
}

// --- Nominatim ---

#[tokio::test]
async fn test_nominatim_first_attempt_hits() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Pasila"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("addressdetails", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "60.1987", "lon": "24.9335", "display_name": "Pasila, Helsinki",
                 "address": {"city": "Helsinki", "state": "Uusimaa"}}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("q", "Pasila, Finland"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let candidates = client.search("  Pasila ").await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].local_admin_area, "Helsinki");
}

#[tokio::test]
async fn test_nominatim_retries_with_country() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "Otaniemi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("q", "Otaniemi, Finland"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "60.1867", "lon": "24.8283", "display_name": "Otaniemi, Espoo",
                 "address": {"city": "Espoo", "state": "Uusimaa"}}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let candidates = client.search("Otaniemi").await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].local_admin_area, "Espoo");
}

#[tokio::test]
async fn test_nominatim_nothing_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    assert!(client.search("Xyzzyqq12345").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_nominatim_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Helsinki").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RequestFailed(_)));
}

#[tokio::test]
async fn test_nominatim_unreachable() {
    let client = NominatimGeocodingClient::new(&nominatim_for_mock("http://127.0.0.1:1")).unwrap();
    let err = client.search("Helsinki").await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_nominatim_concurrent_searches_do_not_queue() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_string(
                    r#"[{"lat": "60.1699", "lon": "24.9384", "display_name": "Helsinki",
                         "address": {"city": "Helsinki", "state": "Uusimaa"}}]"#,
                ),
        )
        .expect(3)
        .mount(&server)
        .await;

    // Production defaults, only the endpoint swapped
    let config = NominatimConfig {
        base_url: server.uri(),
        ..NominatimConfig::default()
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    let started = std::time::Instant::now();
    let (a, b, c) = tokio::join!(
        client.search("Kamppi"),
        client.search("Pasila"),
        client.search("Tapiola"),
    );
    let elapsed = started.elapsed();

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert!(
        elapsed < std::time::Duration::from_millis(800),
        "searches ran one after another: {elapsed:?}"
    );
}
