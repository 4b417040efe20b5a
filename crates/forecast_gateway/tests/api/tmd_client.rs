use std::{sync::Arc, time::Duration};

use crate::helpers::{spawn_app, tmd_body};
use forecast_gateway::{
    forecast::QueryParams,
    tmd::{self, ForecastClient, TmdClient},
    RequestContext,
};
use hyper::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const TOKEN: &str = "test-token";

fn coordinate_params() -> QueryParams {
    QueryParams::from([
        ("lat", String::from("13.750000")),
        ("lon", String::from("100.500000")),
        ("date", String::new()),
        ("duration", String::from("1")),
        ("fields", String::from("tc_max")),
    ])
}

#[tokio::test]
async fn sends_bearer_token_and_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/location/daily/at"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .and(query_param("lat", "13.750000"))
        .and(query_param("duration", "1"))
        .and(query_param("fields", "tc_max"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmd_body(
            "2024-04-01T00:00:00+07:00",
            json!({ "tc_max": 33.2 }),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TmdClient::new(&mock_server.uri(), TOKEN).unwrap();
    let response = client
        .daily_at(&RequestContext::new(), &coordinate_params())
        .await
        .unwrap();

    assert_eq!(response.weather_forecasts.len(), 1);
    let forecast = &response.weather_forecasts[0];
    assert_eq!(forecast.location.lat, 13.75);
    assert_eq!(forecast.forecasts[0].data.tc_max, Some(33.2));
    assert_eq!(forecast.forecasts[0].data.tc_min, None);
}

#[tokio::test]
async fn place_uses_place_endpoint() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/location/daily/place"))
        .and(query_param("province", "Chiang Mai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "WeatherForecasts": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // trailing slash on the configured url must not double up
    let client = TmdClient::new(&format!("{}/", mock_server.uri()), TOKEN).unwrap();
    let params = QueryParams::from([("province", String::from("Chiang Mai"))]);
    let response = client
        .daily_place(&RequestContext::new(), &params)
        .await
        .unwrap();

    assert!(response.weather_forecasts.is_empty());
}

#[tokio::test]
async fn error_envelope_is_a_provider_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/location/daily/at"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "code": "unprocessable-entity",
            "message": "duration must not exceed 126",
            "errors": { "duration": ["max"] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TmdClient::new(&mock_server.uri(), TOKEN).unwrap();
    let err = client
        .daily_at(&RequestContext::new(), &coordinate_params())
        .await
        .unwrap_err();

    match err {
        tmd::Error::Provider(provider) => {
            assert_eq!(provider.status, 422);
            assert_eq!(provider.code, "unprocessable-entity");
            assert_eq!(provider.message, "duration must not exceed 126");
            assert_eq!(provider.errors, Some(json!({ "duration": ["max"] })));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = TmdClient::new(&mock_server.uri(), TOKEN).unwrap();
    let err = client
        .daily_at(&RequestContext::new(), &coordinate_params())
        .await
        .unwrap_err();

    assert!(matches!(err, tmd::Error::Decode(_)));
}

#[tokio::test]
async fn slow_tmd_is_a_timeout_without_retry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "WeatherForecasts": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        TmdClient::with_timeout(&mock_server.uri(), TOKEN, Duration::from_millis(200)).unwrap();
    let err = client
        .daily_at(&RequestContext::new(), &coordinate_params())
        .await
        .unwrap_err();

    assert!(matches!(err, tmd::Error::Transport(_)));
    assert!(err.is_timeout());
}

#[tokio::test]
async fn unreachable_tmd_is_a_transport_error() {
    let client = TmdClient::new("http://127.0.0.1:1", TOKEN).unwrap();

    let err = client
        .daily_at(&RequestContext::new(), &coordinate_params())
        .await
        .unwrap_err();

    assert!(matches!(err, tmd::Error::Transport(_)));
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn timeout_surfaces_as_internal_error_after_one_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/location/daily/at"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "WeatherForecasts": [] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;
    let client =
        TmdClient::with_timeout(&mock_server.uri(), TOKEN, Duration::from_millis(200)).unwrap();
    let test_app = spawn_app(Arc::new(client));

    let response = test_app
        .get("/v1/weathers/daily/coordinates?lat=13.75&lon=100.5")
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["code"], "internal-server-error");
    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}
