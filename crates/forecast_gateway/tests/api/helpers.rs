use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request},
    Router,
};
use forecast_gateway::{
    app,
    forecast::{ForecastService, QueryParams},
    setup_logger,
    tmd::{self, DailyForecastResponse, ForecastClient},
    AppState, RequestContext,
};
use hyper::{Method, StatusCode};
use log::LevelFilter;
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

pub struct TestApp {
    pub app: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

static INIT_LOGGER: Once = Once::new();
fn init_logger() {
    INIT_LOGGER.call_once(|| {
        setup_logger().level(LevelFilter::Debug).apply().unwrap();
    });
}

pub fn spawn_app(client: Arc<dyn ForecastClient>) -> TestApp {
    init_logger();
    let app_state = AppState {
        allowed_origins: vec![String::from("*")],
        forecasts: Arc::new(ForecastService::new(client)),
    };
    TestApp {
        app: app(app_state),
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request.");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: if body.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&body).unwrap()
            },
        }
    }
}

/// A single location with one forecast day, the shape TMD answers with
pub fn tmd_body(time: &str, data: Value) -> Value {
    json!({
        "WeatherForecasts": [{
            "location": { "lat": 13.75, "lon": 100.5 },
            "forecasts": [{ "time": time, "data": data }]
        }]
    })
}

pub fn tmd_response(time: &str, data: Value) -> DailyForecastResponse {
    serde_json::from_value(tmd_body(time, data)).unwrap()
}

mock! {
    pub TmdClient {}
    #[async_trait]
    impl ForecastClient for TmdClient {
        async fn daily_at(
            &self,
            ctx: &RequestContext,
            params: &QueryParams,
        ) -> Result<DailyForecastResponse, tmd::Error>;
        async fn daily_place(
            &self,
            ctx: &RequestContext,
            params: &QueryParams,
        ) -> Result<DailyForecastResponse, tmd::Error>;
    }
}
