use crate::{
    daily_by_coordinates, daily_by_place,
    forecast::{self, ForecastService},
    healthz, routes,
    tmd::{ForecastClient, TmdClient},
    Cli, ErrorCode, ErrorResponse, RequestContext, CORRELATION_ID_HEADER,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{self, HeaderName, HeaderValue},
    Method,
};
use log::{error, info};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub allowed_origins: Vec<String>,
    pub forecasts: Arc<ForecastService>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::healthz::healthz,
        routes::weathers::daily_routes::daily_by_coordinates,
        routes::weathers::daily_routes::daily_by_place,
    ),
    components(
        schemas(
                ErrorResponse,
                ErrorCode,
                routes::health::healthz::HealthStatus,
                routes::weathers::daily_routes::DailyForecastBody,
                forecast::DailyForecast,
                forecast::LocationInfo,
                forecast::DailyEntry,
                forecast::DailyValues,
            )
    ),
    tags(
        (name = "forecast gateway api", description = "a RESTful api serving TMD daily weather forecasts with display ready values")
    )
)]
struct ApiDoc;

pub fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let tmd_url = cli
        .tmd_url
        .clone()
        .ok_or_else(|| anyhow!("missing TMD url, set --tmd-url or TMD_URL"))?;
    let tmd_access_token = cli
        .tmd_access_token
        .clone()
        .ok_or_else(|| anyhow!("missing TMD access token, set --tmd-access-token or TMD_ACCESS_TOKEN"))?;
    let client: Arc<dyn ForecastClient> = Arc::new(
        TmdClient::new(&tmd_url, &tmd_access_token)
            .map_err(|e| anyhow!("error setting up TMD client: {}", e))?,
    );

    Ok(AppState {
        allowed_origins: cli.allowed_origins(),
        forecasts: Arc::new(ForecastService::new(client)),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = cors_layer(&app_state.allowed_origins);
    let v1 = Router::new()
        .route("/weathers/daily/coordinates", get(daily_by_coordinates))
        .route("/weathers/daily/place", get(daily_by_place));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/v1", v1)
        .with_state(Arc::new(app_state))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-secret-key"),
        ]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

async fn log_request(mut request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let ctx = RequestContext::from_headers(request.headers());
    request.extensions_mut().insert(ctx.clone());
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    info!(target: "http_request", "[{}] new request, {} {}", ctx.correlation_id, method.as_str(), path);

    let mut response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    if response.status().is_server_error() {
        error!(target: "http_response", "[{}] response, code: {}, time: {}", ctx.correlation_id, response.status().as_str(), response_time);
    } else {
        info!(target: "http_response", "[{}] response, code: {}, time: {}", ctx.correlation_id, response.status().as_str(), response_time);
    }

    if let Ok(value) = HeaderValue::from_str(&ctx.correlation_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
    }
    response
}
