use crate::{
    forecast::QueryParams,
    tmd::{DailyForecastResponse, ProviderError},
    RequestContext,
};
use async_trait::async_trait;
use log::debug;
use reqwest::{header::ACCEPT, Client, StatusCode};
use std::time::Duration;

/// Fixed bound on a single call to TMD, connect through body
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const DAILY_AT_PATH: &str = "/forecast/location/daily/at";
const DAILY_PLACE_PATH: &str = "/forecast/location/daily/place";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("Failed to reach TMD: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("TMD rejected the request, {0}")]
    Provider(ProviderError),
    #[error("Failed to decode TMD response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(e) if e.is_timeout())
    }
}

#[async_trait]
pub trait ForecastClient: Sync + Send {
    /// Daily forecast for a single coordinate
    async fn daily_at(
        &self,
        ctx: &RequestContext,
        params: &QueryParams,
    ) -> Result<DailyForecastResponse, Error>;
    /// Daily forecast for a named province/amphoe/tambon
    async fn daily_place(
        &self,
        ctx: &RequestContext,
        params: &QueryParams,
    ) -> Result<DailyForecastResponse, Error>;
}

pub struct TmdClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl TmdClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, access_token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: &str,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        })
    }

    async fn get(
        &self,
        ctx: &RequestContext,
        path: &str,
        params: &QueryParams,
    ) -> Result<DailyForecastResponse, Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[{}] GET {} {:?}", ctx.correlation_id, url, params);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Transport)?;
        debug!(
            "[{}] TMD responded {} with {} bytes",
            ctx.correlation_id,
            status,
            body.len()
        );

        if !status.is_success() {
            return Err(Error::Provider(provider_error(status, &body)));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ForecastClient for TmdClient {
    async fn daily_at(
        &self,
        ctx: &RequestContext,
        params: &QueryParams,
    ) -> Result<DailyForecastResponse, Error> {
        self.get(ctx, DAILY_AT_PATH, params).await
    }

    async fn daily_place(
        &self,
        ctx: &RequestContext,
        params: &QueryParams,
    ) -> Result<DailyForecastResponse, Error> {
        self.get(ctx, DAILY_PLACE_PATH, params).await
    }
}

/// TMD normally answers failures with its error envelope, anything else is kept as raw text
fn provider_error(status: StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ProviderError>(body) {
        Ok(mut envelope) => {
            if envelope.status == 0 {
                envelope.status = status.as_u16();
            }
            envelope
        }
        Err(_) => ProviderError {
            status: status.as_u16(),
            code: status
                .canonical_reason()
                .unwrap_or_default()
                .to_lowercase()
                .replace(' ', "-"),
            message: truncate_body(body),
            errors: None,
        },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    let body = body.trim();
    if body.chars().count() <= MAX_CHARS {
        body.to_owned()
    } else {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{head}...")
    }
}
