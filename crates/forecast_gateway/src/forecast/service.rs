use crate::{
    forecast::{map_daily_forecast, mapper, DailyForecast, ForecastQuery},
    tmd::{self, ForecastClient},
    RequestContext,
};
use log::{debug, warn};
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to fetch forecast: {0}")]
    Upstream(#[from] tmd::Error),
    #[error("Failed to map forecast: {0}")]
    Mapping(#[from] mapper::Error),
}

/// Builds TMD parameters, makes the single upstream call and reshapes the answer.
pub struct ForecastService {
    client: Arc<dyn ForecastClient>,
}

impl ForecastService {
    pub fn new(client: Arc<dyn ForecastClient>) -> Self {
        Self { client }
    }

    pub async fn daily(
        &self,
        ctx: &RequestContext,
        query: &ForecastQuery,
    ) -> Result<Option<DailyForecast>, Error> {
        let params = query.to_params();
        let response = match query {
            ForecastQuery::Coordinates(_) => self.client.daily_at(ctx, &params).await,
            ForecastQuery::Place(_) => self.client.daily_place(ctx, &params).await,
        }
        .inspect_err(|e| {
            if e.is_timeout() {
                warn!("[{}] TMD did not answer in time", ctx.correlation_id);
            }
        })?;

        let blocks = response.weather_forecasts.len();
        debug!("[{}] TMD returned {} location(s)", ctx.correlation_id, blocks);
        if blocks > 1 {
            // only the last block is returned to the caller
            warn!(
                "[{}] TMD returned {} locations, discarding all but the last",
                ctx.correlation_id, blocks
            );
        }

        Ok(map_daily_forecast(&response)?)
    }
}
