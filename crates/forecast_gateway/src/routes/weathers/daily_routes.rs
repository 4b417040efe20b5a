use std::sync::Arc;

use anyhow::anyhow;
use axum::{extract::State, Json};
use axum_extra::extract::{Query, QueryRejection};
use log::debug;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::{IntoParams, ToSchema};

use crate::{
    forecast::{
        parse_fields, CoordinatesQuery, DailyForecast, ForecastQuery, PlaceQuery, QueryOptions,
        DATE_FORMAT,
    },
    AppError, AppState, ErrorResponse, RequestContext, ValidationErrors,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyForecastBody {
    /// `null` when TMD has no forecast for the requested location
    pub data: Option<DailyForecast>,
}

#[utoipa::path(
    get,
    path = "/v1/weathers/daily/coordinates",
    params(
        CoordinatesRequest
    ),
    responses(
        (status = OK, description = "Successfully retrieved daily forecast", body = DailyForecastBody),
        (status = BAD_REQUEST, description = "Missing or malformed query parameters", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve forecast from TMD", body = ErrorResponse)
    ))]
pub async fn daily_by_coordinates(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<CoordinatesRequest>, QueryRejection>,
) -> Result<Json<DailyForecastBody>, AppError> {
    let Query(req) = query.map_err(|e| ctx.report(anyhow!(e.to_string())))?;
    let query = req.validate().map_err(|e| ctx.report(e))?;
    daily(&state, &ctx, ForecastQuery::Coordinates(query)).await
}

#[utoipa::path(
    get,
    path = "/v1/weathers/daily/place",
    params(
        PlaceRequest
    ),
    responses(
        (status = OK, description = "Successfully retrieved daily forecast", body = DailyForecastBody),
        (status = BAD_REQUEST, description = "Missing or malformed query parameters", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to retrieve forecast from TMD", body = ErrorResponse)
    ))]
pub async fn daily_by_place(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<PlaceRequest>, QueryRejection>,
) -> Result<Json<DailyForecastBody>, AppError> {
    let Query(req) = query.map_err(|e| ctx.report(anyhow!(e.to_string())))?;
    let query = req.validate().map_err(|e| ctx.report(e))?;
    daily(&state, &ctx, ForecastQuery::Place(query)).await
}

async fn daily(
    state: &AppState,
    ctx: &RequestContext,
    query: ForecastQuery,
) -> Result<Json<DailyForecastBody>, AppError> {
    debug!("[{}] daily forecast for {:?}", ctx.correlation_id, query);
    let data = state
        .forecasts
        .daily(ctx, &query)
        .await
        .map_err(|e| ctx.report(e))?;
    Ok(Json(DailyForecastBody { data }))
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CoordinatesRequest {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// First forecast day, YYYY-MM-DD (default: today)
    #[serde(default)]
    pub date: Option<String>,
    /// Number of days to forecast (default: 1), TMD enforces the bounds
    #[serde(default, deserialize_with = "crate::de::empty_as_none::deserialize")]
    pub duration: Option<i32>,
    /// Fields to return, comma separated and/or repeated, ex: fields=tc_max,tc_min&fields=cond
    #[serde(default)]
    pub fields: Vec<String>,
}

impl CoordinatesRequest {
    pub fn validate(self) -> Result<CoordinatesQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(-90.0..=90.0).contains(&self.lat) {
            errors.add("lat", "must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            errors.add("lon", "must be between -180 and 180");
        }
        let options = validate_options(
            &mut errors,
            self.date.as_deref(),
            self.duration,
            &self.fields,
        );
        errors.finish(CoordinatesQuery {
            lat: self.lat,
            lon: self.lon,
            options,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlaceRequest {
    /// Province name, ex: เชียงใหม่
    #[serde(default)]
    pub province: Option<String>,
    /// District name
    #[serde(default)]
    pub amphoe: Option<String>,
    /// Sub-district name
    #[serde(default)]
    pub tambon: Option<String>,
    /// Include every sub area of the place, true/false or 1/0 (default: false)
    #[serde(default, deserialize_with = "crate::de::flexible_bool::deserialize")]
    pub subarea: bool,
    /// First forecast day, YYYY-MM-DD (default: today)
    #[serde(default)]
    pub date: Option<String>,
    /// Number of days to forecast (default: 1), TMD enforces the bounds
    #[serde(default, deserialize_with = "crate::de::empty_as_none::deserialize")]
    pub duration: Option<i32>,
    /// Fields to return, comma separated and/or repeated, ex: fields=tc_max,tc_min&fields=cond
    #[serde(default)]
    pub fields: Vec<String>,
}

impl PlaceRequest {
    pub fn validate(self) -> Result<PlaceQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let options = validate_options(
            &mut errors,
            self.date.as_deref(),
            self.duration,
            &self.fields,
        );
        errors.finish(PlaceQuery {
            province: trimmed(self.province),
            amphoe: trimmed(self.amphoe),
            tambon: trimmed(self.tambon),
            subarea: self.subarea,
            options,
        })
    }
}

fn trimmed(value: Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_owned()
}

fn validate_options(
    errors: &mut ValidationErrors,
    date: Option<&str>,
    duration: Option<i32>,
    fields: &[String],
) -> QueryOptions {
    let date = match date.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => match Date::parse(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("date", "must be a calendar date formatted YYYY-MM-DD");
                None
            }
        },
        None => None,
    };
    // `fields=a,b` and `fields=a&fields=b` select the same thing
    let fields = match parse_fields(&fields.join(",")) {
        Ok(fields) => fields,
        Err(e) => {
            errors.add("fields", e.to_string());
            vec![]
        }
    };
    QueryOptions {
        date,
        duration,
        fields,
    }
}
