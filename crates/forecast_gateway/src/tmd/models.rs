use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body returned by the TMD daily forecast endpoints on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastResponse {
    #[serde(rename = "WeatherForecasts", default)]
    pub weather_forecasts: Vec<LocationForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationForecast {
    pub location: Location,
    #[serde(default)]
    pub forecasts: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub amphoe: Option<String>,
    #[serde(default)]
    pub tambon: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub geocode: Option<String>,
    #[serde(default)]
    pub areatype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// RFC3339 timestamp of the forecast day
    pub time: String,
    pub data: ForecastData,
}

/// Raw measurements, every one of them nullable on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastData {
    pub tc_min: Option<f64>,
    pub tc_max: Option<f64>,
    pub rh: Option<f64>,
    pub slp: Option<f64>,
    pub psfc: Option<f64>,
    pub rain: Option<f64>,
    pub ws10m: Option<f64>,
    pub wd10m: Option<f64>,
    pub ws: Option<f64>,
    pub wd: Option<f64>,
    pub cloudlow: Option<f64>,
    pub cloudmed: Option<f64>,
    pub cloudhigh: Option<f64>,
    pub swdown: Option<f64>,
    pub cond: Option<f64>,
}

/// Error envelope TMD sends alongside a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderError {
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "status {} ({})", self.status, self.code)
        } else {
            write!(f, "status {}: {}", self.status, self.message)
        }
    }
}
