use crate::{
    forecast::{calendar_date, condition_label},
    tmd::{DailyForecastResponse, ForecastData, ForecastEntry, Location},
};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse forecast time `{time}`: {source}")]
    Timestamp {
        time: String,
        #[source]
        source: time::error::Parse,
    },
}

/// Display shaped daily forecast for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyForecast {
    pub location: LocationInfo,
    pub forecasts: Vec<DailyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationInfo {
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amphoe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tambon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geocode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areatype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyEntry {
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    pub data: DailyValues,
}

/// Unit suffixed measurements. Values missing upstream are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tc_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tc_max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psfc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws10m: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wd10m: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_med: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_high: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_down: Option<String>,
    /// Localized condition, empty when the code is not one TMD documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cond: Option<String>,
}

const CELSIUS: &str = "°C";
const PERCENT: &str = "%";
const HECTOPASCAL: &str = "hPa";
const PASCAL: &str = "Pa";
const MILLIMETRE: &str = "mm";
const METRES_PER_SECOND: &str = "m/s";
const DEGREE: &str = "°";
const WATTS_PER_SQUARE_METRE: &str = "W/m²";

/// Maps TMD's response into the display shape.
///
/// Only the last location block survives when TMD returns several, and an
/// empty response maps to `None`. Any unparsable timestamp fails the whole mapping.
pub fn map_daily_forecast(
    response: &DailyForecastResponse,
) -> Result<Option<DailyForecast>, Error> {
    let mut result = None;
    for block in &response.weather_forecasts {
        let forecasts = block
            .forecasts
            .iter()
            .map(map_entry)
            .collect::<Result<Vec<_>, _>>()?;
        result = Some(DailyForecast {
            location: map_location(&block.location),
            forecasts,
        });
    }
    Ok(result)
}

fn map_location(location: &Location) -> LocationInfo {
    LocationInfo {
        lat: location.lat,
        lon: location.lon,
        province: location.province.clone(),
        amphoe: location.amphoe.clone(),
        tambon: location.tambon.clone(),
        region: location.region.clone(),
        geocode: location.geocode.clone(),
        areatype: location.areatype.clone(),
    }
}

fn map_entry(entry: &ForecastEntry) -> Result<DailyEntry, Error> {
    let time = OffsetDateTime::parse(&entry.time, &Rfc3339).map_err(|source| Error::Timestamp {
        time: entry.time.clone(),
        source,
    })?;
    Ok(DailyEntry {
        date: calendar_date(time.date()),
        data: map_values(&entry.data),
    })
}

// ws and wd are intentionally never surfaced
fn map_values(data: &ForecastData) -> DailyValues {
    DailyValues {
        tc_min: with_unit(data.tc_min, CELSIUS),
        tc_max: with_unit(data.tc_max, CELSIUS),
        rh: with_unit(data.rh, PERCENT),
        slp: with_unit(data.slp, HECTOPASCAL),
        psfc: with_unit(data.psfc, PASCAL),
        rain: with_unit(data.rain, MILLIMETRE),
        ws10m: with_unit(data.ws10m, METRES_PER_SECOND),
        wd10m: with_unit(data.wd10m, DEGREE),
        cloud_low: with_unit(data.cloudlow, PERCENT),
        cloud_med: with_unit(data.cloudmed, PERCENT),
        cloud_high: with_unit(data.cloudhigh, PERCENT),
        sw_down: with_unit(data.swdown, WATTS_PER_SQUARE_METRE),
        cond: data.cond.map(|code| condition_label(code).to_owned()),
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> Option<String> {
    value.map(|value| format!("{value} {unit}"))
}
