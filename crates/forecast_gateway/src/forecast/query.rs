use crate::forecast::{calendar_date, join_fields, ForecastField};
use std::collections::BTreeMap;
use time::Date;

/// Query string parameters sent to TMD, keyed by TMD's parameter name
pub type QueryParams = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    Coordinates(CoordinatesQuery),
    Place(PlaceQuery),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatesQuery {
    pub lat: f64,
    pub lon: f64,
    pub options: QueryOptions,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceQuery {
    pub province: String,
    pub amphoe: String,
    pub tambon: String,
    /// Include the sub-areas of the named place
    pub subarea: bool,
    pub options: QueryOptions,
}

/// Settings shared by both query variants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub date: Option<Date>,
    /// Number of forecast days, TMD enforces the upper bound
    pub duration: Option<i32>,
    pub fields: Vec<ForecastField>,
}

impl ForecastQuery {
    pub fn to_params(&self) -> QueryParams {
        match self {
            ForecastQuery::Coordinates(query) => coordinates_params(query),
            ForecastQuery::Place(query) => place_params(query),
        }
    }
}

/// Always emits all five keys; absent values are sent as empty strings.
pub fn coordinates_params(query: &CoordinatesQuery) -> QueryParams {
    let options = &query.options;
    BTreeMap::from([
        ("lat", format!("{:.6}", query.lat)),
        ("lon", format!("{:.6}", query.lon)),
        ("date", options.date.map(calendar_date).unwrap_or_default()),
        (
            "duration",
            options
                .duration
                .map(|days| days.to_string())
                .unwrap_or_default(),
        ),
        ("fields", join_fields(&options.fields)),
    ])
}

/// Emits only the parameters that carry a value. An empty map is a valid result.
pub fn place_params(query: &PlaceQuery) -> QueryParams {
    let mut params = QueryParams::new();
    let names = [
        ("province", &query.province),
        ("amphoe", &query.amphoe),
        ("tambon", &query.tambon),
    ];
    for (key, value) in names {
        if !value.is_empty() {
            params.insert(key, value.clone());
        }
    }
    if query.subarea {
        params.insert("subarea", query.subarea.to_string());
    }

    let options = &query.options;
    if let Some(date) = options.date {
        params.insert("date", calendar_date(date));
    }
    if let Some(days) = options.duration.filter(|days| *days != 0) {
        params.insert("duration", days.to_string());
    }
    if !options.fields.is_empty() {
        params.insert("fields", join_fields(&options.fields));
    }
    params
}
