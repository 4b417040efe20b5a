use std::{fmt, str::FromStr};

/// Attribute names TMD accepts in the `fields` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastField {
    TcMin,
    TcMax,
    Rh,
    Slp,
    Psfc,
    Rain,
    Ws10m,
    Wd10m,
    Ws,
    Wd,
    CloudLow,
    CloudMed,
    CloudHigh,
    SwDown,
    Cond,
}

impl ForecastField {
    pub const ALL: [ForecastField; 15] = [
        ForecastField::TcMin,
        ForecastField::TcMax,
        ForecastField::Rh,
        ForecastField::Slp,
        ForecastField::Psfc,
        ForecastField::Rain,
        ForecastField::Ws10m,
        ForecastField::Wd10m,
        ForecastField::Ws,
        ForecastField::Wd,
        ForecastField::CloudLow,
        ForecastField::CloudMed,
        ForecastField::CloudHigh,
        ForecastField::SwDown,
        ForecastField::Cond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastField::TcMin => "tc_min",
            ForecastField::TcMax => "tc_max",
            ForecastField::Rh => "rh",
            ForecastField::Slp => "slp",
            ForecastField::Psfc => "psfc",
            ForecastField::Rain => "rain",
            ForecastField::Ws10m => "ws10m",
            ForecastField::Wd10m => "wd10m",
            ForecastField::Ws => "ws",
            ForecastField::Wd => "wd",
            ForecastField::CloudLow => "cloudlow",
            ForecastField::CloudMed => "cloudmed",
            ForecastField::CloudHigh => "cloudhigh",
            ForecastField::SwDown => "swdown",
            ForecastField::Cond => "cond",
        }
    }
}

impl fmt::Display for ForecastField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown forecast field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for ForecastField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        ForecastField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| UnknownField(s.trim().to_owned()))
    }
}

/// Splits a comma separated list, skipping blank entries
pub fn parse_fields(raw: &str) -> Result<Vec<ForecastField>, UnknownField> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ForecastField::from_str)
        .collect()
}

pub fn join_fields(fields: &[ForecastField]) -> String {
    fields
        .iter()
        .map(ForecastField::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
