use serde::{Deserialize, Deserializer};

/// Accepts `true`/`false` as well as the `1`/`0` form TMD documents for flags
pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean `{other}`, expected true, false, 1 or 0"
        ))),
    }
}
