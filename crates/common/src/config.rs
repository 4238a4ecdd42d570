use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};
use tracing_subscriber::filter::LevelFilter;

/// Logging configuration.
///
/// Missing keys fall back to [`Logging::default`].
#[derive(Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Most verbose level that is still recorded, for example `info` or `off`.
    #[serde(deserialize_with = "parse_level")]
    pub level: LevelFilter,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

/// Read a [`LevelFilter`] from its textual name.
fn parse_level<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    LevelFilter::from_str(&name).map_err(de::Error::custom)
}
