//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: Catalog,

    /// Locations tooling configuration.
    pub locations: Locations,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Catalog configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Path to the catalog JSON file.
    ///
    /// Built-in sample catalog is used whenever omitted.
    pub path: Option<String>,
}

/// Locations tooling configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Locations {
    /// Path to the divisions reference table.
    #[default("bd-divisions.json".to_owned())]
    pub divisions: String,

    /// Path to the districts reference table.
    #[default("bd-districts.json".to_owned())]
    pub districts: String,

    /// Path to the upazilas reference table.
    #[default("bd-upazilas.json".to_owned())]
    pub upazilas: String,

    /// Path to write the nested lookup to.
    #[default("locations.json".to_owned())]
    pub out: String,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Config;

    #[test]
    fn has_sane_defaults() {
        let conf = Config::default();

        assert!(conf.catalog.path.is_none());
        assert_eq!(conf.locations.divisions, "bd-divisions.json");
        assert_eq!(conf.locations.districts, "bd-districts.json");
        assert_eq!(conf.locations.upazilas, "bd-upazilas.json");
        assert_eq!(conf.locations.out, "locations.json");
    }
}
