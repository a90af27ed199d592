//! Logger configuration.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::clock::TIME_FORMAT;
use crate::{Error, Result};

/// Settings for a root [`Logger`](crate::Logger)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Context of the root logger; empty means no label
    pub context: String,

    /// strftime layout of the timestamp, rendered in UTC
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context: String::new(),
            time_format: TIME_FORMAT.to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject time formats chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if self.time_format.is_empty() {
            return Err(Error::InvalidParam("time_format must not be empty".to_string()));
        }
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidParam(format!(
                "time_format {:?} is not a valid strftime layout",
                self.time_format
            )));
        }
        Ok(())
    }
}
