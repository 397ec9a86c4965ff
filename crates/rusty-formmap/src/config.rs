// File: src/config.rs
// Purpose: Mapper configuration parsing from formmap.toml

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mapper configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MapperConfig {
    #[serde(default)]
    pub temporal: TemporalConfig,

    #[serde(default)]
    pub mapping: MappingConfig,
}

/// How durations and instants are rendered into inputs
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TemporalConfig {
    /// Unit for duration inputs (default: minutes)
    #[serde(default)]
    pub duration_unit: DurationUnit,

    /// chrono format string for instants; RFC 3339 when unset
    #[serde(default)]
    pub time_format: Option<String>,
}

/// Traversal settings applied to every map call
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MappingConfig {
    /// Field paths that are never written (exact match)
    #[serde(default)]
    pub skip_fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
}

impl DurationUnit {
    /// Whole units in `seconds`, truncated toward zero
    pub fn whole_units(self, seconds: i64) -> i64 {
        match self {
            DurationUnit::Seconds => seconds,
            DurationUnit::Minutes => seconds / 60,
            DurationUnit::Hours => seconds / 3600,
        }
    }
}

impl MapperConfig {
    /// Load configuration from a formmap.toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formmap.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formmap.toml")
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: MapperConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make rendering fail later
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.temporal.time_format {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                bail!("Invalid time_format: {:?}", format);
            }
        }
        Ok(())
    }
}
