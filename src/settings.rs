use crate::error::{ProcessingError, Result};
use crate::models::ZoneSpec;
use crate::utils::constants::{CONFIG_FILE, DEFAULT_CREATOR, DEFAULT_ZONE, ENV_PREFIX};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Conversion settings layered as defaults, config file, `UTM2GPX_*`
/// environment variables, then command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(length(min = 1))]
    pub zone: String,

    pub name_column: Option<String>,

    /// Field delimiter (one character, or `tab`); auto-detected when unset
    pub delimiter: Option<String>,

    /// Worksheet to read from spreadsheet input; the first one when unset
    pub sheet: Option<String>,

    #[validate(length(min = 1))]
    pub creator: String,
}

impl Settings {
    /// Load settings from `config_path` (required when given) or the
    /// optional `utm2gpx.toml` in the working directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file_source = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("zone", DEFAULT_ZONE)?
            .set_default("creator", DEFAULT_CREATOR)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn zone_spec(&self) -> Result<ZoneSpec> {
        ZoneSpec::parse(&self.zone)
    }

    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self.delimiter.as_deref() {
            None => Ok(None),
            Some("\\t") | Some("tab") => Ok(Some(b'\t')),
            Some(d) if d.len() == 1 => Ok(d.bytes().next()),
            Some(d) => Err(ProcessingError::InvalidFormat(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                d
            ))),
        }
    }

    pub fn apply_overrides(
        mut self,
        zone: Option<String>,
        name_column: Option<String>,
        delimiter: Option<String>,
        sheet: Option<String>,
    ) -> Result<Self> {
        if let Some(zone) = zone {
            self.zone = zone;
        }
        if name_column.is_some() {
            self.name_column = name_column;
        }
        if delimiter.is_some() {
            self.delimiter = delimiter;
        }
        if sheet.is_some() {
            self.sheet = sheet;
        }
        self.validate()?;
        Ok(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zone: DEFAULT_ZONE.to_string(),
            name_column: None,
            delimiter: None,
            sheet: None,
            creator: DEFAULT_CREATOR.to_string(),
        }
    }
}
