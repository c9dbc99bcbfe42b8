use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{EPSG_UTM_NORTH_PREFIX, EPSG_UTM_SOUTH_PREFIX, MAX_UTM_ZONE, MIN_UTM_ZONE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub fn parse(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

/// A UTM zone designator such as `32N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub number: u8,
    pub hemisphere: Hemisphere,
}

impl ZoneSpec {
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self> {
        if !(MIN_UTM_ZONE..=MAX_UTM_ZONE).contains(&number) {
            return Err(ProcessingError::zone_parse(
                &format!("{}{}", number, hemisphere.letter()),
                format!(
                    "zone number must be between {} and {}",
                    MIN_UTM_ZONE, MAX_UTM_ZONE
                ),
            ));
        }
        Ok(Self { number, hemisphere })
    }

    /// Parse a designator: every character but the last is the zone number,
    /// the last one is the hemisphere letter (`N` or `S`, case-sensitive).
    pub fn parse(zone: &str) -> Result<Self> {
        let trimmed = zone.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next_back()
            .ok_or_else(|| ProcessingError::zone_parse(zone, "empty zone designator"))?;
        let number_part = chars.as_str();

        let number = number_part.parse::<u8>().map_err(|_| {
            ProcessingError::zone_parse(zone, format!("invalid zone number '{}'", number_part))
        })?;

        let hemisphere = Hemisphere::parse(letter).ok_or_else(|| {
            ProcessingError::zone_parse(
                zone,
                format!("hemisphere must be 'N' or 'S', got '{}'", letter),
            )
        })?;

        Self::new(number, hemisphere).map_err(|_| {
            ProcessingError::zone_parse(
                zone,
                format!(
                    "zone number must be between {} and {}",
                    MIN_UTM_ZONE, MAX_UTM_ZONE
                ),
            )
        })
    }

    /// Reference-system identifier, e.g. `EPSG:32632`.
    pub fn epsg_id(&self) -> String {
        let prefix = match self.hemisphere {
            Hemisphere::North => EPSG_UTM_NORTH_PREFIX,
            Hemisphere::South => EPSG_UTM_SOUTH_PREFIX,
        };
        format!("EPSG:{}{:02}", prefix, self.number)
    }

    /// Longitude of the zone's central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        (self.number as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }

    pub fn is_south(&self) -> bool {
        self.hemisphere == Hemisphere::South
    }
}

impl FromStr for ZoneSpec {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.hemisphere.letter())
    }
}

/// Resolve a zone designator straight to its reference-system identifier.
///
/// # Examples
/// ```
/// use utm2gpx::models::zone::resolve;
///
/// assert_eq!(resolve("32N").unwrap(), "EPSG:32632");
/// assert_eq!(resolve("32S").unwrap(), "EPSG:32732");
/// ```
pub fn resolve(zone: &str) -> Result<String> {
    Ok(ZoneSpec::parse(zone)?.epsg_id())
}
