use crate::error::{ProcessingError, Result};
use crate::utils::constants::NA_MARKERS;

/// Normalise a raw cell: trimmed text, or `None` when it is empty or an NA marker.
pub fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a numeric cell (planar coordinate or elevation).
///
/// Accepts a decimal comma when the value has no `.`, as exported by
/// Italian-locale spreadsheets.
///
/// # Examples
/// ```
/// use utm2gpx::utils::parse_number;
///
/// assert_eq!(parse_number("650000").unwrap(), 650000.0);
/// assert_eq!(parse_number("650000,5").unwrap(), 650000.5);
/// assert!(parse_number("abc").is_err());
/// ```
pub fn parse_number(value: &str) -> Result<f64> {
    let trimmed = value.trim();

    let parsed = trimmed.parse::<f64>().or_else(|_| {
        if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
            trimmed.replace(',', ".").parse::<f64>()
        } else {
            trimmed.parse::<f64>()
        }
    });

    match parsed {
        Ok(number) if number.is_finite() => Ok(number),
        Ok(_) => Err(ProcessingError::InvalidFormat(format!(
            "Non-finite numeric value: '{}'",
            value
        ))),
        Err(_) => Err(ProcessingError::InvalidFormat(format!(
            "Invalid numeric value: '{}'",
            value
        ))),
    }
}

/// Validate WGS84 bounds of a converted point
pub fn validate_wgs84(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ProcessingError::Transform(format!(
            "Latitude {} is outside [-90, 90]",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ProcessingError::Transform(format!(
            "Longitude {} is outside [-180, 180]",
            longitude
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_cell() {
        assert_eq!(clean_cell("  TO-001 "), Some("TO-001".to_string()));
        assert_eq!(clean_cell("   "), None);
        assert_eq!(clean_cell(""), None);
        assert_eq!(clean_cell("NaN"), None);
        assert_eq!(clean_cell("#N/A"), None);
        assert_eq!(clean_cell("0"), Some("0".to_string()));
        assert_eq!(clean_cell("-"), Some("-".to_string()));
        assert_eq!(clean_cell(" -- "), Some("--".to_string()));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 4850000 ").unwrap(), 4850000.0);
        assert_eq!(parse_number("1200.5").unwrap(), 1200.5);
        assert_eq!(parse_number("1200,5").unwrap(), 1200.5);
        assert_eq!(parse_number("-12").unwrap(), -12.0);
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(parse_number("abc").is_err());
        assert!(parse_number("1,200,5").is_err());
        assert!(parse_number("1.200,5").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
    }

    #[test]
    fn test_wgs84_validation() {
        assert!(validate_wgs84(45.07, 6.70).is_ok());
        assert!(validate_wgs84(-33.9, 18.4).is_ok());
        assert!(validate_wgs84(91.0, 0.0).is_err());
        assert!(validate_wgs84(0.0, 181.0).is_err());
    }
}
