use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Waypoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub elevation: Option<f64>,

    #[validate(length(min = 1))]
    pub name: String,

    pub description: String,
}

impl Waypoint {
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: Option<f64>,
        name: String,
        description: String,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            name,
            description,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_validation() {
        let waypoint = Waypoint::new(
            45.07,
            6.70,
            Some(1200.0),
            "Grotta A".to_string(),
            String::new(),
        );

        assert!(waypoint.validate().is_ok());
        assert!(!waypoint.has_description());
    }

    #[test]
    fn test_invalid_coordinates() {
        let waypoint = Waypoint::new(
            91.0, // Invalid latitude
            6.70,
            None,
            "Grotta A".to_string(),
            String::new(),
        );

        assert!(waypoint.validate().is_err());
    }
}
