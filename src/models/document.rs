use serde::{Deserialize, Serialize};

use crate::models::Waypoint;

/// Ordered track geometry; always empty for converted cadastre data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub segments: Vec<TrackSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    /// (latitude, longitude, elevation)
    pub points: Vec<(f64, f64, Option<f64>)>,
}

impl Track {
    pub fn with_empty_segment() -> Self {
        Self {
            segments: vec![TrackSegment::default()],
        }
    }
}

/// Waypoints in input order plus track geometry, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub waypoints: Vec<Waypoint>,
    pub tracks: Vec<Track>,
}

impl OutputDocument {
    /// A fresh document holds one empty track with one empty segment.
    pub fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            tracks: vec![Track::with_empty_segment()],
        }
    }

    pub fn push_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}
