use crate::error::{ProcessingError, Result};
use crate::models::{OutputDocument, Waypoint};
use crate::utils::constants::DEFAULT_CREATOR;
use geo_types::Point;
use gpx::{Gpx, GpxVersion};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Serializes an [`OutputDocument`] as GPX 1.1.
pub struct GpxWriter {
    creator: String,
}

impl GpxWriter {
    pub fn new() -> Self {
        Self {
            creator: DEFAULT_CREATOR.to_string(),
        }
    }

    pub fn with_creator(mut self, creator: &str) -> Self {
        self.creator = creator.to_string();
        self
    }

    /// Build the `gpx` crate model: tracks first, then waypoints in document order.
    pub fn to_gpx(&self, document: &OutputDocument) -> Gpx {
        let mut gpx = Gpx {
            version: GpxVersion::Gpx11,
            creator: Some(self.creator.clone()),
            ..Default::default()
        };

        for track in &document.tracks {
            let mut gpx_track = gpx::Track::default();
            for segment in &track.segments {
                let mut gpx_segment = gpx::TrackSegment::default();
                for &(lat, lon, ele) in &segment.points {
                    let mut point = gpx::Waypoint::new(Point::new(lon, lat));
                    point.elevation = ele;
                    gpx_segment.points.push(point);
                }
                gpx_track.segments.push(gpx_segment);
            }
            gpx.tracks.push(gpx_track);
        }

        gpx.waypoints = document.waypoints.iter().map(to_gpx_waypoint).collect();
        gpx
    }

    pub fn write<W: Write>(&self, document: &OutputDocument, writer: W) -> Result<()> {
        gpx::write(&self.to_gpx(document), writer)?;
        Ok(())
    }

    pub fn to_string(&self, document: &OutputDocument) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(document, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ProcessingError::InvalidFormat(format!("GPX output is not UTF-8: {}", e)))
    }

    pub fn write_to_path(&self, document: &OutputDocument, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(document, &mut writer)?;
        writer.flush()?;

        debug!(
            path = %path.display(),
            waypoints = document.waypoints.len(),
            "wrote GPX file"
        );
        Ok(())
    }
}

impl Default for GpxWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn to_gpx_waypoint(waypoint: &Waypoint) -> gpx::Waypoint {
    let mut wpt = gpx::Waypoint::new(Point::new(waypoint.longitude, waypoint.latitude));
    wpt.elevation = waypoint.elevation;
    wpt.name = Some(waypoint.name.clone());
    if waypoint.has_description() {
        wpt.description = Some(waypoint.description.clone());
    }
    wpt
}
