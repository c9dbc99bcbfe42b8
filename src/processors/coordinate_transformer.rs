use crate::error::{ProcessingError, Result};
use crate::models::ZoneSpec;
use crate::utils::constants::EPSG_WGS84;
use crate::utils::coordinates::validate_wgs84;
use proj4rs::Proj;
use std::fmt;

const WGS84_GEOGRAPHIC: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// UTM (WGS84 datum) to WGS84 latitude/longitude for one zone.
///
/// The projection pair is built once and reused for every point of a batch.
pub struct CoordinateTransformer {
    zone: ZoneSpec,
    utm: Proj,
    wgs84: Proj,
}

impl CoordinateTransformer {
    pub fn new(zone: ZoneSpec) -> Result<Self> {
        let utm = Proj::from_proj_string(&utm_proj_string(&zone)).map_err(|e| {
            ProcessingError::Transform(format!(
                "Failed to create projection for {}: {:?}",
                zone.epsg_id(),
                e
            ))
        })?;

        let wgs84 = Proj::from_proj_string(WGS84_GEOGRAPHIC).map_err(|e| {
            ProcessingError::Transform(format!("Failed to create WGS84 projection: {:?}", e))
        })?;

        Ok(Self { zone, utm, wgs84 })
    }

    /// Project `(easting, northing)` and return `(latitude, longitude)` in degrees.
    pub fn transform_point(&self, easting: f64, northing: f64) -> Result<(f64, f64)> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(ProcessingError::Transform(format!(
                "Non-finite input coordinates ({}, {})",
                easting, northing
            )));
        }

        // proj4rs works in (x, y, z); geographic output is in radians
        let mut point = (easting, northing, 0.0);
        proj4rs::transform::transform(&self.utm, &self.wgs84, &mut point).map_err(|e| {
            ProcessingError::Transform(format!(
                "{} ({}, {}) -> EPSG:{}: {:?}",
                self.zone.epsg_id(),
                easting,
                northing,
                EPSG_WGS84,
                e
            ))
        })?;

        let longitude = point.0.to_degrees();
        let latitude = point.1.to_degrees();

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ProcessingError::Transform(format!(
                "Projection of ({}, {}) in {} produced no result",
                easting,
                northing,
                self.zone.epsg_id()
            )));
        }
        validate_wgs84(latitude, longitude)?;

        Ok((latitude, longitude))
    }
}

impl fmt::Debug for CoordinateTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinateTransformer")
            .field("zone", &self.zone)
            .field("source", &self.zone.epsg_id())
            .finish()
    }
}

/// PROJ definition equivalent to EPSG:326NN / EPSG:327NN.
pub fn utm_proj_string(zone: &ZoneSpec) -> String {
    let mut definition = format!("+proj=utm +zone={}", zone.number);
    if zone.is_south() {
        definition.push_str(" +south");
    }
    definition.push_str(" +datum=WGS84 +units=m +no_defs");
    definition
}

/// One-shot conversion of a single point.
pub fn transform(easting: f64, northing: f64, zone: ZoneSpec) -> Result<(f64, f64)> {
    CoordinateTransformer::new(zone)?.transform_point(easting, northing)
}
