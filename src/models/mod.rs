pub mod document;
pub mod record;
pub mod stats;
pub mod waypoint;
pub mod zone;

pub use document::{OutputDocument, Track, TrackSegment};
pub use record::InputRecord;
pub use stats::{ConversionOutcome, ConversionStats, RowDiagnostic, SkipReason};
pub use waypoint::Waypoint;
pub use zone::{Hemisphere, ZoneSpec};
