pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{clean_cell, parse_number, validate_wgs84};
pub use filename::default_output_path;
pub use progress::ProgressReporter;
