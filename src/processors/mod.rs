pub mod coordinate_transformer;
pub mod record_converter;

pub use coordinate_transformer::{transform, utm_proj_string, CoordinateTransformer};
pub use record_converter::{convert, RecordConverter};
