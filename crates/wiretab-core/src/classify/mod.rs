pub mod calibration;
pub mod engine;
pub mod outcome;

pub use calibration::Calibration;
pub use engine::classify_row;
pub use outcome::{Assignment, FieldSlots, RowClassification, Stage};
