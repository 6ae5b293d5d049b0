pub mod types;

pub use types::{FacultyRecord, TARGET_ID};
