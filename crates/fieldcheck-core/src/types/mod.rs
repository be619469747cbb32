pub mod field;
pub mod label;
pub mod report;

pub use field::TrackedField;
pub use label::{CoarseLabel, QualityTag};
pub use report::{BugReport, FieldTags, Labeling};
