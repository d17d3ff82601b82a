pub mod body;
pub mod file;

pub use body::{BodyFlags, BodyId, BodyRecord, BodySegmentCache};
pub use file::FileExtent;
