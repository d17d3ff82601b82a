pub mod constants;
pub mod errors;
pub mod models;

// Re-export commonly used items
pub use errors::{EphemerisError, Result};
pub use models::{BodyFlags, BodyId, BodyRecord, BodySegmentCache, FileExtent};
