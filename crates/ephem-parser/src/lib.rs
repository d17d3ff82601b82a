pub mod chebyshev;
pub mod parser;
pub mod position;
pub mod reader;

pub use ephem_core::{BodyFlags, BodyId, EphemerisError, Result};
pub use position::EphemerisFile;
