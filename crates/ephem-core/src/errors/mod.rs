use thiserror::Error;

#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("unknown body id {body_id}")]
    UnknownBody { body_id: i32 },

    #[error("jd {jd} outside validity range [{tfstart}, {tfend}] for this body")]
    OutOfRange { jd: f64, tfstart: f64, tfend: f64 },

    #[error("short read: requested {requested} bytes, but only {available} available")]
    ShortRead { requested: usize, available: usize },

    #[error("corrupt segment: {reason}")]
    CorruptSegment { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EphemerisError>;
