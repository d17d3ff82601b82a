/// Sentinel integer written into every SE1 file right after the three
/// banner lines. Used to detect on-disk endianness: if the raw 4 bytes
/// don't decode to this value in host order, they're byte-reversed.
pub const ENDIAN_SENTINEL: i32 = 0x0061_6263;

/// Body-id array switches from 2-byte to 4-byte entries once the
/// declared planet count exceeds this.
pub const MAX_SMALL_BODY_COUNT: u16 = 256;

/// Divisor applied to decoded coefficient magnitudes (`rmax / (2 * SCALE)`).
pub const COEFFICIENT_SCALE: f64 = 2.0e9;

/// Sine of the fixed J2000 mean obliquity used by the rotation back-transform.
pub const J2000_OBLIQUITY_SIN: f64 = 0.397_777_155_727_930_9;

/// Cosine of the fixed J2000 mean obliquity used by the rotation back-transform.
pub const J2000_OBLIQUITY_COS: f64 = 0.917_482_062_157_619_3;

/// Julian date of the J2000.0 reference epoch (2000-01-01 12:00 TT).
pub const J2000_EPOCH: f64 = 2_451_545.0;

/// Days per Julian century, used by the rotation back-transform's
/// `tdiff` term (`(t - telem) / 365250`).
pub const DAYS_PER_ROTATION_PERIOD: f64 = 365_250.0;
