use bitflags::bitflags;

/// Small integer body identifier: Sun=0, Moon=1, Mercury=2, ..., Pluto=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyId(pub i32);

impl BodyId {
    pub const SUN: BodyId = BodyId(0);
    pub const MOON: BodyId = BodyId(1);

    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl From<i32> for BodyId {
    fn from(value: i32) -> Self {
        BodyId(value)
    }
}

bitflags! {
    /// Per-body hints carried alongside the Chebyshev coefficients.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BodyFlags: u8 {
        /// Coefficients describe motion relative to the Sun; caller must
        /// subtract the Earth heliocentric vector (body id 0) to obtain a
        /// geocentric vector.
        const HELIOCENTRIC = 0b0000_0001;
        /// Coefficients describe motion in the body's instantaneous
        /// orbital plane; the rotation back-transform must run before
        /// the coefficients are J2000-equatorial.
        const ROTATE = 0b0000_0010;
        /// An orbital-ellipse reference offset (`refep`) follows the
        /// per-body metadata and must be folded in during rotation.
        const ELLIPSE = 0b0000_0100;
    }
}

/// Immutable-after-parse per-body metadata, as laid out in the file header.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyRecord {
    pub body_id: BodyId,
    /// File position of the 3-byte packed segment-offset table, one entry
    /// per segment.
    pub index_table_offset: i32,
    pub flags: BodyFlags,
    /// Chebyshev order: segments carry `ncoe` coefficients per coordinate,
    /// three coordinates per segment.
    pub ncoe: u8,
    /// Decompression scale factor, in units matching the coordinate frame.
    pub rmax: f64,
    pub tfstart: f64,
    pub tfend: f64,
    /// Segment length in days.
    pub dseg: f64,
    /// Rotation reference epoch and rate constants.
    pub telem: f64,
    pub prot: f64,
    pub dprot: f64,
    pub qrot: f64,
    pub dqrot: f64,
    pub peri: f64,
    pub dperi: f64,
    /// Ellipse-center Chebyshev reference, `2 * ncoe` doubles, present iff
    /// `flags.contains(BodyFlags::ELLIPSE)`.
    pub refep: Option<Vec<f64>>,
}

impl BodyRecord {
    /// Number of Chebyshev segments spanning this body's validity window.
    pub fn segment_count(&self) -> usize {
        ((self.tfend - self.tfstart) / self.dseg).ceil() as usize
    }
}

/// Mutable per-body cache: the currently decoded (and, if flagged,
/// rotated) segment. Replaced lazily on a cache miss; absent until the
/// first successful decode.
#[derive(Debug, Clone, Default)]
pub struct BodySegmentCache {
    /// Decoded coefficients, length `3 * ncoe`, laid out
    /// `[x-coeffs | y-coeffs | z-coeffs]`.
    pub segp: Option<Vec<f64>>,
    pub tseg0: f64,
    pub tseg1: f64,
}

impl BodySegmentCache {
    pub fn is_valid_for(&self, jd: f64) -> bool {
        self.segp.is_some() && jd >= self.tseg0 && jd <= self.tseg1
    }
}
