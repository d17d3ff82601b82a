use crate::chebyshev;
use crate::parser::{header, rotation, segment};
use crate::reader::{ByteReader, Endian};
use ephem_core::{BodyFlags, BodyId, BodyRecord, BodySegmentCache, EphemerisError, Result};
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// An opened SE1 file: the full image, parsed body metadata, and a
/// per-body segment cache. Not `Sync` by convention — the caches use
/// interior mutability, so concurrent callers against one handle must
/// externally serialize (one handle per request, or a handle behind a
/// mutex).
pub struct EphemerisFile {
    data: Vec<u8>,
    endian: Endian,
    tfstart_file: f64,
    tfend_file: f64,
    bodies: HashMap<BodyId, BodyRecord>,
    caches: HashMap<BodyId, RefCell<BodySegmentCache>>,
}

impl EphemerisFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let parsed = {
            let mut reader = ByteReader::new(&data);
            header::parse_header(&mut reader)?
        };

        if parsed.endian == Endian::Big {
            warn!("SE1 file is big-endian; reading with byte-swapped field access");
        }

        let mut bodies = HashMap::with_capacity(parsed.bodies.len());
        let mut caches = HashMap::with_capacity(parsed.bodies.len());
        for body in parsed.bodies {
            caches.insert(body.body_id, RefCell::new(BodySegmentCache::default()));
            bodies.insert(body.body_id, body);
        }

        Ok(Self {
            data,
            endian: parsed.endian,
            tfstart_file: parsed.extent.tfstart_file,
            tfend_file: parsed.extent.tfend_file,
            bodies,
            caches,
        })
    }

    /// File-wide validity window, `(tfstart_file, tfend_file)`.
    pub fn validity(&self) -> (f64, f64) {
        (self.tfstart_file, self.tfend_file)
    }

    pub fn flags(&self, body: BodyId) -> Result<BodyFlags> {
        self.bodies
            .get(&body)
            .map(|b| b.flags)
            .ok_or(EphemerisError::UnknownBody { body_id: body.0 })
    }

    /// Rectangular coordinates for `body` at Julian date `jd`, decoding
    /// and (if flagged) rotating a fresh segment on a cache miss. The
    /// cache is only overwritten after a fully successful decode, so a
    /// failed re-decode leaves the previous segment intact.
    pub fn position(&self, body: BodyId, jd: f64) -> Result<[f64; 3]> {
        let record = self
            .bodies
            .get(&body)
            .ok_or(EphemerisError::UnknownBody { body_id: body.0 })?;
        let cache_cell = self.caches.get(&body).expect("cache created alongside body record");

        let needs_decode = {
            let cache = cache_cell.borrow();
            !cache.is_valid_for(jd)
        };

        if needs_decode {
            let mut reader = ByteReader::with_byte_order(&self.data, self.endian);
            let mut decoded = segment::locate_and_decode(&mut reader, record, jd)?;
            if record.flags.contains(BodyFlags::ROTATE) {
                rotation::rotate(record, &mut decoded.segp, decoded.tseg0);
            }
            let mut cache = cache_cell.borrow_mut();
            cache.segp = Some(decoded.segp);
            cache.tseg0 = decoded.tseg0;
            cache.tseg1 = decoded.tseg1;
        }

        let cache = cache_cell.borrow();
        let segp = cache.segp.as_ref().expect("cache populated above");
        let ncoe = record.ncoe as usize;
        let tau = 2.0 * (jd - cache.tseg0) / record.dseg - 1.0;

        let mut result = [0.0; 3];
        for (k, slot) in result.iter_mut().enumerate() {
            *slot = chebyshev::evaluate(&segp[k * ncoe..k * ncoe + ncoe], tau);
        }
        Ok(result)
    }
}
