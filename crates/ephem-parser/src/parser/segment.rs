use crate::reader::ByteReader;
use ephem_core::constants::COEFFICIENT_SCALE;
use ephem_core::{BodyRecord, EphemerisError, Result};
use log::debug;

/// One decoded, not-yet-evaluated Chebyshev segment: `3*ncoe` coefficients
/// laid out `[x-coeffs | y-coeffs | z-coeffs]`, plus the time window it
/// covers.
pub struct DecodedSegment {
    pub segp: Vec<f64>,
    pub tseg0: f64,
    pub tseg1: f64,
}

/// Locate the segment covering `jd` for `body` and decompress its three
/// coordinate coefficient arrays. Bounds are checked before any read, so
/// an out-of-range `jd` never touches the index table.
pub fn locate_and_decode(reader: &mut ByteReader, body: &BodyRecord, jd: f64) -> Result<DecodedSegment> {
    if jd < body.tfstart || jd > body.tfend {
        return Err(EphemerisError::OutOfRange {
            jd,
            tfstart: body.tfstart,
            tfend: body.tfend,
        });
    }

    let last_seg = body.segment_count() - 1;
    let iseg = (((jd - body.tfstart) / body.dseg).floor() as usize).min(last_seg);
    let tseg0 = body.tfstart + iseg as f64 * body.dseg;
    let tseg1 = tseg0 + body.dseg;

    let index_pos = body.index_table_offset as usize + iseg * 3;
    reader.seek(index_pos)?;
    let segment_offset = reader.read_int(3)?;
    reader.seek(segment_offset as usize)?;

    debug!(
        "body {} iseg {} -> segment offset {}",
        body.body_id.0, iseg, segment_offset
    );

    let mut segp = Vec::with_capacity(3 * body.ncoe as usize);
    for _ in 0..3 {
        let coords = decode_coordinate(reader, body.ncoe as usize, body.rmax)?;
        segp.extend(coords);
    }

    Ok(DecodedSegment { segp, tseg0, tseg1 })
}

/// Read one coordinate's packed coefficient stream: a 2- or 4-byte header
/// of 4-bit precision-class counts, followed by the coefficients
/// themselves, decoded class by class.
fn decode_coordinate(reader: &mut ByteReader, ncoe: usize, rmax: f64) -> Result<Vec<f64>> {
    let c0 = reader.read_u8()?;
    let c1 = reader.read_u8()?;

    let nsize: [u8; 6] = if c0 & 0x80 != 0 {
        let extra0 = reader.read_u8()?;
        let extra1 = reader.read_u8()?;
        [
            c1 >> 4,
            c1 & 0x0F,
            extra0 >> 4,
            extra0 & 0x0F,
            extra1 >> 4,
            extra1 & 0x0F,
        ]
    } else {
        [c0 >> 4, c0 & 0x0F, c1 >> 4, c1 & 0x0F, 0, 0]
    };

    let mut coeffs = Vec::with_capacity(ncoe);

    // Classes 0-3: big-integer codes, width (4-i) bytes, sign bit is the LSB.
    for (class, &count) in nsize.iter().enumerate().take(4) {
        let width = 4 - class;
        for _ in 0..count {
            let code = read_packed_uint(reader, width)?;
            coeffs.push(decode_value(code, 1, rmax));
        }
    }

    // Class 4: two 4-bit subfields per byte, high nibble first.
    let n4 = nsize[4] as usize;
    let bytes4 = (n4 + 1) / 2;
    let mut produced = 0;
    for _ in 0..bytes4 {
        let byte = reader.read_u8()?;
        for shift in [4u32, 0u32] {
            if produced == n4 {
                break;
            }
            let field = ((byte >> shift) & 0x0F) as u32;
            coeffs.push(decode_value(field, 0x8, rmax));
            produced += 1;
        }
    }

    // Class 5: four 2-bit subfields per byte, highest pair first.
    let n5 = nsize[5] as usize;
    let bytes5 = (n5 + 3) / 4;
    let mut produced = 0;
    for _ in 0..bytes5 {
        let byte = reader.read_u8()?;
        for shift in [6u32, 4, 2, 0] {
            if produced == n5 {
                break;
            }
            let field = ((byte >> shift) & 0x03) as u32;
            coeffs.push(decode_value(field, 0x2, rmax));
            produced += 1;
        }
    }

    if coeffs.len() != ncoe {
        return Err(EphemerisError::CorruptSegment {
            reason: format!(
                "decoded {} coefficients, expected {}",
                coeffs.len(),
                ncoe
            ),
        });
    }

    Ok(coeffs)
}

/// Read `width` raw bytes and assemble them as a little-endian unsigned
/// integer. Packed coefficient codes are always little-endian regardless
/// of the file's negotiated header byte order.
fn read_packed_uint(reader: &mut ByteReader, width: usize) -> Result<u32> {
    let raw = reader.read_raw(width, 1)?;
    let mut value: u32 = 0;
    for (i, byte) in raw.iter().enumerate() {
        value |= (*byte as u32) << (8 * i);
    }
    Ok(value)
}

/// Split a packed code into sign and magnitude using `sign_mask` as the
/// subfield's own top bit, then scale by `rmax / (2 * 1e9)`.
fn decode_value(code: u32, sign_mask: u32, rmax: f64) -> f64 {
    let (negative, magnitude) = if code & sign_mask != 0 {
        (true, (code + sign_mask) >> 1)
    } else {
        (false, code >> 1)
    };
    let scaled = magnitude as f64 * rmax / COEFFICIENT_SCALE;
    if negative {
        -scaled
    } else {
        scaled
    }
}
