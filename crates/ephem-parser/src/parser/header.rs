use crate::reader::{ByteReader, Endian};
use ephem_core::constants::{ENDIAN_SENTINEL, MAX_SMALL_BODY_COUNT};
use ephem_core::models::FileExtent;
use ephem_core::{BodyFlags, BodyId, BodyRecord, EphemerisError, Result};

/// Everything the header's constant area yields: the file-wide validity
/// window, the negotiated byte order, and one [`BodyRecord`] per body, in
/// file order.
pub struct ParsedHeader {
    pub extent: FileExtent,
    pub endian: Endian,
    pub bodies: Vec<BodyRecord>,
}

/// Parse the SE1 constant area: three banner lines, the endianness
/// sentinel, file extent, body list, per-body metadata.
pub fn parse_header(reader: &mut ByteReader) -> Result<ParsedHeader> {
    // Step 1: three CRLF-terminated banner lines, discarded.
    for _ in 0..3 {
        reader.read_line().map_err(|_| EphemerisError::InvalidHeader {
            reason: "missing CRLF in banner line".to_string(),
        })?;
    }

    // Step 2: endianness sentinel.
    let endian = detect_byte_order(reader)?;
    reader.set_byte_order(endian);

    // Step 3-4: file length and ephemeris numbering, sanity-only.
    let _file_length = reader.read_int(4)?;
    let _ephemeris_number = reader.read_int(4)?;

    // Step 5: file validity window.
    let tfstart_file = reader.read_double()?;
    let tfend_file = reader.read_double()?;

    // Step 6: body list.
    let nplan_raw = (reader.read_short(2)? as u16) as u32;
    let (body_id_width, nplan) = if nplan_raw > MAX_SMALL_BODY_COUNT as u32 {
        (4usize, nplan_raw % 256)
    } else {
        (2usize, nplan_raw)
    };
    let body_ids: Vec<i32> = (0..nplan)
        .map(|_| reader.read_int(body_id_width))
        .collect::<Result<_>>()?;

    // Step 7: CRC, recorded not validated.
    let _crc = reader.read_int(4)?;

    // Step 8: 5 unused globals.
    let _globals = reader.read_double_array(5)?;

    // Step 9: per-body metadata, in the same order as `body_ids`.
    let mut bodies = Vec::with_capacity(body_ids.len());
    for raw_id in body_ids {
        let index_table_offset = reader.read_int(4)?;
        let flags = BodyFlags::from_bits_truncate(reader.read_i8()? as u8);
        let ncoe = reader.read_i8()? as u8;
        let rmax = reader.read_int(4)? as f64 / 1000.0;

        let tfstart = reader.read_double()?;
        let tfend = reader.read_double()?;
        let dseg = reader.read_double()?;
        let telem = reader.read_double()?;
        let prot = reader.read_double()?;
        let dprot = reader.read_double()?;
        let qrot = reader.read_double()?;
        let dqrot = reader.read_double()?;
        let peri = reader.read_double()?;
        let dperi = reader.read_double()?;

        let refep = if flags.contains(BodyFlags::ELLIPSE) {
            Some(reader.read_double_array(2 * ncoe as usize)?)
        } else {
            None
        };

        let body = BodyRecord {
            body_id: BodyId::new(raw_id),
            index_table_offset,
            flags,
            ncoe,
            rmax,
            tfstart,
            tfend,
            dseg,
            telem,
            prot,
            dprot,
            qrot,
            dqrot,
            peri,
            dperi,
            refep,
        };
        validate_body(&body, tfstart_file, tfend_file)?;
        bodies.push(body);
    }

    Ok(ParsedHeader {
        extent: FileExtent {
            tfstart_file,
            tfend_file,
        },
        endian,
        bodies,
    })
}

fn validate_body(body: &BodyRecord, tfstart_file: f64, tfend_file: f64) -> Result<()> {
    if body.ncoe == 0
        || body.dseg <= 0.0
        || body.tfstart > body.tfend
        || body.tfstart < tfstart_file
        || body.tfend > tfend_file
    {
        return Err(EphemerisError::InvalidHeader {
            reason: format!(
                "body {} fails validity invariants (ncoe={}, dseg={}, tfstart={}, tfend={})",
                body.body_id.0, body.ncoe, body.dseg, body.tfstart, body.tfend
            ),
        });
    }
    Ok(())
}

/// Read the 4-byte endianness sentinel and determine the file's on-disk
/// byte order: try the little-endian interpretation first, then the
/// big-endian one. A big-endian read of the raw bytes is equivalent to
/// a little-endian read of the byte-reversed bytes, so this single
/// check covers both a genuinely big-endian file and one whose bytes
/// have been swapped in transit.
fn detect_byte_order(reader: &mut ByteReader) -> Result<Endian> {
    let raw = reader.read_raw(4, 1)?;
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&raw);

    if i32::from_le_bytes(buf) == ENDIAN_SENTINEL {
        return Ok(Endian::Little);
    }
    if i32::from_be_bytes(buf) == ENDIAN_SENTINEL {
        return Ok(Endian::Big);
    }

    Err(EphemerisError::InvalidHeader {
        reason: "invalid endianness sentinel".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_bytes(v: i32) -> [u8; 4] {
        v.to_le_bytes()
    }

    fn build_minimal_header(nplan: u16, body_ids: &[i32]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"SE1 banner line one\r\n");
        data.extend_from_slice(b"SE1 banner line two\r\n");
        data.extend_from_slice(b"SE1 banner line three\r\n");
        data.extend_from_slice(&le_bytes(ENDIAN_SENTINEL));
        data.extend_from_slice(&le_bytes(data.len() as i32 + 4)); // file length (unused)
        data.extend_from_slice(&le_bytes(406)); // ephemeris number
        data.extend_from_slice(&2_414_000.0_f64.to_le_bytes()); // tfstart_file
        data.extend_from_slice(&2_488_000.0_f64.to_le_bytes()); // tfend_file
        data.extend_from_slice(&nplan.to_le_bytes());
        for id in body_ids {
            data.extend_from_slice(&(*id as i16).to_le_bytes());
        }
        data.extend_from_slice(&le_bytes(0xDEAD_BEEFu32 as i32)); // crc
        for _ in 0..5 {
            data.extend_from_slice(&0.0_f64.to_le_bytes());
        }
        for id in body_ids {
            data.extend_from_slice(&le_bytes(1000 + *id)); // index_table_offset
            data.push(0); // flags
            data.push(6); // ncoe
            data.extend_from_slice(&le_bytes(1_000_000)); // rmax*1000
            let doubles: [f64; 10] = [
                2_415_000.0,
                2_487_000.0,
                400.0,
                2_415_020.0,
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
                0.0,
            ];
            for d in doubles {
                data.extend_from_slice(&d.to_le_bytes());
            }
        }
        data
    }

    #[test]
    fn parses_minimal_header() {
        let data = build_minimal_header(2, &[0, 1]);
        let mut reader = ByteReader::new(&data);
        let parsed = parse_header(&mut reader).unwrap();

        assert_eq!(parsed.extent.tfstart_file, 2_414_000.0);
        assert_eq!(parsed.extent.tfend_file, 2_488_000.0);
        assert_eq!(parsed.bodies.len(), 2);
        assert_eq!(parsed.bodies[0].body_id, BodyId::new(0));
        assert_eq!(parsed.bodies[0].ncoe, 6);
        assert_eq!(parsed.bodies[0].rmax, 1000.0);
    }

    #[test]
    fn rejects_bad_sentinel() {
        let mut data = build_minimal_header(1, &[0]);
        // Corrupt the sentinel bytes (right after the three banner lines).
        let sentinel_pos = data.iter().position(|_| false).unwrap_or(0);
        let _ = sentinel_pos;
        let banner_len = b"SE1 banner line one\r\nSE1 banner line two\r\nSE1 banner line three\r\n".len();
        data[banner_len] = 0xFF;
        data[banner_len + 1] = 0xFF;
        let mut reader = ByteReader::new(&data);
        assert!(matches!(
            parse_header(&mut reader),
            Err(EphemerisError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn detects_big_endian_via_reversed_sentinel() {
        // Build the same minimal header but with every fixed-width field
        // (past the sentinel point) stored big-endian, and the sentinel's
        // 4 bytes in the big-endian layout of ENDIAN_SENTINEL.
        let mut data = Vec::new();
        data.extend_from_slice(b"SE1 banner line one\r\n");
        data.extend_from_slice(b"SE1 banner line two\r\n");
        data.extend_from_slice(b"SE1 banner line three\r\n");
        data.extend_from_slice(&ENDIAN_SENTINEL.to_be_bytes());
        data.extend_from_slice(&0i32.to_be_bytes());
        data.extend_from_slice(&406i32.to_be_bytes());
        data.extend_from_slice(&2_414_000.0_f64.to_be_bytes());
        data.extend_from_slice(&2_488_000.0_f64.to_be_bytes());
        data.extend_from_slice(&1u16.to_be_bytes());
        data.extend_from_slice(&0i16.to_be_bytes());
        data.extend_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
        for _ in 0..5 {
            data.extend_from_slice(&0.0_f64.to_be_bytes());
        }
        data.extend_from_slice(&1000i32.to_be_bytes());
        data.push(0);
        data.push(6);
        data.extend_from_slice(&1_000_000i32.to_be_bytes());
        let doubles: [f64; 10] = [
            2_415_000.0,
            2_487_000.0,
            400.0,
            2_415_020.0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
        ];
        for d in doubles {
            data.extend_from_slice(&d.to_be_bytes());
        }

        let mut reader = ByteReader::new(&data);
        let parsed = parse_header(&mut reader).unwrap();
        assert_eq!(parsed.endian, Endian::Big);
        assert_eq!(parsed.bodies[0].ncoe, 6);
        assert_eq!(parsed.bodies[0].tfstart, 2_415_000.0);
    }
}
