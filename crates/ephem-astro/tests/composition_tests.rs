use ephem_core::{BodyFlags, BodyId};
use ephem_parser::EphemerisFile;

fn le(v: i32) -> [u8; 4] {
    v.to_le_bytes()
}

const RMAX: f64 = 2_000_000.0;
const SCALE: f64 = 1e-3;

// A single-coefficient (`ncoe = 1`) segment evaluates to half its coded
// coefficient, so encoding a desired position `value` packs `2*value`.
fn encode_class0(value: f64) -> u32 {
    let magnitude = ((2.0 * value.abs()) / SCALE).round() as u32;
    if value < 0.0 {
        magnitude * 2 - 1
    } else {
        magnitude * 2
    }
}

struct BodySpec {
    id: i32,
    flags: u8,
    triple: [f64; 3],
}

/// A one-segment, single-sample-per-body synthetic file: every body
/// shares the same validity window and has exactly one constant
/// (`ncoe = 1`) Chebyshev segment, enough to exercise position/geocentric
/// composition without needing a real `.se1` fixture.
fn build_file(bodies: &[BodySpec]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"banner one\r\n");
    data.extend_from_slice(b"banner two\r\n");
    data.extend_from_slice(b"banner three\r\n");
    data.extend_from_slice(&le(ephem_core::constants::ENDIAN_SENTINEL));
    data.extend_from_slice(&le(0));
    data.extend_from_slice(&le(406));
    data.extend_from_slice(&0.0_f64.to_le_bytes());
    data.extend_from_slice(&10.0_f64.to_le_bytes());
    data.extend_from_slice(&(bodies.len() as u16).to_le_bytes());
    for b in bodies {
        data.extend_from_slice(&(b.id as i16).to_le_bytes());
    }
    data.extend_from_slice(&le(0xDEAD_BEEFu32 as i32));
    for _ in 0..5 {
        data.extend_from_slice(&0.0_f64.to_le_bytes());
    }

    let mut index_positions = Vec::new();
    for b in bodies {
        index_positions.push(data.len());
        data.extend_from_slice(&le(0));
        data.push(b.flags);
        data.push(1);
        data.extend_from_slice(&le((RMAX * 1000.0) as i32));
        let doubles: [f64; 10] = [0.0, 10.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        for d in doubles {
            data.extend_from_slice(&d.to_le_bytes());
        }
    }

    for (b, index_pos) in bodies.iter().zip(index_positions) {
        let index_table_offset = data.len() as i32;
        data[index_pos..index_pos + 4].copy_from_slice(&index_table_offset.to_le_bytes());

        let table_start = data.len();
        data.extend_from_slice(&[0, 0, 0]);
        let segment_offset = table_start as i32 + 3;
        let bytes = segment_offset.to_le_bytes();
        data[table_start..table_start + 3].copy_from_slice(&bytes[..3]);

        for axis_value in b.triple {
            data.push(0x10);
            data.push(0x00);
            data.extend_from_slice(&encode_class0(axis_value).to_le_bytes());
        }
    }

    data
}

#[test]
fn geocentric_position_subtracts_earth_heliocentric_vector() {
    let earth = BodySpec {
        id: 0,
        flags: 0,
        triple: [1.0, 0.5, 0.0],
    };
    let mars = BodySpec {
        id: 4,
        flags: BodyFlags::HELIOCENTRIC.bits(),
        triple: [1.5, -0.3, 0.2],
    };
    let data = build_file(&[earth, mars]);
    let file = EphemerisFile::from_bytes(data).unwrap();

    let jd = 5.0;
    let earth_helio = file.position(BodyId::new(0), jd).unwrap();
    let mars_helio = file.position(BodyId::new(4), jd).unwrap();
    let mars_geo = ephem_astro::geocentric_position(&file, BodyId::new(4), jd).unwrap();

    for i in 0..3 {
        let expected = mars_helio[i] - earth_helio[i];
        assert!((mars_geo[i] - expected).abs() < 1e-9);
    }
}

#[test]
fn moon_geocentric_position_is_unchanged() {
    let moon = BodySpec {
        id: 1,
        flags: 0,
        triple: [0.002, 0.001, 0.0],
    };
    let data = build_file(&[moon]);
    let file = EphemerisFile::from_bytes(data).unwrap();
    let direct = file.position(BodyId::new(1), 5.0).unwrap();
    let geocentric = ephem_astro::geocentric_position(&file, BodyId::new(1), 5.0).unwrap();
    assert_eq!(direct, geocentric);
}

#[test]
fn sun_position_is_negated_earth_vector() {
    let earth = BodySpec {
        id: 0,
        flags: 0,
        triple: [1.0, 0.2, -0.1],
    };
    let data = build_file(&[earth]);
    let file = EphemerisFile::from_bytes(data).unwrap();
    let earth_helio = file.position(BodyId::new(0), 5.0).unwrap();
    let sun = ephem_astro::sun_position(&file, 5.0).unwrap();
    for i in 0..3 {
        assert!((sun[i] + earth_helio[i]).abs() < 1e-9);
    }
}
