//! Astronomical helpers built on top of `ephem-parser`: Julian-day
//! conversion, Lahiri ayanamsha, mean obliquity/GMST/lunar node, the
//! ecliptic-longitude projection, and heliocentric-to-geocentric
//! composition. Stops at sidereal longitude; zodiac/nakshatra/dasha and
//! house computation are a downstream concern.

use ephem_core::{BodyId, Result};
use ephem_parser::{BodyFlags, EphemerisFile};

/// Julian date from a Gregorian calendar UTC timestamp.
pub fn julian_day_utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = y / 100;
    let b = 2 - a + a / 4;
    let jd0 = (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + b as f64
        - 1524.5;
    let day_fraction = hour as f64 / 24.0 + minute as f64 / 1440.0 + second / 86400.0;
    jd0 + day_fraction
}

/// Lahiri ayanamsha in degrees, as a polynomial in Julian centuries since
/// 1900.0 (`jd` = 2415020.0).
pub fn lahiri_ayanamsha(jd: f64) -> f64 {
    let t = (jd - 2_415_020.0) / 36525.0;
    22.460 + 1.396 * t + 0.000_309 * t * t
}

/// Mean obliquity of the ecliptic, in degrees (Meeus 22.2, truncated to
/// the cubic term).
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36525.0;
    let arcsec = 84_381.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    arcsec / 3600.0
}

/// Greenwich mean sidereal time, in degrees, normalized to `[0, 360)`.
pub fn gmst(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36525.0;
    let deg = 280.460_618_37
        + 360.985_647_366_29 * (jd - 2_451_545.0)
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(deg)
}

/// Mean longitude of the Moon's ascending node, in degrees (Meeus 47.7).
pub fn mean_lunar_node(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36525.0;
    let deg = 125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t * t + t * t * t / 450_000.0;
    normalize_degrees(deg)
}

/// Project a rectangular position onto the ecliptic and return its
/// longitude in degrees, normalized to `[0, 360)`.
pub fn ecliptic_longitude(v: [f64; 3], obliquity_deg: f64) -> f64 {
    let eps = obliquity_deg.to_radians();
    let lambda = (v[1] * eps.cos() + v[2] * eps.sin()).atan2(v[0]);
    normalize_degrees(lambda.to_degrees())
}

/// The Sun's geocentric position: the file stores Earth's heliocentric
/// position under body id 0, so the Sun's geocentric vector is its
/// negation.
pub fn sun_position(file: &EphemerisFile, jd: f64) -> Result<[f64; 3]> {
    let earth = file.position(BodyId::SUN, jd)?;
    Ok([-earth[0], -earth[1], -earth[2]])
}

/// Geocentric position of `body`: subtracts Earth's heliocentric vector
/// (body id 0) from a heliocentric-flagged body's vector, or returns the
/// vector unchanged when the body is already geocentric (the Moon).
pub fn geocentric_position(file: &EphemerisFile, body: BodyId, jd: f64) -> Result<[f64; 3]> {
    let flags = file.flags(body)?;
    let vector = file.position(body, jd)?;
    if !flags.contains(BodyFlags::HELIOCENTRIC) {
        return Ok(vector);
    }
    let earth = file.position(BodyId::SUN, jd)?;
    Ok([
        vector[0] - earth[0],
        vector[1] - earth[1],
        vector[2] - earth[2],
    ])
}

/// Sidereal longitude: tropical longitude minus the Lahiri ayanamsha,
/// normalized to `[0, 360)`.
pub fn sidereal_longitude(tropical_longitude_deg: f64, jd: f64) -> f64 {
    normalize_degrees(tropical_longitude_deg - lahiri_ayanamsha(jd))
}

fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Convenience wrapper combining a heliocentric/geocentric lookup with the
/// ecliptic-longitude projection, so callers don't have to know which
/// bodies need the helio→geo subtraction.
pub fn body_sidereal_longitude(file: &EphemerisFile, body: BodyId, jd: f64) -> Result<f64> {
    if body == BodyId::SUN {
        let v = sun_position(file, jd)?;
        let eps = mean_obliquity(jd);
        return Ok(sidereal_longitude(ecliptic_longitude(v, eps), jd));
    }
    let v = geocentric_position(file, body, jd)?;
    let eps = mean_obliquity(jd);
    Ok(sidereal_longitude(ecliptic_longitude(v, eps), jd))
}
