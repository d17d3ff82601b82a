use ephem_core::constants::{DAYS_PER_ROTATION_PERIOD, J2000_OBLIQUITY_COS, J2000_OBLIQUITY_SIN};
use ephem_core::{BodyFlags, BodyId, BodyRecord};
use std::f64::consts::TAU;

/// Rotate a decoded segment's coefficient triples from the body's
/// instantaneous orbital plane into J2000 equatorial axes, in place.
///
/// Rotation acts on the Chebyshev coefficients themselves, not the
/// evaluated vector — linearity makes the two equivalent, and it means
/// the cache always holds a ready-to-evaluate J2000 representation.
pub fn rotate(body: &BodyRecord, segp: &mut [f64], tseg0: f64) {
    let ncoe = body.ncoe as usize;
    debug_assert_eq!(segp.len(), 3 * ncoe);

    let t = tseg0 + body.dseg / 2.0;
    let tdiff = (t - body.telem) / DAYS_PER_ROTATION_PERIOD;

    let (qav, pav) = if body.body_id == BodyId::MOON {
        let dn = (body.prot + tdiff * body.dprot).rem_euclid(TAU);
        let qav = (body.qrot + tdiff * body.dqrot) * dn.cos();
        let pav = (body.qrot + tdiff * body.dqrot) * dn.sin();
        (qav, pav)
    } else {
        let qav = body.qrot + tdiff * body.dqrot;
        let pav = body.prot + tdiff * body.dprot;
        (qav, pav)
    };

    if body.flags.contains(BodyFlags::ELLIPSE) {
        if let Some(refep) = &body.refep {
            let omtild = (body.peri + tdiff * body.dperi).rem_euclid(TAU);
            let c = omtild.cos();
            let s = omtild.sin();
            for i in 0..ncoe {
                let x = segp[i];
                let y = segp[i + ncoe];
                segp[i] = x + c * refep[i] - s * refep[i + ncoe];
                segp[i + ncoe] = y + c * refep[i + ncoe] + s * refep[i];
            }
        }
    }

    let h = 1.0 / (1.0 + qav * qav + pav * pav);
    let uiz = [2.0 * pav * h, -2.0 * qav * h, (1.0 - qav * qav - pav * pav) * h];
    let uiy_raw = [-uiz[1], uiz[0], 0.0];
    let uiz_hat = normalize(uiz);
    let uiy_hat = normalize(uiy_raw);
    let uix_hat = cross(uiy_hat, uiz_hat);

    for i in 0..ncoe {
        let x_bar = [segp[i], segp[i + ncoe], segp[i + 2 * ncoe]];
        let xr = dot(uix_hat, x_bar);
        let yr = dot(uiy_hat, x_bar);
        let zr = dot(uiz_hat, x_bar);

        let y2 = J2000_OBLIQUITY_COS * yr + J2000_OBLIQUITY_SIN * zr;
        let z2 = -J2000_OBLIQUITY_SIN * yr + J2000_OBLIQUITY_COS * zr;

        segp[i] = xr;
        segp[i + ncoe] = y2;
        segp[i + 2 * ncoe] = z2;
    }
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if norm == 0.0 {
        v
    } else {
        [v[0] / norm, v[1] / norm, v[2] / norm]
    }
}
