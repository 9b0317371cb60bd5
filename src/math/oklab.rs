//! OKLab transforms and the sRGB gamut-boundary approximations that OKHSL is
//! built on (Björn Ottosson, <https://bottosson.github.io/posts/oklab/>).
//!
//! `a`/`b` arguments named `a_`/`b_` below are a unit hue vector
//! (`a_² + b_² = 1`).

#![allow(clippy::excessive_precision)]

/// Linear-light sRGB, unbounded (may be out of gamut).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Lightness/chroma point, used for the gamut cusp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cusp {
    pub l: f64,
    pub c: f64,
}

/// Chroma anchors for one lightness and hue: zero-saturation slope, mid
/// saturation and the gamut boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromaBounds {
    pub c_0: f64,
    pub c_mid: f64,
    pub c_max: f64,
}

// Rows of the LMS -> linear sRGB matrix; also used to find where a channel
// crosses 0 or 1.
const TO_R: [f64; 3] = [4.0767416621, -3.3077115913, 0.2309699292];
const TO_G: [f64; 3] = [-1.2684380046, 2.6097574011, -0.3413193965];
const TO_B: [f64; 3] = [-0.0041960863, -0.7034186147, 1.7076147010];

/// sRGB channel in [0, 1] -> linear light (IEC 61966-2-1 threshold).
pub fn srgb_transfer_inv(v: f64) -> f64 {
    if v > 0.04045 {
        ((v + 0.055) / 1.055).powf(2.4)
    } else {
        v / 12.92
    }
}

/// Linear light -> sRGB channel in [0, 1].
pub fn srgb_transfer(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

pub fn linear_srgb_to_oklab(c: LinearRgb) -> Lab {
    let l = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    Lab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

pub fn oklab_to_linear_srgb(c: Lab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let lms = [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_];

    LinearRgb {
        r: dot(TO_R, lms),
        g: dot(TO_G, lms),
        b: dot(TO_B, lms),
    }
}

#[inline]
fn dot(row: [f64; 3], v: [f64; 3]) -> f64 {
    row[0] * v[0] + row[1] * v[1] + row[2] * v[2]
}

/// Derivative of the cube-root LMS coordinates along a unit hue direction.
#[inline]
fn lms_hue_slope(a_: f64, b_: f64) -> [f64; 3] {
    [
        0.3963377774 * a_ + 0.2158037573 * b_,
        -0.1055613458 * a_ - 0.0638541728 * b_,
        -0.0894841775 * a_ - 1.2914855480 * b_,
    ]
}

/// Largest saturation `S = C / L` that stays inside sRGB for this hue.
///
/// A polynomial fit picks the starting point, then one Halley step refines it
/// on whichever channel leaves the gamut first.
pub fn compute_max_saturation(a_: f64, b_: f64) -> f64 {
    let (k, w) = if -1.88170328 * a_ - 0.80936493 * b_ > 1.0 {
        // red goes negative first
        ([1.19086277, 1.76576728, 0.59662641, 0.75515197, 0.56771245], TO_R)
    } else if 1.81444104 * a_ - 1.19445276 * b_ > 1.0 {
        // green
        ([0.73956515, -0.45954404, 0.08285427, 0.12541070, 0.14503204], TO_G)
    } else {
        // blue
        ([1.35733652, -0.00915799, -1.15130210, -0.50559606, 0.00692167], TO_B)
    };

    let mut sat = k[0] + k[1] * a_ + k[2] * b_ + k[3] * a_ * a_ + k[4] * a_ * b_;

    let [k_l, k_m, k_s] = lms_hue_slope(a_, b_);
    let l_ = 1.0 + sat * k_l;
    let m_ = 1.0 + sat * k_m;
    let s_ = 1.0 + sat * k_s;

    let lms = [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_];
    let lms_ds = [3.0 * k_l * l_ * l_, 3.0 * k_m * m_ * m_, 3.0 * k_s * s_ * s_];
    let lms_ds2 = [6.0 * k_l * k_l * l_, 6.0 * k_m * k_m * m_, 6.0 * k_s * k_s * s_];

    let f = dot(w, lms);
    let f1 = dot(w, lms_ds);
    let f2 = dot(w, lms_ds2);

    sat -= f * f1 / (f1 * f1 - 0.5 * f * f2);
    sat
}

/// Lightness and chroma of the most saturated in-gamut color of this hue.
pub fn find_cusp(a_: f64, b_: f64) -> Cusp {
    let s_cusp = compute_max_saturation(a_, b_);

    let rgb_at_max = oklab_to_linear_srgb(Lab {
        l: 1.0,
        a: s_cusp * a_,
        b: s_cusp * b_,
    });
    let l_cusp = (1.0 / rgb_at_max.r.max(rgb_at_max.g).max(rgb_at_max.b)).cbrt();

    Cusp {
        l: l_cusp,
        c: l_cusp * s_cusp,
    }
}

/// Parameter `t` where the line `L = l0 * (1 - t) + t * l1, C = t * c1`
/// meets the sRGB gamut boundary.
pub fn find_gamut_intersection(a_: f64, b_: f64, l1: f64, c1: f64, l0: f64, cusp: Cusp) -> f64 {
    if (l1 - l0) * cusp.c - (cusp.l - l0) * c1 <= 0.0 {
        // Below the cusp the boundary is the straight line to black.
        return cusp.c * l0 / (c1 * cusp.l + cusp.c * (l0 - l1));
    }

    // Above the cusp: intersect the triangle, then one Halley step against
    // the real (curved) boundary.
    let mut t = cusp.c * (l0 - 1.0) / (c1 * (cusp.l - 1.0) + cusp.c * (l0 - l1));

    let dl = l1 - l0;
    let dc = c1;
    let [k_l, k_m, k_s] = lms_hue_slope(a_, b_);

    let l_dt = dl + dc * k_l;
    let m_dt = dl + dc * k_m;
    let s_dt = dl + dc * k_s;

    let l = l0 * (1.0 - t) + t * l1;
    let c = t * c1;

    let l_ = l + c * k_l;
    let m_ = l + c * k_m;
    let s_ = l + c * k_s;

    let lms = [l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_];
    let lms_dt = [3.0 * l_dt * l_ * l_, 3.0 * m_dt * m_ * m_, 3.0 * s_dt * s_ * s_];
    let lms_dt2 = [6.0 * l_dt * l_dt * l_, 6.0 * m_dt * m_dt * m_, 6.0 * s_dt * s_dt * s_];

    let step = |row: [f64; 3]| {
        let f = dot(row, lms) - 1.0;
        let f1 = dot(row, lms_dt);
        let f2 = dot(row, lms_dt2);
        let u = f1 / (f1 * f1 - 0.5 * f * f2);
        if u >= 0.0 {
            -f * u
        } else {
            f64::MAX
        }
    };

    t += step(TO_R).min(step(TO_G)).min(step(TO_B));
    t
}

const TOE_K1: f64 = 0.206;
const TOE_K2: f64 = 0.03;
const TOE_K3: f64 = (1.0 + TOE_K1) / (1.0 + TOE_K2);

/// OKLab L -> OKHSL lightness (closer to CIELab L* near black).
pub fn toe(x: f64) -> f64 {
    let k = TOE_K3 * x - TOE_K1;
    0.5 * (k + (k * k + 4.0 * TOE_K2 * TOE_K3 * x).sqrt())
}

pub fn toe_inv(x: f64) -> f64 {
    (x * x + TOE_K1 * x) / (TOE_K3 * (x + TOE_K2))
}

/// Smooth fit of the cusp's `(S, T)` slopes, with `S_mid < S_max` and
/// `T_mid < T_max`.
fn st_mid(a_: f64, b_: f64) -> (f64, f64) {
    let s = 0.11516993
        + 1.0
            / (7.44778970
                + 4.15901240 * b_
                + a_ * (-2.19557347
                    + 1.75198401 * b_
                    + a_ * (-2.13704948 - 10.02301043 * b_
                        + a_ * (-4.24894561 + 5.38770819 * b_ + 4.69891013 * a_))));

    let t = 0.11239642
        + 1.0
            / (1.61320320 - 0.68124379 * b_
                + a_ * (0.40370612
                    + 0.90148123 * b_
                    + a_ * (-0.27087943
                        + 0.61223990 * b_
                        + a_ * (0.00299215 - 0.45399568 * b_ - 0.14661872 * a_))));

    (s, t)
}

/// Chroma anchors used to map OKHSL saturation to OKLab chroma at lightness
/// `l` (OKLab L, strictly between 0 and 1).
pub fn get_cs(l: f64, a_: f64, b_: f64) -> ChromaBounds {
    let cusp = find_cusp(a_, b_);

    let c_max = find_gamut_intersection(a_, b_, l, 1.0, l, cusp);
    let s_max = cusp.c / cusp.l;
    let t_max = cusp.c / (1.0 - cusp.l);

    // compensates for the curved upper half of the gamut
    let k = c_max / (l * s_max).min((1.0 - l) * t_max);

    let c_mid = {
        let (s_mid, t_mid) = st_mid(a_, b_);
        let c_a = l * s_mid;
        let c_b = (1.0 - l) * t_mid;
        // soft minimum
        0.9 * k * (1.0 / (1.0 / c_a.powi(4) + 1.0 / c_b.powi(4))).sqrt().sqrt()
    };

    let c_0 = {
        // hue independent
        let c_a = l * 0.4;
        let c_b = (1.0 - l) * 0.8;
        (1.0 / (1.0 / (c_a * c_a) + 1.0 / (c_b * c_b))).sqrt()
    };

    ChromaBounds { c_0, c_mid, c_max }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn transfer_roundtrip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            assert!(close(srgb_transfer(srgb_transfer_inv(v)), v, 1e-12));
        }
    }

    #[test]
    fn toe_roundtrip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            assert!(close(toe_inv(toe(v)), v, 1e-12), "{v}");
        }
    }

    #[test]
    fn toe_fixes_endpoints() {
        assert!(close(toe(0.0), 0.0, 1e-12));
        assert!(close(toe(1.0), 1.0, 1e-12));
    }

    #[test]
    fn white_is_l1_achromatic() {
        let lab = linear_srgb_to_oklab(LinearRgb { r: 1.0, g: 1.0, b: 1.0 });
        assert!(close(lab.l, 1.0, 1e-6));
        assert!(lab.a.abs() < 1e-6 && lab.b.abs() < 1e-6);
    }

    #[test]
    fn lab_roundtrip() {
        let rgb = LinearRgb { r: 0.2, g: 0.5, b: 0.8 };
        let back = oklab_to_linear_srgb(linear_srgb_to_oklab(rgb));
        assert!(close(back.r, rgb.r, 1e-6));
        assert!(close(back.g, rgb.g, 1e-6));
        assert!(close(back.b, rgb.b, 1e-6));
    }

    #[test]
    fn red_oklab_reference() {
        // Ottosson's reference: sRGB red = (0.627955, 0.224863, 0.125846)
        let lab = linear_srgb_to_oklab(LinearRgb { r: 1.0, g: 0.0, b: 0.0 });
        assert!(close(lab.l, 0.627955, 1e-4));
        assert!(close(lab.a, 0.224863, 1e-4));
        assert!(close(lab.b, 0.125846, 1e-4));
    }

    #[test]
    fn cusp_of_red_hue_is_pure_red() {
        let lab = linear_srgb_to_oklab(LinearRgb { r: 1.0, g: 0.0, b: 0.0 });
        let c = lab.a.hypot(lab.b);
        let cusp = find_cusp(lab.a / c, lab.b / c);
        assert!(close(cusp.l, lab.l, 1e-3), "{cusp:?}");
        assert!(close(cusp.c, c, 1e-3), "{cusp:?}");
    }

    #[test]
    fn chroma_bounds_are_ordered() {
        for i in 0..36 {
            let h = i as f64 / 36.0 * std::f64::consts::TAU;
            let (a_, b_) = (h.cos(), h.sin());
            for l in [0.1, 0.3, 0.5, 0.7, 0.9] {
                let cs = get_cs(l, a_, b_);
                assert!(cs.c_0 > 0.0, "{cs:?}");
                assert!(cs.c_mid < cs.c_max, "hue {i} l {l}: {cs:?}");
            }
        }
    }
}
