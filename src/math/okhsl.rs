//! sRGB <-> OKHSL.
//!
//! OKHSL keeps OKLab's perceptual hue, remaps OKLab lightness through a toe
//! curve, and scales chroma so that saturation 1 lands on the sRGB gamut
//! boundary for every hue and lightness. Lightness 0 and 1 are black and
//! white whatever the hue and saturation.

use std::f64::consts::PI;

use super::oklab::{
    get_cs, linear_srgb_to_oklab, oklab_to_linear_srgb, srgb_transfer, srgb_transfer_inv, toe,
    toe_inv, ChromaBounds, Lab, LinearRgb,
};
use super::{Okhsl, Srgb};

/// OKLab chroma below this is treated as gray.
const ACHROMATIC_CHROMA: f64 = 1e-6;

// Saturation where the piecewise chroma mapping switches from the c_0/c_mid
// segment to the c_mid/c_max segment.
const MID: f64 = 0.8;
const MID_INV: f64 = 1.25;

/// Convert 8-bit sRGB to OKHSL.
///
/// Grays (including black and white) have no hue; they come back with
/// `h = 0` and `s = 0`. Callers that want hue continuity across a gray must
/// keep their previous hue themselves.
pub fn from_srgb(color: Srgb) -> Okhsl {
    let lab = linear_srgb_to_oklab(LinearRgb {
        r: srgb_transfer_inv(color.r as f64 / 255.0),
        g: srgb_transfer_inv(color.g as f64 / 255.0),
        b: srgb_transfer_inv(color.b as f64 / 255.0),
    });

    let c = lab.a.hypot(lab.b);
    if c < ACHROMATIC_CHROMA || lab.l <= 0.0 || lab.l >= 1.0 {
        return Okhsl::new(0.0, 0.0, toe(lab.l.max(0.0)).clamp(0.0, 1.0));
    }

    let a_ = lab.a / c;
    let b_ = lab.b / c;

    let h = 0.5 + 0.5 * (-lab.b).atan2(-lab.a) / PI;
    let ChromaBounds { c_0, c_mid, c_max } = get_cs(lab.l, a_, b_);

    // Inverse of the interpolation in to_srgb
    let s = if c < c_mid {
        let k_1 = MID * c_0;
        let k_2 = 1.0 - k_1 / c_mid;
        let t = c / (k_1 + k_2 * c);
        t * MID
    } else {
        let k_0 = c_mid;
        let k_1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
        let k_2 = 1.0 - k_1 / (c_max - c_mid);
        let t = (c - k_0) / (k_1 + k_2 * (c - k_0));
        MID + (1.0 - MID) * t
    };

    Okhsl::new(h.rem_euclid(1.0), s.max(0.0), toe(lab.l))
}

/// Convert OKHSL to 8-bit sRGB.
///
/// Channels that overshoot [0, 1] near the gamut boundary are clamped, and a
/// NaN channel becomes 0, so the result is always a valid color.
pub fn to_srgb(hsl: Okhsl) -> Srgb {
    let Okhsl { h, s, l } = hsl;

    if l >= 1.0 {
        return Srgb::WHITE;
    }
    if l.is_nan() || l <= 0.0 {
        return Srgb::BLACK;
    }
    let s = if s.is_nan() { 0.0 } else { s.max(0.0) };

    let a_ = (2.0 * PI * h).cos();
    let b_ = (2.0 * PI * h).sin();
    let lab_l = toe_inv(l);

    let c = if s == 0.0 {
        0.0
    } else {
        let ChromaBounds { c_0, c_mid, c_max } = get_cs(lab_l, a_, b_);
        if s < MID {
            let t = MID_INV * s;
            let k_1 = MID * c_0;
            let k_2 = 1.0 - k_1 / c_mid;
            t * k_1 / (1.0 - k_2 * t)
        } else {
            let t = (s - MID) / (1.0 - MID);
            let k_0 = c_mid;
            let k_1 = (1.0 - MID) * c_mid * c_mid * MID_INV * MID_INV / c_0;
            let k_2 = 1.0 - k_1 / (c_max - c_mid);
            k_0 + t * k_1 / (1.0 - k_2 * t)
        }
    };

    let rgb = oklab_to_linear_srgb(Lab {
        l: lab_l,
        a: c * a_,
        b: c * b_,
    });

    Srgb {
        r: to_channel(rgb.r),
        g: to_channel(rgb.g),
        b: to_channel(rgb.b),
    }
}

fn to_channel(linear: f64) -> u8 {
    let v = srgb_transfer(linear) * 255.0;
    if v.is_nan() {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "okhsl", "NaN channel mapped to 0");
        return 0;
    }
    #[cfg(feature = "tracing")]
    {
        if !(-0.5..=255.5).contains(&v) {
            tracing::trace!(target: "okhsl", value = v, "channel clamped to sRGB gamut");
        }
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn max_channel_diff(a: Srgb, b: Srgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn black_is_lightness_0() {
        let hsl = from_srgb(Srgb::BLACK);
        assert_eq!(hsl, Okhsl::new(0.0, 0.0, 0.0));
        assert_eq!(to_srgb(hsl), Srgb::BLACK);
    }

    #[test]
    fn white_is_lightness_1() {
        let hsl = from_srgb(Srgb::WHITE);
        assert_eq!(hsl.s, 0.0);
        assert!(close(hsl.l, 1.0, 1e-6), "{hsl:?}");
        assert_eq!(to_srgb(hsl), Srgb::WHITE);
    }

    #[test]
    fn lightness_extremes_ignore_hue_and_saturation() {
        for h in [0.0, 0.25, 0.5, 0.75] {
            for s in [0.0, 0.5, 1.0] {
                assert_eq!(to_srgb(Okhsl::new(h, s, 0.0)), Srgb::BLACK);
                assert_eq!(to_srgb(Okhsl::new(h, s, 1.0)), Srgb::WHITE);
            }
        }
    }

    #[test]
    fn grays_have_zero_saturation_and_hue() {
        for v in 0..=255u8 {
            let hsl = from_srgb(Srgb::new(v, v, v));
            assert_eq!(hsl.s, 0.0, "gray {v}: {hsl:?}");
            assert_eq!(hsl.h, 0.0, "gray {v}: {hsl:?}");
        }
    }

    #[test]
    fn mid_gray_reference() {
        // #777777 sits at OKHSL lightness ~0.5005
        let hsl = from_srgb(Srgb::new(0x77, 0x77, 0x77));
        assert!(close(hsl.l, 0.5005, 1e-3), "{hsl:?}");
        assert_eq!(to_srgb(Okhsl::new(0.0, 0.0, 0.5)), Srgb::new(119, 119, 119));
    }

    #[test]
    fn primaries_are_fully_saturated() {
        for c in [
            Srgb::new(255, 0, 0),
            Srgb::new(0, 255, 0),
            Srgb::new(0, 0, 255),
            Srgb::new(255, 255, 0),
            Srgb::new(0, 255, 255),
            Srgb::new(255, 0, 255),
        ] {
            let hsl = from_srgb(c);
            assert!(close(hsl.s, 1.0, 1e-3), "{c:?}: {hsl:?}");
        }
    }

    #[test]
    fn red_reference() {
        // okhsl(29.2deg, 100%, 56.8%) per Ottosson's color picker
        let hsl = from_srgb(Srgb::new(255, 0, 0));
        assert!(close(hsl.h, 0.0812, 1e-3), "{hsl:?}");
        assert!(close(hsl.l, 0.5681, 1e-3), "{hsl:?}");
    }

    #[test]
    fn hue_is_in_unit_range() {
        for c in [Srgb::new(0, 0, 255), Srgb::new(255, 0, 128), Srgb::new(10, 200, 30)] {
            let hsl = from_srgb(c);
            assert!((0.0..1.0).contains(&hsl.h), "{c:?}: {hsl:?}");
        }
    }

    #[test]
    fn roundtrip_sampled_cube() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let c = Srgb::new(r, g, b);
                    let back = to_srgb(from_srgb(c));
                    assert!(max_channel_diff(c, back) <= 1, "{c:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn roundtrip_deep_blues_near_gamut_edge() {
        // saturation slightly above 1 here; it must survive the round trip
        for c in [
            Srgb::new(0, 12, 87),
            Srgb::new(0, 21, 120),
            Srgb::new(0, 0, 1),
            Srgb::new(255, 239, 152),
        ] {
            let back = to_srgb(from_srgb(c));
            assert!(max_channel_diff(c, back) <= 1, "{c:?} -> {back:?}");
        }
    }

    #[test]
    fn lightness_edit_moves_luminance_monotonically() {
        let base = from_srgb(Srgb::new(0x33, 0x66, 0x99));
        let mut prev = -1.0;
        for step in 0..=100 {
            let rgb = to_srgb(base.with_lightness(step as f64 / 100.0));
            let lum = crate::math::wcag::relative_luminance(rgb);
            assert!(lum >= prev - 1e-3, "step {step}: {lum} < {prev}");
            prev = lum;
        }
    }

    #[test]
    fn lightness_edit_reference_values() {
        let base = from_srgb(Srgb::new(0x33, 0x66, 0x99));
        assert_eq!(to_srgb(base.with_lightness(0.25)), Srgb::new(26, 60, 93));
        assert_eq!(to_srgb(base.with_lightness(0.75)), Srgb::new(147, 189, 235));
    }

    #[test]
    fn out_of_range_inputs_do_not_panic() {
        for hsl in [
            Okhsl::new(f64::NAN, 0.5, 0.5),
            Okhsl::new(0.3, f64::NAN, 0.5),
            Okhsl::new(0.3, 0.5, f64::NAN),
            Okhsl::new(-3.7, 1.0, 0.5),
            Okhsl::new(0.6, 4.0, 0.5),
            Okhsl::new(0.6, -1.0, 0.5),
            Okhsl::new(0.6, 1.0, 7.0),
        ] {
            let _ = to_srgb(hsl);
        }
        assert_eq!(to_srgb(Okhsl::new(0.3, 0.5, f64::NAN)), Srgb::BLACK);
    }
}
