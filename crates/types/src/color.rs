//! HSL color value with RGB/hex derivation and a distance metric.
//!
//! Construction normalizes the hue onto the [0, 360) circle and clamps
//! saturation/lightness into [0, 100], so every conversion downstream
//! is a total function. The RGB triple and hex string are never stored;
//! they are recomputed from the three HSL fields on each call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight of the circular hue difference in [`HslColor::distance`].
/// Hue dominates so palettes separate primarily by hue.
const HUE_WEIGHT: f32 = 0.6;
/// Weight of the saturation difference in [`HslColor::distance`].
const SATURATION_WEIGHT: f32 = 0.2;
/// Weight of the lightness difference in [`HslColor::distance`].
const LIGHTNESS_WEIGHT: f32 = 0.2;

/// A color expressed as hue/saturation/lightness.
///
/// Fields are private so the domain invariants (hue in [0, 360),
/// saturation and lightness in [0, 100]) hold for every value that
/// exists, including deserialized ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawHsl")]
pub struct HslColor {
    hue: f32,
    saturation: f32,
    lightness: f32,
}

/// Unvalidated mirror of [`HslColor`] used as the serde entry point.
#[derive(Deserialize)]
struct RawHsl {
    hue: f32,
    saturation: f32,
    lightness: f32,
}

impl From<RawHsl> for HslColor {
    fn from(raw: RawHsl) -> Self {
        Self::new(raw.hue, raw.saturation, raw.lightness)
    }
}

/// An RGB triple derived from an [`HslColor`]. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HslColor {
    /// Build a color, folding the hue modulo 360 and clamping
    /// saturation/lightness into [0, 100].
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
        }
    }

    /// Hue in degrees, within [0, 360).
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation percentage, within [0, 100].
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Lightness percentage, within [0, 100].
    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Standard HSL to RGB conversion.
    ///
    /// Chroma `c = (1 - |2l - 1|) * s`, secondary component
    /// `x = c * (1 - |h' mod 2 - 1|)`, sextant selection over `h' =
    /// hue / 60`, then the lightness offset `m = l - c/2` is added and
    /// each channel is scaled to [0, 255] with round-to-nearest.
    pub fn rgb(&self) -> Rgb {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h_prime = self.hue / 60.0;
        let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
        // Last arm is closed so an h' of exactly 6 folds into the final
        // sextant; the hue invariant keeps h' < 6 in practice.
        let (r1, g1, b1) = match h_prime {
            h if h < 1.0 => (c, x, 0.0),
            h if h < 2.0 => (x, c, 0.0),
            h if h < 3.0 => (0.0, c, x),
            h if h < 4.0 => (0.0, x, c),
            h if h < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;

        Rgb {
            r: scale_channel(r1 + m),
            g: scale_channel(g1 + m),
            b: scale_channel(b1 + m),
        }
    }

    /// Uppercase `#RRGGBB` form of [`Self::rgb`].
    pub fn hex(&self) -> String {
        let Rgb { r, g, b } = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Weighted HSL dissimilarity in [0, 1].
    ///
    /// The hue difference uses the circular metric
    /// `min(|dh|, 360 - |dh|) / 360`; saturation and lightness use the
    /// plain normalized difference. Symmetric and zero for equal
    /// colors, but not a metric-space distance (the triangle inequality
    /// is not guaranteed).
    pub fn distance(&self, other: &HslColor) -> f32 {
        let dh = (self.hue - other.hue).abs();
        let dh = dh.min(360.0 - dh) / 360.0;
        let ds = (self.saturation - other.saturation).abs() / 100.0;
        let dl = (self.lightness - other.lightness).abs() / 100.0;
        dh * HUE_WEIGHT + ds * SATURATION_WEIGHT + dl * LIGHTNESS_WEIGHT
    }
}

impl fmt::Display for HslColor {
    /// Human-readable form, e.g. `hsl(210, 60%, 50%)`, with
    /// integer-truncated components.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue as i32, self.saturation as i32, self.lightness as i32
        )
    }
}

fn scale_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_primary_colors() {
        assert_eq!(HslColor::new(0.0, 100.0, 50.0).rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(HslColor::new(60.0, 100.0, 50.0).rgb(), Rgb { r: 255, g: 255, b: 0 });
        assert_eq!(HslColor::new(120.0, 100.0, 50.0).rgb(), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(HslColor::new(240.0, 100.0, 50.0).rgb(), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(HslColor::new(300.0, 100.0, 50.0).rgb(), Rgb { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn converts_achromatic_colors() {
        assert_eq!(HslColor::new(0.0, 0.0, 0.0).rgb(), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(HslColor::new(0.0, 0.0, 100.0).rgb(), Rgb { r: 255, g: 255, b: 255 });
        assert_eq!(HslColor::new(180.0, 0.0, 50.0).rgb(), Rgb { r: 128, g: 128, b: 128 });
    }

    #[test]
    fn converts_mid_tone() {
        assert_eq!(HslColor::new(210.0, 60.0, 50.0).rgb(), Rgb { r: 51, g: 128, b: 204 });
    }

    #[test]
    fn hex_is_uppercase_rrggbb_and_round_trips() {
        let color = HslColor::new(210.0, 60.0, 50.0);
        let hex = color.hex();
        assert_eq!(hex, "#3380CC");
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
        assert!(
            hex[1..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
        );

        let decoded = Rgb {
            r: u8::from_str_radix(&hex[1..3], 16).unwrap(),
            g: u8::from_str_radix(&hex[3..5], 16).unwrap(),
            b: u8::from_str_radix(&hex[5..7], 16).unwrap(),
        };
        assert_eq!(decoded, color.rgb());
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let pairs = [
            (HslColor::new(10.0, 40.0, 60.0), HslColor::new(200.0, 80.0, 30.0)),
            (HslColor::new(0.0, 0.0, 0.0), HslColor::new(359.0, 100.0, 100.0)),
            (HslColor::new(123.0, 55.0, 45.0), HslColor::new(321.0, 65.0, 70.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.distance(&b), b.distance(&a));
            assert_eq!(a.distance(&a), 0.0);
            assert_eq!(b.distance(&b), 0.0);
        }
    }

    #[test]
    fn hue_difference_wraps_around_the_circle() {
        let a = HslColor::new(350.0, 50.0, 50.0);
        let b = HslColor::new(10.0, 50.0, 50.0);
        let expected = 0.6 * (20.0 / 360.0);
        assert!((a.distance(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_reaches_the_upper_bound_at_maximal_separation() {
        let a = HslColor::new(0.0, 0.0, 0.0);
        let b = HslColor::new(180.0, 100.0, 100.0);
        let d = a.distance(&b);
        assert!(d <= 1.0);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn constructor_normalizes_out_of_domain_inputs() {
        let c = HslColor::new(540.0, 150.0, -20.0);
        assert_eq!(c.hue(), 180.0);
        assert_eq!(c.saturation(), 100.0);
        assert_eq!(c.lightness(), 0.0);

        assert_eq!(HslColor::new(360.0, 50.0, 50.0).hue(), 0.0);
        assert_eq!(HslColor::new(-30.0, 50.0, 50.0).hue(), 330.0);
    }

    #[test]
    fn display_uses_truncated_components() {
        let c = HslColor::new(210.7, 60.9, 50.2);
        assert_eq!(c.to_string(), "hsl(210, 60%, 50%)");
    }

    #[test]
    fn deserialization_routes_through_normalization() {
        let c: HslColor =
            serde_json::from_str(r#"{"hue":400.0,"saturation":120.0,"lightness":50.0}"#).unwrap();
        assert_eq!(c.hue(), 40.0);
        assert_eq!(c.saturation(), 100.0);
        assert_eq!(c.lightness(), 50.0);
    }
}
