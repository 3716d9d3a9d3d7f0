// src/color.rs

use crate::model::Color;
use palette::{Hsl, RgbHue};

/// Maps a day's commit count to a display color, relative to the busiest day
#[derive(Debug, Clone, PartialEq)]
pub enum ColorPolicy {
    /// Four discrete green levels, like a contribution calendar
    Quantile(QuantilePalette),
    /// One hue whose lightness grows with the count
    Hue(HueRamp),
}

impl ColorPolicy {
    pub fn color_for(&self, count: u32, max_count: u32) -> Color {
        match self {
            ColorPolicy::Quantile(palette) => palette.color_for(count, max_count),
            ColorPolicy::Hue(ramp) => ramp.color_for(count, max_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantilePalette {
    pub empty: Color,
    /// Ascending intensity
    pub levels: [Color; 4],
    /// Busiest-day counts below this are treated as this, so a quiet window
    /// does not light up at full intensity
    pub floor: u32,
}

impl Default for QuantilePalette {
    fn default() -> Self {
        Self {
            empty: Color::new(0x16, 0x1b, 0x22),
            levels: [
                Color::new(0x0e, 0x44, 0x29),
                Color::new(0x00, 0x6d, 0x32),
                Color::new(0x26, 0xa6, 0x41),
                Color::new(0x39, 0xd3, 0x53),
            ],
            floor: 4,
        }
    }
}

impl QuantilePalette {
    pub fn color_for(&self, count: u32, max_count: u32) -> Color {
        if count == 0 {
            return self.empty;
        }
        let scale = max_count.max(self.floor).max(1) as f64;
        let intensity = (count as f64 / scale).min(1.0);
        let band = if intensity <= 0.25 {
            0
        } else if intensity <= 0.5 {
            1
        } else if intensity <= 0.75 {
            2
        } else {
            3
        };
        self.levels[band]
    }
}

/// Lightness ramp at a fixed hue and saturation.
///
/// Saturation and lightness bounds are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct HueRamp {
    pub empty: Color,
    pub hue: f64,
    pub saturation: f64,
    pub min_lightness: f64,
    pub max_lightness: f64,
}

impl Default for HueRamp {
    fn default() -> Self {
        Self {
            empty: Color::new(0x0a, 0x0a, 0x0a),
            hue: 120.0,
            saturation: 75.0,
            min_lightness: 15.0,
            max_lightness: 80.0,
        }
    }
}

impl HueRamp {
    pub fn color_for(&self, count: u32, max_count: u32) -> Color {
        if count == 0 {
            return self.empty;
        }
        let intensity = (count as f64 / max_count.max(1) as f64).min(1.0);
        let lightness = self.min_lightness + intensity * (self.max_lightness - self.min_lightness);
        hsl_to_rgb(Hsl::new(
            RgbHue::from_degrees(self.hue),
            self.saturation / 100.0,
            lightness / 100.0,
        ))
    }
}

/// Converts HSL (saturation and lightness in 0..=1) to 8-bit sRGB.
///
/// Uses the closed form `f(n) = L - a * max(-1, min(k - 3, 9 - k, 1))` with
/// `k = (n + H / 30) mod 12` and `a = S * min(L, 1 - L)`, then rounds each
/// channel. The result is reproducible bit for bit, unlike a float round trip
/// through a general color space conversion.
pub fn hsl_to_rgb(hsl: Hsl<palette::encoding::Srgb, f64>) -> Color {
    let hue = hsl.hue.into_positive_degrees();
    let s = hsl.saturation;
    let l = hsl.lightness;
    let a = s * l.min(1.0 - l);

    let channel = |n: f64| -> u8 {
        let k = (n + hue / 30.0).rem_euclid(12.0);
        let f = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (f * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Color::new(channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl(h: f64, s: f64, l: f64) -> Hsl<palette::encoding::Srgb, f64> {
        Hsl::new(RgbHue::from_degrees(h), s / 100.0, l / 100.0)
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_rgb(hsl(0.0, 100.0, 50.0)), Color::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(hsl(120.0, 100.0, 50.0)), Color::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(hsl(240.0, 100.0, 50.0)), Color::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(hsl(60.0, 100.0, 50.0)), Color::new(255, 255, 0));
    }

    #[test]
    fn greys_ignore_hue() {
        assert_eq!(hsl_to_rgb(hsl(200.0, 0.0, 0.0)), Color::new(0, 0, 0));
        assert_eq!(hsl_to_rgb(hsl(200.0, 0.0, 100.0)), Color::new(255, 255, 255));
        assert_eq!(hsl_to_rgb(hsl(10.0, 0.0, 50.0)), Color::new(128, 128, 128));
    }

    #[test]
    fn negative_hue_wraps() {
        assert_eq!(hsl_to_rgb(hsl(-120.0, 100.0, 50.0)), hsl_to_rgb(hsl(240.0, 100.0, 50.0)));
    }

    #[test]
    fn hue_ramp_endpoints() {
        let ramp = HueRamp::default();
        // 120deg, 75%, 80%: a = 0.15, R = B = 0.65, G = 0.95
        assert_eq!(ramp.color_for(9, 9), Color::new(166, 242, 166));
        assert_eq!(ramp.color_for(12, 9), Color::new(166, 242, 166));
        assert_eq!(ramp.color_for(0, 9), ramp.empty);
    }

    #[test]
    fn hue_ramp_darker_for_fewer() {
        let ramp = HueRamp::default();
        let low = ramp.color_for(1, 10);
        let high = ramp.color_for(9, 10);
        assert!(low.green < high.green);
    }

    #[test]
    fn quantile_bands() {
        let palette = QuantilePalette::default();
        let [l1, l2, l3, l4] = palette.levels;
        assert_eq!(palette.color_for(0, 8), palette.empty);
        assert_eq!(palette.color_for(1, 8), l1);
        assert_eq!(palette.color_for(2, 8), l1);
        assert_eq!(palette.color_for(3, 8), l2);
        assert_eq!(palette.color_for(4, 8), l2);
        assert_eq!(palette.color_for(6, 8), l3);
        assert_eq!(palette.color_for(7, 8), l4);
        assert_eq!(palette.color_for(8, 8), l4);
    }

    #[test]
    fn quantile_floor_keeps_quiet_windows_dim() {
        let palette = QuantilePalette::default();
        // Busiest day had one commit, but the floor of 4 caps intensity at 0.25
        assert_eq!(palette.color_for(1, 1), palette.levels[0]);
        assert_eq!(palette.color_for(2, 2), palette.levels[1]);
        assert_eq!(palette.color_for(4, 4), palette.levels[3]);
    }

    #[test]
    fn policy_dispatch() {
        let quantile = ColorPolicy::Quantile(QuantilePalette::default());
        let hue = ColorPolicy::Hue(HueRamp::default());
        assert_eq!(quantile.color_for(0, 3), QuantilePalette::default().empty);
        assert_eq!(hue.color_for(0, 3), HueRamp::default().empty);
    }
}
