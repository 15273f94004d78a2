//! Deterministic count→color and rate→color mappings for the heatmap
//! and progress views. Presentation layers apply these values as-is.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::core::Status;

/// Count at which a heatmap cell reaches full intensity.
pub const FULL_INTENSITY_COUNT: usize = 10;

/// An sRGB color, serialized as a `#rrggbb` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Neutral tone for heatmap cells with no observations.
pub const NEUTRAL_CELL: Rgb = Rgb::new(0xf8, 0xf9, 0xfa);
/// Foreground for light cell backgrounds.
pub const TEXT_DARK: Rgb = Rgb::new(0x21, 0x25, 0x29);
/// Foreground for saturated cell backgrounds.
pub const TEXT_LIGHT: Rgb = Rgb::new(0xff, 0xff, 0xff);
/// Low compliance / open observations.
pub const ALERT: Rgb = Rgb::new(0xff, 0x6b, 0x6b);
/// Mid-band compliance.
pub const WARNING: Rgb = Rgb::new(0xff, 0xc1, 0x07);
/// High compliance / complied observations.
pub const SUCCESS: Rgb = Rgb::new(0x4c, 0xaf, 0x50);

fn intensity(count: usize, full_scale: usize) -> f64 {
    if full_scale == 0 {
        return 1.0;
    }

    (count as f64 / full_scale as f64).min(1.0)
}

/// Heatmap cell fill for a count, with a configurable saturation point.
pub fn count_color_scaled(count: usize, full_scale: usize) -> Rgb {
    if count == 0 {
        return NEUTRAL_CELL;
    }

    let i = intensity(count, full_scale);
    Rgb::new(
        (255.0 * i).floor() as u8,
        (100.0 * (1.0 - i)).floor() as u8,
        (71.0 * (1.0 - i)).floor() as u8,
    )
}

/// Heatmap cell fill for a count. Zero maps to the neutral tone;
/// otherwise the channels interpolate toward the saturated alert hue,
/// reaching it at a count of ten.
pub fn count_color(count: usize) -> Rgb {
    count_color_scaled(count, FULL_INTENSITY_COUNT)
}

/// Foreground color that stays legible on `count_color_scaled` fills.
pub fn text_color_scaled(count: usize, full_scale: usize) -> Rgb {
    if intensity(count, full_scale) > 0.5 {
        TEXT_LIGHT
    } else {
        TEXT_DARK
    }
}

/// Foreground color that stays legible on `count_color` fills.
pub fn text_color_for(count: usize) -> Rgb {
    text_color_scaled(count, FULL_INTENSITY_COUNT)
}

/// Progress band color with configurable band floors. The warning
/// floor is inclusive, the success floor is inclusive; below the
/// warning floor is the alert band. Comparisons are exact, the rate
/// is not rounded first.
pub fn rate_color_banded(rate: f64, warning_floor: f64, success_floor: f64) -> Rgb {
    if rate < warning_floor {
        ALERT
    } else if rate < success_floor {
        WARNING
    } else {
        SUCCESS
    }
}

/// Progress band color for a compliance rate: alert below 50, warning
/// from 50 up to 80, success from 80.
pub fn rate_color(rate: f64) -> Rgb {
    rate_color_banded(rate, 50.0, 80.0)
}

/// Fixed series color for a status, shared by the distribution and
/// trend views.
pub fn status_color(status: Status) -> Rgb {
    match status {
        Status::Open => ALERT,
        Status::Complied => SUCCESS,
    }
}

/// Hover variant: add `round(2.55 × percent)` to each channel, clamped
/// to 255.
pub fn lighten(color: Rgb, percent: u32) -> Rgb {
    let amount = (2.55 * percent as f64).round() as u32;
    let channel = |value: u8| (value as u32 + amount).min(255) as u8;

    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}
