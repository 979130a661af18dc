//! Status colors and color math

use smart_leds::RGB8;

/// Named status colors
///
/// Channel values are kept well below 255 so the single status pixel stays
/// comfortable to look at before master brightness is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NamedColor {
    Off,
    Green,
    Red,
    Blue,
    Purple,
    Yellow,
    Cyan,
    Gray,
    WhiteLow,
}

impl NamedColor {
    /// Logical RGB value
    pub const fn rgb(self) -> RGB8 {
        match self {
            NamedColor::Off => RGB8 { r: 0, g: 0, b: 0 },
            NamedColor::Green => RGB8 { r: 0, g: 150, b: 0 },
            NamedColor::Red => RGB8 { r: 150, g: 0, b: 0 },
            NamedColor::Blue => RGB8 { r: 0, g: 0, b: 150 },
            NamedColor::Purple => RGB8 { r: 100, g: 0, b: 120 },
            NamedColor::Yellow => RGB8 { r: 150, g: 150, b: 0 },
            NamedColor::Cyan => RGB8 { r: 0, g: 150, b: 150 },
            NamedColor::Gray => RGB8 { r: 60, g: 60, b: 60 },
            NamedColor::WhiteLow => RGB8 { r: 30, g: 30, b: 30 },
        }
    }
}

/// Shown while the data feed is unavailable
pub const WARNING_COLOR: RGB8 = NamedColor::Yellow.rgb();

/// Scale one channel by a multiplier, rounding to nearest
///
/// Multipliers at or below zero give 0; above one are treated as one.
pub fn scale_channel(value: u8, multiplier: f32) -> u8 {
    if multiplier.is_nan() || multiplier <= 0.0 {
        return 0;
    }
    let m = multiplier.min(1.0);
    libm::roundf(f32::from(value) * m) as u8
}

/// Scale all channels of a color
pub fn scale(color: RGB8, multiplier: f32) -> RGB8 {
    RGB8 {
        r: scale_channel(color.r, multiplier),
        g: scale_channel(color.g, multiplier),
        b: scale_channel(color.b, multiplier),
    }
}

/// Linear blend between two colors at `step` of `steps`
pub fn lerp(from: RGB8, to: RGB8, step: u32, steps: u32) -> RGB8 {
    if steps == 0 || step >= steps {
        return to;
    }
    let mix = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        (a + (b - a) * step as i32 / steps as i32) as u8
    };
    RGB8 {
        r: mix(from.r, to.r),
        g: mix(from.g, to.g),
        b: mix(from.b, to.b),
    }
}

/// Convert HSV to RGB using the six-sector method
///
/// `hue` in degrees (any value, wrapped into [0, 360)), `saturation` and
/// `value` in [0, 1].
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> RGB8 {
    let mut h = libm::fmodf(hue, 360.0);
    if h < 0.0 {
        h += 360.0;
    }
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - libm::fabsf(libm::fmodf(h_prime, 2.0) - 1.0));
    let m = v - c;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |f: f32| libm::roundf((f + m) * 255.0) as u8;
    RGB8 {
        r: to_u8(r),
        g: to_u8(g),
        b: to_u8(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds_to_nearest() {
        assert_eq!(scale_channel(150, 0.5), 75);
        assert_eq!(scale_channel(60, 0.15), 9);
        assert_eq!(scale_channel(255, 1.0), 255);
        assert_eq!(scale_channel(255, 2.0), 255);
        assert_eq!(scale_channel(200, 0.0), 0);
        assert_eq!(scale_channel(200, -1.0), 0);
        assert_eq!(scale_channel(200, f32::NAN), 0);
    }

    #[test]
    fn test_hsv_primary_sectors() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), RGB8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), RGB8::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), RGB8::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(60.0, 1.0, 1.0), RGB8::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), RGB8::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(300.0, 1.0, 1.0), RGB8::new(255, 0, 255));
    }

    #[test]
    fn test_hsv_wraps_hue() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
    }

    #[test]
    fn test_hsv_grayscale() {
        assert_eq!(hsv_to_rgb(200.0, 0.0, 0.5), RGB8::new(128, 128, 128));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = RGB8::new(0, 100, 200);
        let b = RGB8::new(200, 100, 0);
        assert_eq!(lerp(a, b, 0, 4), a);
        assert_eq!(lerp(a, b, 2, 4), RGB8::new(100, 100, 100));
        assert_eq!(lerp(a, b, 4, 4), b);
        assert_eq!(lerp(a, b, 1, 0), b);
    }
}
