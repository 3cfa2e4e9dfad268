use crate::foundation::core::Rgb8;

/// Fractional part of the golden ratio. Multiplying a stroke index by it and keeping the
/// fractional part gives a low-discrepancy hue sequence: neighbouring strokes never share a hue.
pub const GOLDEN_RATIO_FRACT: f64 = 0.618_033_988_749_895;

/// Saturation/value pair applied to every generated stroke hue.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokePalette {
    /// Saturation in `[0, 1]`.
    pub saturation: f64,
    /// Value (brightness) in `[0, 1]`.
    pub value: f64,
}

impl Default for StrokePalette {
    fn default() -> Self {
        Self {
            saturation: 0.95,
            value: 0.75,
        }
    }
}

impl StrokePalette {
    /// Hue in `[0, 1)` for the stroke at `index`.
    pub fn hue(index: usize) -> f64 {
        (index as f64 * GOLDEN_RATIO_FRACT).fract()
    }

    /// Display color for the stroke at `index`.
    pub fn color(&self, index: usize) -> Rgb8 {
        hsv_to_rgb(Self::hue(index), self.saturation, self.value)
    }
}

/// Standard six-sector HSV to RGB conversion; channels are rounded to the nearest integer.
///
/// `h` may lie outside `[0, 1)`: the sector is taken modulo 6.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb8 {
    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    fn to_u8(x: f64) -> u8 {
        (x * 255.0).round().clamp(0.0, 255.0) as u8
    }

    Rgb8 {
        r: to_u8(r),
        g: to_u8(g),
        b: to_u8(b),
    }
}

/// [`hsv_to_rgb`] rendered as `#rrggbb`.
pub fn hsv_to_rgb_hex(h: f64, s: f64, v: f64) -> String {
    hsv_to_rgb(h, s, v).to_hex()
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
