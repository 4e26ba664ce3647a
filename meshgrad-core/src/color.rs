//! RGB color value type and derived metrics.

use serde::{Deserialize, Serialize};

/// Maximum possible distance between two RGB colors: √(255² × 3)
pub const MAX_RGB_DISTANCE: f64 = 441.6729559300637;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance in RGB space
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceptual luminance (Rec. 601 weights)
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Component-wise mean of a set of colors, rounded.
    ///
    /// An empty slice averages to black.
    pub fn average(colors: &[Rgb]) -> Rgb {
        if colors.is_empty() {
            return Rgb::BLACK;
        }
        let n = colors.len() as f64;
        let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
        for c in colors {
            r += c.r as f64;
            g += c.g as f64;
            b += c.b as f64;
        }
        Rgb::new(
            (r / n).round() as u8,
            (g / n).round() as u8,
            (b / n).round() as u8,
        )
    }

    /// Parse a `#rrggbb` or `rrggbb` hex string.
    ///
    /// Malformed input falls back to black rather than erroring.
    pub fn from_hex(s: &str) -> Rgb {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Rgb::BLACK;
        }
        match (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            (Ok(r), Ok(g), Ok(b)) => Rgb::new(r, g, b),
            _ => Rgb::BLACK,
        }
    }

    /// Format as `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb::new(p[0], p[1], p[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let black = Rgb::BLACK;
        let white = Rgb::new(255, 255, 255);
        assert_eq!(black.distance(&black), 0.0);
        assert!((black.distance(&white) - MAX_RGB_DISTANCE).abs() < 1e-9);
        // symmetric
        assert_eq!(black.distance(&white), white.distance(&black));
    }

    #[test]
    fn test_luminance_ordering() {
        let dark = Rgb::new(10, 10, 10);
        let light = Rgb::new(200, 200, 200);
        assert!(dark.luminance() < light.luminance());
        // green dominates red dominates blue
        assert!(Rgb::new(0, 255, 0).luminance() > Rgb::new(255, 0, 0).luminance());
        assert!(Rgb::new(255, 0, 0).luminance() > Rgb::new(0, 0, 255).luminance());
    }

    #[test]
    fn test_average_rounds() {
        let avg = Rgb::average(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
        assert_eq!(avg, Rgb::new(128, 128, 128));
        assert_eq!(Rgb::average(&[]), Rgb::BLACK);
        let single = Rgb::new(42, 99, 7);
        assert_eq!(Rgb::average(&[single]), single);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgb::from_hex("#ff8000"), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::from_hex("ff8000"), Rgb::new(255, 128, 0));
        // malformed inputs fall back to black
        assert_eq!(Rgb::from_hex("#ff80"), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("zzzzzz"), Rgb::BLACK);
        assert_eq!(Rgb::from_hex(""), Rgb::BLACK);
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::new(17, 0, 255);
        assert_eq!(Rgb::from_hex(&c.to_hex()), c);
    }
}
