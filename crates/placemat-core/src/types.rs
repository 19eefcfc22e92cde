//! Core value types for the placemat engine.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// English Metric Units per inch (Office Open XML coordinate unit).
pub const EMU_PER_INCH: f64 = 914_400.0;

/// English Metric Units per typographic point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// Points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// An axis-aligned rectangle in layout units (inches).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from position and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from origin and size vectors.
    pub fn from_vecs(origin: DVec2, size: DVec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Top-left corner.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Width and height as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// True when both dimensions are finite and strictly positive.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Check whether `other` lies inside this rectangle, allowing `epsilon`
    /// of floating point slack on every edge.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }

    /// Shrink by per-side insets.
    pub fn inset(&self, padding: &Padding) -> Rect {
        Rect::new(
            self.x + padding.left,
            self.y + padding.top,
            self.width - padding.horizontal(),
            self.height - padding.vertical(),
        )
    }

    /// Bounding box of both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}) {:.3}x{:.3}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Padding on all sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Create uniform padding.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create symmetric padding.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Axis along which a region is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// Convert inches to EMU, rounded to the nearest unit.
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Convert points to EMU, rounded to the nearest unit.
pub fn points_to_emu(points: f64) -> i64 {
    (points * EMU_PER_POINT).round() as i64
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex string (`#002060` or `002060`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Uppercase hex without the leading `#`, as used by `a:srgbClr`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color '{value}', expected #RRGGBB"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#002060").unwrap();
        assert_eq!(color, Color::rgb(0, 32, 96));
        assert_eq!(color.to_hex(), "002060");
        assert_eq!(color.to_string(), "#002060");
    }

    #[test]
    fn test_color_rejects_malformed() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
        assert!(Color::from_hex("ÄÄÄ").is_none());
        assert!(Color::from_hex("#+F+F+F").is_none());
        assert!(Color::from_hex("##002060").is_none());
        assert_eq!(Color::from_hex("c00000"), Some(Color::rgb(192, 0, 0)));
    }

    #[test]
    fn test_color_deserialize() {
        let color: Color = serde_json::from_str("\"#C00000\"").unwrap();
        assert_eq!(color, Color::rgb(192, 0, 0));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_emu_conversions() {
        assert_eq!(inches_to_emu(22.0), 20_116_800);
        assert_eq!(inches_to_emu(0.05), 45_720);
        assert_eq!(points_to_emu(1.5), 19_050);
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        let inner = rect.inset(&Padding { top: 1.0, right: 2.0, bottom: 0.5, left: 0.5 });
        assert_eq!(inner, Rect::new(0.5, 1.0, 7.5, 3.5));
        assert!(rect.contains_rect(&inner, 0.0));
    }

    #[test]
    fn test_rect_has_area() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 1.0, f64::NAN).has_area());
    }
}
