//! Geometric primitives for the visual surface.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in surface units, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn with_height(self, height: f64) -> Self {
        Self { height, ..self }
    }

    pub fn with_width(self, width: f64) -> Self {
        Self { width, ..self }
    }
}

/// Render a length the way style properties expect it (`"780px"`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Parse the leading number of a style length such as `"12px"` or `"-4.5px"`.
///
/// Anything without a leading number yields `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_drops_trailing_zero_fraction() {
        assert_eq!(px(780.0), "780px");
        assert_eq!(px(12.5), "12.5px");
    }

    #[test]
    fn parse_px_reads_leading_number() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" -4.5px "), Some(-4.5));
        assert_eq!(parse_px("30"), Some(30.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(14.9, 14.9));
        assert!(!rect.contains(15.0, 12.0));
        assert!(!rect.contains(9.9, 12.0));
    }
}
