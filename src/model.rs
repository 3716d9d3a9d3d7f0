// src/model.rs

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use palette::Srgb;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The moment a commit was committed, as reported by the search API
pub type CommitTimestamp = DateTime<Utc>;

/// 8-bit sRGB color sent to the display
pub type Color = Srgb<u8>;

/// Formats a color the way the display expects it, e.g. `#39D353`
pub fn to_hex(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Pixel dimensions of the display matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "canvas must not be empty, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// True if a `w`×`h` box at (`x`, `y`) lies entirely on the canvas
    pub fn contains(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        matches!(x.checked_add(w), Some(right) if right <= self.width)
            && matches!(y.checked_add(h), Some(bottom) if bottom <= self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 32, height: 8 }
    }
}

/// Commit counts per day over a trailing window.
///
/// Index 0 is the oldest day, the last index is today. The length is fixed
/// when the series is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucketSeries {
    buckets: Vec<u32>,
}

impl DayBucketSeries {
    /// An all-zero series spanning `window_days` days
    pub fn zeroed(window_days: usize) -> Result<Self> {
        if window_days == 0 {
            return Err(Error::InvalidInput("window must span at least one day".into()));
        }
        Ok(Self { buckets: vec![0; window_days] })
    }

    pub fn from_counts(counts: Vec<u32>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::InvalidInput("window must span at least one day".into()));
        }
        Ok(Self { buckets: counts })
    }

    pub(crate) fn increment(&mut self, index: usize) {
        self.buckets[index] += 1;
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false: a series spans at least one day
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.buckets.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.buckets
    }

    pub fn max(&self) -> u32 {
        self.buckets.iter().copied().max().unwrap_or(0)
    }

    pub fn sum(&self) -> u64 {
        self.buckets.iter().map(|&c| c as u64).sum()
    }

    pub fn today(&self) -> u32 {
        self.buckets[self.buckets.len() - 1]
    }
}

/// Output of the aggregator.
///
/// `total` counts every timestamp handed in, including those that fell outside
/// the window and therefore do not show up in `series`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub series: DayBucketSeries,
    pub total: usize,
}

/// Where one day of the series lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPlacement {
    pub day: usize,
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// One drawing instruction for the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawPrimitive {
    /// Filled rectangle with its top-left corner at (`x`, `y`)
    Rect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Color,
    },
    /// Straight line, both endpoints inclusive
    Line {
        x0: u32,
        y0: u32,
        x1: u32,
        y1: u32,
        color: Color,
    },
}

impl DrawPrimitive {
    pub fn color(&self) -> Color {
        match *self {
            DrawPrimitive::Rect { color, .. } | DrawPrimitive::Line { color, .. } => color,
        }
    }
}

// Wire form is the display's draw command: {"df":[x,y,w,h,"#RRGGBB"]} or
// {"dl":[x0,y0,x1,y1,"#RRGGBB"]}.
impl Serialize for DrawPrimitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match *self {
            DrawPrimitive::Rect { x, y, width, height, color } => {
                map.serialize_entry("df", &(x, y, width, height, to_hex(color)))?;
            }
            DrawPrimitive::Line { x0, y0, x1, y1, color } => {
                map.serialize_entry("dl", &(x0, y0, x1, y1, to_hex(color)))?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_day_window_is_rejected() {
        assert!(matches!(DayBucketSeries::zeroed(0), Err(Error::InvalidInput(_))));
        assert!(DayBucketSeries::from_counts(vec![]).is_err());
    }

    #[test]
    fn series_stats() {
        let series = DayBucketSeries::from_counts(vec![1, 0, 4, 2]).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.max(), 4);
        assert_eq!(series.sum(), 7);
        assert_eq!(series.today(), 2);
        assert_eq!(series.get(4), None);
    }

    #[test]
    fn hex_is_uppercase_with_hash() {
        assert_eq!(to_hex(Color::new(0x39, 0xd3, 0x53)), "#39D353");
        assert_eq!(to_hex(Color::new(0, 0, 0)), "#000000");
    }

    #[test]
    fn primitives_serialize_as_draw_commands() {
        let rect = DrawPrimitive::Rect {
            x: 1,
            y: 2,
            width: 3,
            height: 3,
            color: Color::new(255, 0, 0),
        };
        let line = DrawPrimitive::Line {
            x0: 9,
            y0: 7,
            x1: 20,
            y1: 7,
            color: Color::new(0, 0, 255),
        };
        assert_eq!(
            serde_json::to_value(rect).unwrap(),
            serde_json::json!({ "df": [1, 2, 3, 3, "#FF0000"] })
        );
        assert_eq!(
            serde_json::to_value(line).unwrap(),
            serde_json::json!({ "dl": [9, 7, 20, 7, "#0000FF"] })
        );
    }

    #[test]
    fn canvas_bounds() {
        let canvas = Canvas::default();
        assert!(canvas.contains(29, 5, 3, 3));
        assert!(!canvas.contains(30, 5, 3, 3));
        assert!(Canvas::new(0, 8).is_err());
    }

    #[test]
    fn canvas_bounds_do_not_wrap() {
        let canvas = Canvas::default();
        assert!(!canvas.contains(u32::MAX, 0, 1, 1));
        assert!(!canvas.contains(1, 0, u32::MAX, 1));
        assert!(!canvas.contains(0, 1, 1, u32::MAX));
    }
}
