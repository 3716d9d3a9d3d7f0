// src/renderer.rs

use crate::color::ColorPolicy;
use crate::error::{Error, Result};
use crate::layout::{LayoutStrategy, ProgressBar};
use crate::model::*;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Off pixels in previews, matching a dark LED matrix
const PREVIEW_BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// One filled square per day that fits the canvas, colored relative to the
/// busiest day in the series
pub fn render_chart(
    series: &DayBucketSeries,
    layout: &LayoutStrategy,
    colors: &ColorPolicy,
    canvas: Canvas,
) -> Vec<DrawPrimitive> {
    let max = series.max();
    layout
        .plan(series.len(), canvas)
        .into_iter()
        .filter_map(|cell| {
            let count = series.get(cell.day)?;
            Some(DrawPrimitive::Rect {
                x: cell.x,
                y: cell.y,
                width: cell.size,
                height: cell.size,
                color: colors.color_for(count, max),
            })
        })
        .collect()
}

/// Colors used when drawing commit totals against a goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalColors {
    pub fill: Color,
    pub background: Color,
}

impl Default for GoalColors {
    fn default() -> Self {
        Self {
            fill: Color::new(0x39, 0xd3, 0x53),
            background: Color::new(0x16, 0x1b, 0x22),
        }
    }
}

/// Commits counted in the window as a fraction of `goal`, capped at 1
pub fn goal_progress(series: &DayBucketSeries, goal: u32) -> f64 {
    if goal == 0 {
        return 1.0;
    }
    (series.sum() as f64 / goal as f64).min(1.0)
}

pub fn render_goal(
    series: &DayBucketSeries,
    goal: u32,
    bar: &ProgressBar,
    colors: GoalColors,
) -> Vec<DrawPrimitive> {
    bar.draw(goal_progress(series, goal), colors.fill, colors.background)
}

/// Paints primitives onto an image the size of the canvas, in order.
/// Anything outside the canvas is clipped.
pub fn rasterize(primitives: &[DrawPrimitive], canvas: Canvas) -> RgbImage {
    let mut image = RgbImage::from_pixel(canvas.width, canvas.height, PREVIEW_BACKGROUND);

    for primitive in primitives {
        let c = primitive.color();
        let pixel = Rgb([c.red, c.green, c.blue]);
        match *primitive {
            DrawPrimitive::Rect { x, y, width, height, .. } => {
                for py in y..y.saturating_add(height).min(canvas.height) {
                    for px in x..x.saturating_add(width).min(canvas.width) {
                        image.put_pixel(px, py, pixel);
                    }
                }
            }
            DrawPrimitive::Line { x0, y0, x1, y1, .. } => {
                for (px, py) in line_points(x0 as i64, y0 as i64, x1 as i64, y1 as i64) {
                    if px < canvas.width as i64 && py < canvas.height as i64 {
                        image.put_pixel(px as u32, py as u32, pixel);
                    }
                }
            }
        }
    }
    image
}

/// Writes a magnified PNG of the frame so it can be eyeballed on a monitor
pub fn save_preview(primitives: &[DrawPrimitive], canvas: Canvas, scale: u32, path: &Path) -> Result<()> {
    let scale = scale.max(1);
    let (width, height) = match (canvas.width.checked_mul(scale), canvas.height.checked_mul(scale)) {
        (Some(width), Some(height)) => (width, height),
        _ => {
            return Err(Error::InvalidInput(format!(
                "preview scale {} is too large for a {}x{} canvas",
                scale, canvas.width, canvas.height
            )))
        }
    };
    let frame = rasterize(primitives, canvas);
    let big = image::imageops::resize(&frame, width, height, image::imageops::FilterType::Nearest);
    big.save(path)?;
    Ok(())
}

// Bresenham, endpoints included
fn line_points(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<(i64, i64)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    let mut points = Vec::new();

    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
