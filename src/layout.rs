// src/layout.rs

use crate::error::{Error, Result};
use crate::model::{Canvas, CellPlacement, Color, DrawPrimitive};

/// One row of the policy table: applies to series up to `max_days` long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyBranch {
    pub max_days: usize,
    pub size: u32,
    pub spacing: u32,
    pub origin_x: u32,
    pub origin_y: u32,
}

/// Square size picked from the series length. Rows are tried in order, the
/// last one catches everything longer.
pub const POLICY_TABLE: [PolicyBranch; 3] = [
    PolicyBranch { max_days: 10, size: 3, spacing: 1, origin_x: 1, origin_y: 1 },
    PolicyBranch { max_days: 16, size: 2, spacing: 0, origin_x: 0, origin_y: 3 },
    PolicyBranch { max_days: usize::MAX, size: 1, spacing: 0, origin_x: 0, origin_y: 0 },
];

pub fn policy_branch(days: usize) -> PolicyBranch {
    POLICY_TABLE
        .iter()
        .copied()
        .find(|branch| days <= branch.max_days)
        .unwrap_or(POLICY_TABLE[POLICY_TABLE.len() - 1])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedGrid {
    days_across: u32,
    days_down: u32,
    cell: u32,
}

impl FixedGrid {
    pub fn new(days_across: u32, days_down: u32, cell: u32, canvas: Canvas) -> Result<Self> {
        if days_across == 0 || days_down == 0 || cell == 0 {
            return Err(Error::InvalidInput(format!(
                "grid dimensions must be positive, got {}x{} cells of {}px",
                days_across, days_down, cell
            )));
        }
        let fits = match (days_across.checked_mul(cell), days_down.checked_mul(cell)) {
            (Some(width), Some(height)) => canvas.contains(0, 0, width, height),
            _ => false,
        };
        if !fits {
            return Err(Error::InvalidInput(format!(
                "{}x{} grid of {}px cells does not fit a {}x{} canvas",
                days_across, days_down, cell, canvas.width, canvas.height
            )));
        }
        Ok(Self {
            days_across,
            days_down,
            cell,
        })
    }

    pub fn capacity(&self) -> usize {
        self.days_across as usize * self.days_down as usize
    }

    fn plan(&self, days: usize) -> Vec<CellPlacement> {
        (0..days.min(self.capacity()))
            .map(|day| {
                let column = day as u32 / self.days_down;
                let row = day as u32 % self.days_down;
                CellPlacement {
                    day,
                    x: column * self.cell,
                    y: row * self.cell,
                    size: self.cell,
                }
            })
            .collect()
    }
}

impl Default for FixedGrid {
    fn default() -> Self {
        Self {
            days_across: 16,
            days_down: 4,
            cell: 2,
        }
    }
}

/// How a day series is arranged on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Square size chosen from [`POLICY_TABLE`], cells wrap into rows
    PolicyTable,
    /// Column-major grid with a fixed cell size
    FixedGrid(FixedGrid),
}

impl LayoutStrategy {
    /// Pixel origin and size for every day that fits on the canvas.
    ///
    /// Days that do not fit are left out; placements never overlap.
    pub fn plan(&self, days: usize, canvas: Canvas) -> Vec<CellPlacement> {
        match self {
            LayoutStrategy::PolicyTable => plan_policy(days, canvas),
            LayoutStrategy::FixedGrid(grid) => grid.plan(days),
        }
    }
}

/// Slots are filled row by row from the branch origin. When there are fewer
/// slots than days, the oldest days are left off so today always shows.
fn plan_policy(days: usize, canvas: Canvas) -> Vec<CellPlacement> {
    let branch = policy_branch(days);
    let pitch = branch.size + branch.spacing;
    let mut slots = Vec::with_capacity(days);
    let (mut x, mut y) = (branch.origin_x, branch.origin_y);

    while slots.len() < days {
        if !canvas.contains(x, y, branch.size, branch.size) {
            // wrap
            x = branch.origin_x;
            y = y.saturating_add(pitch);
        }
        if !canvas.contains(x, y, branch.size, branch.size) {
            break;
        }
        slots.push((x, y));
        x += pitch;
    }

    let first_day = days - slots.len();
    slots
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| CellPlacement {
            day: first_day + i,
            x,
            y,
            size: branch.size,
        })
        .collect()
}

/// Horizontal bar on a single pixel row, e.g. next to an 8px icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    offset: u32,
    width: u32,
    row: u32,
}

impl ProgressBar {
    pub fn new(offset: u32, width: u32, row: u32, canvas: Canvas) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidInput("progress bar needs a width".into()));
        }
        if !canvas.contains(offset, row, width, 1) {
            return Err(Error::InvalidInput(format!(
                "progress bar at x={} width {} row {} leaves the {}x{} canvas",
                offset, width, row, canvas.width, canvas.height
            )));
        }
        Ok(Self { offset, width, row })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixels of progress color for `progress` in 0..=1
    pub fn filled(&self, progress: f64) -> u32 {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        ((progress * self.width as f64).floor() as u32).min(self.width)
    }

    /// One line for the filled span and one for the rest; a span of zero
    /// pixels is left out.
    pub fn draw(&self, progress: f64, fill: Color, background: Color) -> Vec<DrawPrimitive> {
        let filled = self.filled(progress);
        let mut primitives = Vec::with_capacity(2);
        if filled > 0 {
            primitives.push(DrawPrimitive::Line {
                x0: self.offset,
                y0: self.row,
                x1: self.offset + filled - 1,
                y1: self.row,
                color: fill,
            });
        }
        if filled < self.width {
            primitives.push(DrawPrimitive::Line {
                x0: self.offset + filled,
                y0: self.row,
                x1: self.offset + self.width - 1,
                y1: self.row,
                color: background,
            });
        }
        primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const GREY: Color = Color::new(40, 40, 40);

    fn origins(cells: &[CellPlacement]) -> Vec<(u32, u32)> {
        cells.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn branch_selection() {
        assert_eq!(policy_branch(1).size, 3);
        assert_eq!(policy_branch(7).size, 3);
        assert_eq!(policy_branch(10).size, 3);
        assert_eq!(policy_branch(11).size, 2);
        assert_eq!(policy_branch(16).size, 2);
        assert_eq!(policy_branch(17).size, 1);
        assert_eq!(policy_branch(64).size, 1);
    }

    #[test]
    fn week_fits_one_row_of_big_squares() {
        let cells = LayoutStrategy::PolicyTable.plan(7, Canvas::default());
        assert_eq!(
            origins(&cells),
            vec![(1, 1), (5, 1), (9, 1), (13, 1), (17, 1), (21, 1), (25, 1)]
        );
        assert!(cells.iter().all(|c| c.size == 3));
    }

    #[test]
    fn ten_days_wrap_to_second_row() {
        let cells = LayoutStrategy::PolicyTable.plan(10, Canvas::default());
        assert_eq!(cells.len(), 10);
        assert_eq!((cells[7].x, cells[7].y), (29, 1));
        assert_eq!((cells[8].x, cells[8].y), (1, 5));
        assert_eq!((cells[9].x, cells[9].y), (5, 5));
    }

    #[test]
    fn two_weeks_use_small_squares() {
        let cells = LayoutStrategy::PolicyTable.plan(14, Canvas::default());
        assert_eq!(cells.len(), 14);
        assert_eq!((cells[0].x, cells[0].y, cells[0].size), (0, 3, 2));
        assert_eq!((cells[13].x, cells[13].y), (26, 3));
    }

    #[test]
    fn long_series_fill_pixels_row_by_row() {
        let cells = LayoutStrategy::PolicyTable.plan(40, Canvas::default());
        assert_eq!(cells.len(), 40);
        assert_eq!((cells[31].x, cells[31].y), (31, 0));
        assert_eq!((cells[32].x, cells[32].y), (0, 1));
    }

    #[test]
    fn policy_drops_days_past_the_canvas() {
        let cells = LayoutStrategy::PolicyTable.plan(300, Canvas::default());
        assert_eq!(cells.len(), 256);
        assert_eq!(cells[0].day, 44);
        assert_eq!(cells[255].day, 299);
    }

    #[test]
    fn small_canvas_keeps_today() {
        // 3px cells: two fit across and one row down
        let canvas = Canvas::new(8, 4).unwrap();
        let cells = LayoutStrategy::PolicyTable.plan(10, canvas);
        assert_eq!(cells.iter().map(|c| c.day).collect::<Vec<_>>(), vec![8, 9]);
        assert_eq!((cells[0].x, cells[0].y), (1, 1));
        assert_eq!((cells[1].x, cells[1].y), (5, 1));
    }

    #[test]
    fn oversized_grid_is_rejected_not_wrapped() {
        let canvas = Canvas::default();
        // 2^31 * 2 wraps to 0 in u32
        assert!(matches!(
            FixedGrid::new(2_147_483_648, 4, 2, canvas),
            Err(Error::InvalidInput(_))
        ));
        assert!(FixedGrid::new(4, 2_147_483_648, 2, canvas).is_err());
        assert!(FixedGrid::new(1, 1, u32::MAX, canvas).is_err());
    }

    #[test]
    fn grid_is_column_major() {
        let grid = LayoutStrategy::FixedGrid(FixedGrid::default());
        let cells = grid.plan(64, Canvas::default());
        assert_eq!(cells.len(), 64);
        assert_eq!((cells[0].x, cells[0].y), (0, 0));
        assert_eq!((cells[1].x, cells[1].y), (0, 2));
        assert_eq!((cells[3].x, cells[3].y), (0, 6));
        assert_eq!((cells[4].x, cells[4].y), (2, 0));
        assert_eq!((cells[63].x, cells[63].y), (30, 6));
    }

    #[test]
    fn grid_drops_overflow() {
        let grid = LayoutStrategy::FixedGrid(FixedGrid::default());
        assert_eq!(grid.plan(70, Canvas::default()).len(), 64);
        assert_eq!(grid.plan(5, Canvas::default()).len(), 5);
    }

    #[test]
    fn grid_must_fit_canvas() {
        let canvas = Canvas::default();
        assert!(FixedGrid::new(16, 4, 2, canvas).is_ok());
        assert!(FixedGrid::new(17, 4, 2, canvas).is_err());
        assert!(FixedGrid::new(16, 0, 2, canvas).is_err());
        assert!(FixedGrid::new(8, 2, 4, canvas).is_ok());
    }

    #[test]
    fn progress_bar_partial() {
        let bar = ProgressBar::new(9, 23, 7, Canvas::default()).unwrap();
        let lines = bar.draw(0.5, RED, GREY);
        assert_eq!(
            lines,
            vec![
                DrawPrimitive::Line { x0: 9, y0: 7, x1: 19, y1: 7, color: RED },
                DrawPrimitive::Line { x0: 20, y0: 7, x1: 31, y1: 7, color: GREY },
            ]
        );
    }

    #[test]
    fn progress_bar_degenerate_ends() {
        let bar = ProgressBar::new(9, 23, 7, Canvas::default()).unwrap();
        assert_eq!(
            bar.draw(0.0, RED, GREY),
            vec![DrawPrimitive::Line { x0: 9, y0: 7, x1: 31, y1: 7, color: GREY }]
        );
        assert_eq!(
            bar.draw(1.0, RED, GREY),
            vec![DrawPrimitive::Line { x0: 9, y0: 7, x1: 31, y1: 7, color: RED }]
        );
        assert_eq!(bar.draw(3.5, RED, GREY).len(), 1);
        assert_eq!(bar.draw(f64::NAN, RED, GREY)[0].color(), GREY);
    }

    #[test]
    fn progress_bar_must_fit() {
        let canvas = Canvas::default();
        assert!(ProgressBar::new(9, 24, 7, canvas).is_err());
        assert!(ProgressBar::new(0, 0, 7, canvas).is_err());
        assert!(ProgressBar::new(0, 32, 8, canvas).is_err());
    }
}
