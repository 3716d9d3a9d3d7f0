// src/config.rs

use crate::cli::{Args, LayoutKind, PaletteKind, Style};
use crate::color::{ColorPolicy, HueRamp, QuantilePalette};
use crate::error::{Error, Result};
use crate::layout::{FixedGrid, LayoutStrategy, ProgressBar};
use crate::model::Canvas;
use crate::renderer::GoalColors;
use std::time::Duration;

/// GitHub search caps `per_page` at this
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub user: String,
    pub token: Option<String>,
    pub api_base: String,
    pub per_page: usize,
    pub max_items: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Needed only when payloads are actually pushed
    pub url: Option<String>,
    pub pulls_app: String,
    pub commits_app: String,
    pub pulls_icon: Option<String>,
    pub commits_icon: Option<String>,
    pub duration_secs: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartStyle {
    Days,
    Goal {
        goal: u32,
        bar: ProgressBar,
        colors: GoalColors,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub window_days: usize,
    pub canvas: Canvas,
    pub layout: LayoutStrategy,
    pub colors: ColorPolicy,
    pub style: ChartStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub pulls_every: Duration,
    pub commits_every: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GithubConfig,
    pub display: DisplayConfig,
    pub chart: ChartConfig,
    pub schedule: Schedule,
}

fn invalid(err: Error) -> Error {
    match err {
        Error::InvalidInput(msg) => Error::Config(msg),
        other => other,
    }
}

fn non_empty(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Config(format!("{} must not be empty", name)));
    }
    Ok(value.to_string())
}

fn seconds(name: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config(format!("{} must be at least one second", name)));
    }
    Ok(Duration::from_secs(secs))
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let timeout = seconds("timeout", args.timeout_secs)?;

        if args.per_page == 0 || args.per_page > MAX_PER_PAGE {
            return Err(Error::Config(format!(
                "per-page must be between 1 and {}, got {}",
                MAX_PER_PAGE, args.per_page
            )));
        }
        if args.max_items == 0 {
            return Err(Error::Config("max-items must be positive".into()));
        }
        let github = GithubConfig {
            user: non_empty("GitHub user", &args.github_user)?,
            token: args.github_token.clone().filter(|t| !t.trim().is_empty()),
            api_base: non_empty("GitHub API URL", &args.github_api)?,
            per_page: args.per_page,
            max_items: args.max_items,
            timeout,
        };

        let display = DisplayConfig {
            url: args
                .display_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from),
            pulls_app: non_empty("pulls app name", &args.pulls_app)?,
            commits_app: non_empty("commits app name", &args.commits_app)?,
            pulls_icon: args.pulls_icon.clone(),
            commits_icon: args.commits_icon.clone(),
            duration_secs: args.duration,
            timeout,
        };

        if args.window_days == 0 {
            return Err(Error::Config("window must span at least one day".into()));
        }
        let canvas = Canvas::new(args.canvas_width, args.canvas_height).map_err(invalid)?;
        let layout = match args.layout {
            LayoutKind::Policy => LayoutStrategy::PolicyTable,
            LayoutKind::Grid => LayoutStrategy::FixedGrid(
                FixedGrid::new(args.grid_across, args.grid_down, args.grid_cell, canvas).map_err(invalid)?,
            ),
        };
        let colors = match args.palette {
            PaletteKind::Quantile => ColorPolicy::Quantile(QuantilePalette::default()),
            PaletteKind::Hue => ColorPolicy::Hue(HueRamp::default()),
        };
        let style = match args.style {
            Style::Days => ChartStyle::Days,
            Style::Goal => {
                let width = canvas.width.saturating_sub(args.bar_offset);
                let bar = ProgressBar::new(args.bar_offset, width, canvas.height - 1, canvas).map_err(invalid)?;
                ChartStyle::Goal {
                    goal: args.commit_goal,
                    bar,
                    colors: GoalColors::default(),
                }
            }
        };

        let schedule = Schedule {
            pulls_every: seconds("pulls interval", args.pulls_interval)?,
            commits_every: seconds("commits interval", args.commits_interval)?,
        };

        Ok(Self {
            github,
            display,
            chart: ChartConfig {
                window_days: args.window_days,
                canvas,
                layout,
                colors,
                style,
            },
            schedule,
        })
    }
}
