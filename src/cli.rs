// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shows GitHub pull requests and a commit chart on a pixel display
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub account whose activity is shown
    #[arg(long, env = "GITHUB_USER")]
    pub github_user: String,

    /// Token sent as a bearer credential; unauthenticated search is heavily rate limited
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api: String,

    /// Base URL of the display, e.g. http://192.168.1.40
    #[arg(long, env = "DISPLAY_URL")]
    pub display_url: Option<String>,

    /// HTTP timeout for both GitHub and the display, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Size of the trailing window, in days
    #[arg(long, env = "WINDOW_DAYS", default_value_t = 14)]
    pub window_days: usize,

    /// How days are arranged on the display
    #[arg(long, env = "LAYOUT", value_enum, default_value_t = LayoutKind::Policy)]
    pub layout: LayoutKind,

    /// Grid columns (grid layout)
    #[arg(long, default_value_t = 16)]
    pub grid_across: u32,

    /// Grid rows (grid layout)
    #[arg(long, default_value_t = 4)]
    pub grid_down: u32,

    /// Side of one grid cell in pixels (grid layout)
    #[arg(long, default_value_t = 2)]
    pub grid_cell: u32,

    /// How commit counts become colors
    #[arg(long, env = "PALETTE", value_enum, default_value_t = PaletteKind::Quantile)]
    pub palette: PaletteKind,

    /// What the commit app shows
    #[arg(long, env = "CHART_STYLE", value_enum, default_value_t = Style::Days)]
    pub style: Style,

    /// Commits in the window that fill the goal bar (goal style)
    #[arg(long, env = "COMMIT_GOAL", default_value_t = 20)]
    pub commit_goal: u32,

    /// First pixel column of the goal bar, leaving room for the icon
    #[arg(long, default_value_t = 9)]
    pub bar_offset: u32,

    #[arg(long, default_value_t = 32)]
    pub canvas_width: u32,

    #[arg(long, default_value_t = 8)]
    pub canvas_height: u32,

    /// Search results requested per page
    #[arg(long, default_value_t = 100)]
    pub per_page: usize,

    /// Stop paginating after this many commits
    #[arg(long, default_value_t = 1000)]
    pub max_items: usize,

    #[arg(long, env = "PULLS_APP", default_value = "github_prs")]
    pub pulls_app: String,

    #[arg(long, env = "COMMITS_APP", default_value = "github_commits")]
    pub commits_app: String,

    #[arg(long, env = "PULLS_ICON")]
    pub pulls_icon: Option<String>,

    #[arg(long, env = "COMMITS_ICON")]
    pub commits_icon: Option<String>,

    /// Seconds each app stays on screen
    #[arg(long, default_value_t = 10)]
    pub duration: u32,

    /// Seconds between pull request polls
    #[arg(long, env = "PULLS_INTERVAL", default_value_t = 300)]
    pub pulls_interval: u64,

    /// Seconds between commit chart polls
    #[arg(long, env = "COMMITS_INTERVAL", default_value_t = 900)]
    pub commits_interval: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Poll both sources forever (default)
    Run,
    /// Build the commit chart once and print its payload
    Chart {
        /// Also write a magnified PNG of the frame
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Pixels per display pixel in the preview
        #[arg(long, default_value_t = 16)]
        preview_scale: u32,

        /// Do not send the payload to the display
        #[arg(long)]
        no_push: bool,
    },
    /// Count open pull requests once and print the payload
    Pulls {
        /// Do not send the payload to the display
        #[arg(long)]
        no_push: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Square size picked from the window length
    Policy,
    /// Fixed column-major grid
    Grid,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// Four green levels
    Quantile,
    /// Lightness ramp of a single hue
    Hue,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum Style {
    /// One square per day
    Days,
    /// Bar of commits in the window against a goal
    Goal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_chart_subcommand() {
        let args = Args::try_parse_from([
            "git-pixel",
            "--github-user",
            "octocat",
            "--layout",
            "grid",
            "--window-days",
            "64",
            "chart",
            "--no-push",
        ])
        .unwrap();
        assert_eq!(args.layout, LayoutKind::Grid);
        assert_eq!(args.window_days, 64);
        assert!(matches!(args.command, Some(Command::Chart { no_push: true, .. })));
    }
}
