// src/poll.rs

use crate::analyzer::{aggregate, window_start};
use crate::config::{ChartConfig, ChartStyle, Config, DisplayConfig};
use crate::display::{chart_payload, pulls_payload, AppPayload, DisplayClient};
use crate::error::Result;
use crate::github::GithubClient;
use crate::model::{Aggregate, DrawPrimitive};
use crate::pagination::PageProgress;
use crate::renderer::{render_chart, render_goal};
use chrono::{DateTime, Utc};

/// Everything one commit poll produced
#[derive(Debug, Clone)]
pub struct CommitFrame {
    pub aggregate: Aggregate,
    pub primitives: Vec<DrawPrimitive>,
    pub pages: u32,
}

/// Draw primitives for an aggregated window in the configured style
pub fn render_frame(aggregate: &Aggregate, chart: &ChartConfig) -> Vec<DrawPrimitive> {
    match &chart.style {
        ChartStyle::Days => render_chart(&aggregate.series, &chart.layout, &chart.colors, chart.canvas),
        ChartStyle::Goal { goal, bar, colors } => render_goal(&aggregate.series, *goal, bar, *colors),
    }
}

/// The goal bar sits next to an icon, the day chart uses the whole canvas
pub fn commit_payload(frame: &CommitFrame, chart: &ChartConfig, display: &DisplayConfig) -> AppPayload {
    let icon = match chart.style {
        ChartStyle::Days => None,
        ChartStyle::Goal { .. } => display.commits_icon.clone(),
    };
    chart_payload(frame.primitives.clone(), icon, display)
}

pub async fn commit_frame<O>(
    github: &GithubClient,
    chart: &ChartConfig,
    now: DateTime<Utc>,
    observe: O,
) -> Result<CommitFrame>
where
    O: FnMut(PageProgress),
{
    let fetched = github
        .commits_since(window_start(now, chart.window_days), observe)
        .await?;
    let aggregate = aggregate(&fetched.items, now, chart.window_days)?;
    let primitives = render_frame(&aggregate, chart);
    Ok(CommitFrame {
        aggregate,
        primitives,
        pages: fetched.pages,
    })
}

/// Fetches the open pull request count and pushes it
pub struct PullsCycle {
    github: GithubClient,
    display: DisplayClient,
    config: DisplayConfig,
}

impl PullsCycle {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            github: GithubClient::new(config.github.clone())?,
            display: DisplayClient::new(&config.display)?,
            config: config.display.clone(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let count = self.github.open_pull_count().await?;
        let payload = pulls_payload(count, &self.config);
        self.display.push(&self.config.pulls_app, &payload).await?;
        log::info!("{} open pull requests for {}", count, self.github.user());
        Ok(())
    }
}

/// Fetches the commit window, renders it and pushes the frame
pub struct CommitsCycle {
    github: GithubClient,
    display: DisplayClient,
    config: DisplayConfig,
    chart: ChartConfig,
}

impl CommitsCycle {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            github: GithubClient::new(config.github.clone())?,
            display: DisplayClient::new(&config.display)?,
            config: config.display.clone(),
            chart: config.chart.clone(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let frame = commit_frame(&self.github, &self.chart, Utc::now(), |_| {}).await?;
        let payload = commit_payload(&frame, &self.chart, &self.config);
        self.display.push(&self.config.commits_app, &payload).await?;
        log::info!(
            "{} commits fetched in {} pages, {} in the last {} days, {} today",
            frame.aggregate.total,
            frame.pages,
            frame.aggregate.series.sum(),
            self.chart.window_days,
            frame.aggregate.series.today()
        );
        Ok(())
    }
}
