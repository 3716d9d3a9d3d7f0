// src/main.rs

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use git_pixel::cli::{Args, Command};
use git_pixel::config::Config;
use git_pixel::display::{pulls_payload, DisplayClient};
use git_pixel::github::GithubClient;
use git_pixel::{poll, renderer, scheduler};
use indicatif::ProgressBar;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_args(&args)?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => scheduler::run(config).await?,
        Command::Chart {
            preview,
            preview_scale,
            no_push,
        } => {
            let start_time = Instant::now();
            let github = GithubClient::new(config.github.clone())?;

            let bar = ProgressBar::new_spinner();
            bar.enable_steady_tick(Duration::from_millis(120));
            bar.set_message("Fetching commits");
            let frame = poll::commit_frame(&github, &config.chart, Utc::now(), |progress| {
                bar.set_message(format!(
                    "Fetched page {} ({} commits so far)",
                    progress.page, progress.accumulated
                ));
            })
            .await
            .context("fetching commits")?;
            bar.finish_with_message(format!("Fetched {} commits in {:.2?}", frame.aggregate.total, start_time.elapsed()));

            log::info!(
                "{} of {} commits fall in the last {} days: {:?}",
                frame.aggregate.series.sum(),
                frame.aggregate.total,
                config.chart.window_days,
                frame.aggregate.series.as_slice()
            );

            let payload = poll::commit_payload(&frame, &config.chart, &config.display);
            println!("{}", serde_json::to_string_pretty(&payload)?);

            if let Some(path) = preview {
                renderer::save_preview(&frame.primitives, config.chart.canvas, preview_scale, &path)
                    .with_context(|| format!("writing preview to {}", path.display()))?;
                log::info!("preview written to {}", path.display());
            }
            if !no_push {
                DisplayClient::new(&config.display)?
                    .push(&config.display.commits_app, &payload)
                    .await
                    .context("pushing commit chart")?;
            }
        }
        Command::Pulls { no_push } => {
            let github = GithubClient::new(config.github.clone())?;
            let count = github.open_pull_count().await.context("counting pull requests")?;
            let payload = pulls_payload(count, &config.display);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            if !no_push {
                DisplayClient::new(&config.display)?
                    .push(&config.display.pulls_app, &payload)
                    .await
                    .context("pushing pull request count")?;
            }
        }
    }
    Ok(())
}
