// src/scheduler.rs

use crate::config::Config;
use crate::error::Result;
use crate::poll::{CommitsCycle, PullsCycle};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Runs `job` immediately and then every `every`, forever.
///
/// A failing run is logged and the task carries on with its next tick.
pub fn spawn_periodic<F, Fut>(name: &'static str, every: Duration, mut job: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            log::debug!("{} cycle starting", name);
            match job().await {
                Ok(()) => {}
                Err(err) if err.is_transport() => log::warn!("{} cycle failed, retrying next tick: {}", name, err),
                Err(err) => log::error!("{} cycle failed: {}", name, err),
            }
        }
    })
}

/// Polls pull requests and commits on their own timers until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    let pulls = Arc::new(PullsCycle::new(&config)?);
    let commits = Arc::new(CommitsCycle::new(&config)?);

    log::info!(
        "polling pull requests every {}s and commits every {}s",
        config.schedule.pulls_every.as_secs(),
        config.schedule.commits_every.as_secs()
    );

    let pulls_task = spawn_periodic("pulls", config.schedule.pulls_every, move || {
        let cycle = Arc::clone(&pulls);
        async move { cycle.run().await }
    });
    let commits_task = spawn_periodic("commits", config.schedule.commits_every, move || {
        let cycle = Arc::clone(&commits);
        async move { cycle.run().await }
    });

    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for Ctrl-C: {}", err);
    }
    log::info!("shutting down");
    pulls_task.abort();
    commits_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn failures_do_not_stop_the_timer() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let task = spawn_periodic("flaky", Duration::from_secs(60), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n % 2 == 0 {
                    Err(Error::Config("boom".into()))
                } else {
                    Ok(())
                }
            }
        });

        tokio::time::sleep(Duration::from_secs(60 * 3 + 30)).await;
        task.abort();
        assert_eq!(runs.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn one_failing_task_leaves_the_other_alone() {
        let good = Arc::new(AtomicUsize::new(0));
        let good_counter = Arc::clone(&good);

        let failing = spawn_periodic("failing", Duration::from_secs(10), || async {
            Err(Error::Config("always".into()))
        });
        let healthy = spawn_periodic("healthy", Duration::from_secs(10), move || {
            good_counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        });

        tokio::time::sleep(Duration::from_secs(45)).await;
        failing.abort();
        healthy.abort();
        assert_eq!(good.load(Ordering::SeqCst), 5);
    }
}
