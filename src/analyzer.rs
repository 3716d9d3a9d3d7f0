// src/analyzer.rs

use crate::error::Result;
use crate::model::*;
use chrono::{DateTime, Duration, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days between `timestamp` and `now`, rounded down.
///
/// Days are rolling 24 hour spans measured back from `now`, not calendar days.
/// Timestamps after `now` come out negative.
pub fn days_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - timestamp).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Buckets commit timestamps into a trailing window of `window_days` days.
///
/// Timestamps outside the window are dropped from the series but still
/// counted in `total`.
pub fn aggregate(
    timestamps: &[CommitTimestamp],
    now: DateTime<Utc>,
    window_days: usize,
) -> Result<Aggregate> {
    let mut series = DayBucketSeries::zeroed(window_days)?;

    for &timestamp in timestamps {
        let diff = days_ago(timestamp, now);
        if diff >= 0 && (diff as u64) < window_days as u64 {
            series.increment(window_days - 1 - diff as usize);
        }
    }

    Ok(Aggregate {
        series,
        total: timestamps.len(),
    })
}

/// Oldest instant the search has to cover for a window of `window_days`
pub fn window_start(now: DateTime<Utc>, window_days: usize) -> DateTime<Utc> {
    now - Duration::days(window_days as i64)
}
