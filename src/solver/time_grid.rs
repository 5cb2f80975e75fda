use chrono::{DateTime, Duration, Utc};

use crate::solver::error::SolverError;

const RATIO_TOLERANCE: f64 = 1e-9;

/// Upper bound on grid length. One week at 0.1 s is about six million samples.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Evenly spaced sample instants covering an observation window.
///
/// The first instant is the window start. The last one is the first multiple
/// of the step at or past the window end, so it may overshoot `end` by less
/// than one step.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    instants: Vec<DateTime<Utc>>,
}

impl TimeGrid {
    pub fn build(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_seconds: f64,
    ) -> Result<Self, SolverError> {
        if end < start {
            return Err(SolverError::InvalidRange(format!(
                "end time {} precedes start time {}",
                end, start
            )));
        }
        if !step_seconds.is_finite() || step_seconds <= 0.0 {
            return Err(SolverError::InvalidRange(format!(
                "time step must be a positive number of seconds, got {}",
                step_seconds
            )));
        }

        let window_seconds = seconds_between(start, end);
        let ratio = window_seconds / step_seconds;
        let last = if (ratio - ratio.round()).abs() < RATIO_TOLERANCE {
            ratio.round()
        } else {
            ratio.ceil()
        };
        if !last.is_finite() || last >= MAX_SAMPLES as f64 {
            return Err(SolverError::InvalidRange(format!(
                "a {} s step over {} s needs more than {} samples",
                step_seconds, window_seconds, MAX_SAMPLES
            )));
        }
        let last = last as usize;

        let instants = (0..=last)
            .map(|k| {
                offset(k as f64 * step_seconds)
                    .and_then(|d| start.checked_add_signed(d))
                    .ok_or_else(|| {
                        SolverError::InvalidRange(format!(
                            "sample {} of a {} s step is out of the representable time range",
                            k, step_seconds
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { instants })
    }

    pub fn instants(&self) -> &[DateTime<Utc>] {
        &self.instants
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn get(&self, index: usize) -> Option<DateTime<Utc>> {
        self.instants.get(index).copied()
    }
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let span = end - start;
    match span.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => span.num_milliseconds() as f64 / 1e3,
    }
}

fn offset(seconds: f64) -> Option<Duration> {
    let nanos = (seconds * 1e9).round();
    if nanos.is_finite() && nanos.abs() < i64::MAX as f64 {
        Some(Duration::nanoseconds(nanos as i64))
    } else {
        None
    }
}
