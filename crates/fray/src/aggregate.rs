//! Aggregation of repeated attack trials.
//!
//! Random strategies are only meaningful in ensemble: run the same attack
//! many times with independent random draws, then summarise the per-step
//! series as mean and standard deviation. Aggregation requires every trial
//! to have run the same number of steps; a mismatch is an input error, not
//! something to paper over.

use tracing::instrument;

use crate::attack::AttackTrace;
use crate::error::{FrayError, Result};

/// Per-step mean and standard deviation over an ensemble of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStats {
    /// Mean of the series at each step.
    pub mean: Vec<f64>,
    /// Population standard deviation at each step.
    pub std: Vec<f64>,
}

/// Element-wise mean and standard deviation over equal-length series.
///
/// The standard deviation is the population form (divide by the trial
/// count). An empty slice yields empty series.
///
/// # Errors
///
/// Returns [`FrayError::TraceLengthMismatch`] when any series differs in
/// length from the first.
#[instrument(skip(series), fields(trials = series.len()))]
pub fn mean_std(series: &[Vec<f64>]) -> Result<TraceStats> {
    let Some(first) = series.first() else {
        return Ok(TraceStats {
            mean: Vec::new(),
            std: Vec::new(),
        });
    };
    let len = first.len();
    for trial in series {
        if trial.len() != len {
            return Err(FrayError::TraceLengthMismatch {
                expected: len,
                got: trial.len(),
            });
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let count = series.len() as f64;
    let mut mean = vec![0.0; len];
    for trial in series {
        for (m, x) in mean.iter_mut().zip(trial) {
            *m += x;
        }
    }
    for m in &mut mean {
        *m /= count;
    }

    let mut std = vec![0.0; len];
    for trial in series {
        for ((s, x), m) in std.iter_mut().zip(trial).zip(&mean) {
            let d = x - m;
            *s += d * d;
        }
    }
    for s in &mut std {
        *s = (*s / count).sqrt();
    }

    Ok(TraceStats { mean, std })
}

/// Aggregate the global-efficiency series of an ensemble of traces.
///
/// # Errors
///
/// Returns [`FrayError::TraceLengthMismatch`] when the traces ran different
/// numbers of steps.
pub fn ensemble_efficiency(traces: &[AttackTrace]) -> Result<TraceStats> {
    let series: Vec<Vec<f64>> = traces.iter().map(|t| t.efficiency.clone()).collect();
    mean_std(&series)
}

/// Aggregate the largest-component series of an ensemble of traces.
///
/// # Errors
///
/// Returns [`FrayError::TraceLengthMismatch`] when the traces ran different
/// numbers of steps.
#[allow(clippy::cast_precision_loss)]
pub fn ensemble_largest_component(traces: &[AttackTrace]) -> Result<TraceStats> {
    let series: Vec<Vec<f64>> = traces
        .iter()
        .map(|t| t.largest_component.iter().map(|&n| n as f64).collect())
        .collect();
    mean_std(&series)
}

/// Aggregate the second-largest-component series of an ensemble of traces.
///
/// # Errors
///
/// Returns [`FrayError::TraceLengthMismatch`] when the traces ran different
/// numbers of steps.
#[allow(clippy::cast_precision_loss)]
pub fn ensemble_second_largest_component(traces: &[AttackTrace]) -> Result<TraceStats> {
    let series: Vec<Vec<f64>> = traces
        .iter()
        .map(|t| t.second_largest_component.iter().map(|&n| n as f64).collect())
        .collect();
    mean_std(&series)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
