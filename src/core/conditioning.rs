//! Time-axis reconstruction and pulse signal classification.
//!
//! Wrist-worn optical sensors report values near zero when contact is lost or
//! the photodiode saturates. Samples inside `[-threshold, threshold]` are
//! tagged as lost signal. The threshold is a heuristic, not a derived
//! parameter; see [`crate::config::AnalysisConfig::lost_signal_threshold`].

use crate::core::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Default lost-signal threshold in sensor units.
pub const DEFAULT_LOST_SIGNAL_THRESHOLD: f64 = 0.02;

/// A single `(seconds, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub t: f64,
    pub value: f64,
}

/// Partition of sample indices into valid and lost signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalClassification {
    pub valid: Vec<usize>,
    pub lost: Vec<usize>,
}

impl SignalClassification {
    pub fn total(&self) -> usize {
        self.valid.len() + self.lost.len()
    }

    /// Fraction of samples carrying signal, 0-1. Empty input reports 0.
    pub fn valid_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.valid.len() as f64 / total as f64
        }
    }
}

/// Valid and lost portions of a pulse waveform, as time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseTraces {
    pub valid: Vec<TimePoint>,
    pub lost: Vec<TimePoint>,
}

fn check_sampling_rate(sampling_frequency: f64) -> Result<()> {
    if sampling_frequency.is_finite() && sampling_frequency > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidSamplingRate(sampling_frequency))
    }
}

/// Timestamps in seconds for `sample_count` uniformly spaced samples.
pub fn time_axis(sample_count: usize, sampling_frequency: f64) -> Result<Vec<f64>> {
    check_sampling_rate(sampling_frequency)?;
    Ok((0..sample_count)
        .map(|i| i as f64 / sampling_frequency)
        .collect())
}

/// Pair each value with its timestamp.
pub fn time_series(values: &[f64], sampling_frequency: f64) -> Result<Vec<TimePoint>> {
    let axis = time_axis(values.len(), sampling_frequency)?;
    Ok(axis
        .into_iter()
        .zip(values)
        .map(|(t, &value)| TimePoint { t, value })
        .collect())
}

/// Whether a pulse sample carries signal.
pub fn is_valid_sample(value: f64, threshold: f64) -> bool {
    value < -threshold || value > threshold
}

/// Tag every sample as valid or lost.
pub fn classify_signal(values: &[f64], threshold: f64) -> SignalClassification {
    let (valid, lost): (Vec<usize>, Vec<usize>) =
        (0..values.len()).partition(|&i| is_valid_sample(values[i], threshold));
    SignalClassification { valid, lost }
}

/// Split a pulse waveform into its valid and lost traces.
pub fn split_traces(values: &[f64], sampling_frequency: f64, threshold: f64) -> Result<PulseTraces> {
    let (valid, lost): (Vec<TimePoint>, Vec<TimePoint>) = time_series(values, sampling_frequency)?
        .into_iter()
        .partition(|point| is_valid_sample(point.value, threshold));
    Ok(PulseTraces { valid, lost })
}
