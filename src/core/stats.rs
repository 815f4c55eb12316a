//! Descriptive statistics over channel samples.

use crate::core::conditioning::is_valid_sample;
use crate::core::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

/// Mean, median and population standard deviation of a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Samples the statistics were computed over
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Summarise every sample.
pub fn summary_statistics(values: &[f64]) -> Result<SummaryStatistics> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    Ok(SummaryStatistics {
        count: values.len(),
        mean: values.iter().mean(),
        median: Data::new(values.to_vec()).median(),
        std_dev: values.iter().population_std_dev(),
    })
}

/// Summarise a pulse waveform with lost-signal samples left out.
///
/// Near-zero dropout samples would otherwise drag every statistic toward
/// zero.
pub fn pulse_summary_statistics(values: &[f64], threshold: f64) -> Result<SummaryStatistics> {
    let valid: Vec<f64> = values
        .iter()
        .copied()
        .filter(|&v| is_valid_sample(v, threshold))
        .collect();

    if valid.len() < values.len() {
        tracing::debug!(
            excluded = values.len() - valid.len(),
            "excluded lost-signal samples from pulse statistics"
        );
    }

    summary_statistics(&valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_statistics() {
        let stats = summary_statistics(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.median - 4.5).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_odd_count_median() {
        let stats = summary_statistics(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = summary_statistics(&[36.6]).unwrap();
        assert_eq!(stats.mean, 36.6);
        assert_eq!(stats.median, 36.6);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summary_statistics(&[]), Err(AnalysisError::EmptyInput));
    }

    #[test]
    fn test_pulse_statistics_exclude_lost_signal() {
        let stats = pulse_summary_statistics(&[-0.01, 0.01, 0.5, -0.5], 0.02).unwrap();
        assert_eq!(stats.count, 2);
        assert!(stats.mean.abs() < 1e-12);
        assert!(stats.median.abs() < 1e-12);
        assert!((stats.std_dev - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pulse_statistics_all_lost() {
        assert_eq!(
            pulse_summary_statistics(&[0.0, 0.01, -0.015], 0.02),
            Err(AnalysisError::EmptyInput)
        );
    }
}
