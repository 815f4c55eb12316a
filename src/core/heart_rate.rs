//! Heart-rate estimation from a blood-volume-pulse waveform.
//!
//! Pipeline: zero-phase Butterworth band-pass, spaced peak detection, then
//! inter-peak intervals converted to beats per minute. The scalar estimate
//! and the rate-over-time series are two views of the same computation.

use crate::core::error::{AnalysisError, Result};
use crate::core::filter::BandPassFilter;
use crate::core::peaks::find_peaks;
use serde::{Deserialize, Serialize};

/// Tunable parameters of the estimator.
///
/// The default band of 0.5-5.0 Hz spans 30-300 BPM. The default peak spacing
/// of 0.5 s independently caps detectable rates at 120 BPM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateConfig {
    /// Lower band-pass corner (Hz)
    pub band_low_hz: f64,
    /// Upper band-pass corner (Hz); must stay below Nyquist
    pub band_high_hz: f64,
    /// Butterworth order
    pub filter_order: usize,
    /// Minimum time between two detected beats (seconds)
    pub min_peak_spacing_secs: f64,
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            band_low_hz: 0.5,
            band_high_hz: 5.0,
            filter_order: 5,
            min_peak_spacing_secs: 0.5,
        }
    }
}

impl HeartRateConfig {
    /// Minimum peak separation in samples at the given rate.
    pub fn min_peak_distance(&self, sampling_frequency: f64) -> usize {
        ((sampling_frequency * self.min_peak_spacing_secs).ceil() as usize).max(1)
    }

    /// Highest rate the spacing constraint lets through.
    pub fn max_detectable_bpm(&self) -> f64 {
        60.0 / self.min_peak_spacing_secs
    }
}

/// One instantaneous heart-rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Time of the beat closing the interval, in minutes from the start
    pub minutes: f64,
    pub bpm: f64,
}

/// Instantaneous heart rate over the recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSeries {
    /// Detected beat positions, as sample indices into the waveform
    pub peaks: Vec<usize>,
    /// One reading per consecutive pair of peaks
    pub points: Vec<RatePoint>,
}

impl HeartRateSeries {
    pub fn bpm(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.bpm).collect()
    }

    pub fn minutes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.minutes).collect()
    }

    /// Mean of the instantaneous rates, or `None` for an empty series.
    pub fn mean_bpm(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.bpm).sum::<f64>() / self.points.len() as f64)
    }
}

/// Band-pass the waveform and locate beats.
pub fn detect_beats(values: &[f64], sampling_frequency: f64, config: &HeartRateConfig) -> Result<Vec<usize>> {
    let filter = BandPassFilter::butterworth(
        config.filter_order,
        config.band_low_hz,
        config.band_high_hz,
        sampling_frequency,
    )?;

    // A flat line carries no beats; filtering it would only surface rounding noise.
    let is_flat = values.windows(2).all(|w| w[0] == w[1]);
    if is_flat {
        return Err(AnalysisError::InsufficientPeaks { found: 0 });
    }

    let filtered = filter.filtfilt(values)?;
    let peaks = find_peaks(&filtered, config.min_peak_distance(sampling_frequency));

    tracing::debug!(
        samples = values.len(),
        peaks = peaks.len(),
        "detected beats"
    );
    Ok(peaks)
}

/// Convert beat positions into instantaneous rates, one per interval.
pub fn instantaneous_rates(peaks: &[usize], sampling_frequency: f64) -> Result<Vec<f64>> {
    if !(sampling_frequency.is_finite() && sampling_frequency > 0.0) {
        return Err(AnalysisError::InvalidSamplingRate(sampling_frequency));
    }
    if peaks.len() < 2 {
        return Err(AnalysisError::InsufficientPeaks { found: peaks.len() });
    }

    peaks
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            if pair[1] <= pair[0] {
                return Err(AnalysisError::DegenerateInterval { index });
            }
            let interval_secs = (pair[1] - pair[0]) as f64 / sampling_frequency;
            Ok(60.0 / interval_secs)
        })
        .collect()
}

/// Instantaneous heart rate paired with beat times in minutes.
pub fn heart_rate_series(
    values: &[f64],
    sampling_frequency: f64,
    config: &HeartRateConfig,
) -> Result<HeartRateSeries> {
    let peaks = detect_beats(values, sampling_frequency, config)?;
    let rates = instantaneous_rates(&peaks, sampling_frequency)?;

    let points = peaks[1..]
        .iter()
        .zip(rates)
        .map(|(&peak, bpm)| RatePoint {
            minutes: peak as f64 / sampling_frequency / 60.0,
            bpm,
        })
        .collect();

    Ok(HeartRateSeries { peaks, points })
}

/// Mean heart rate in beats per minute.
pub fn estimate_heart_rate(values: &[f64], sampling_frequency: f64, config: &HeartRateConfig) -> Result<f64> {
    let series = heart_rate_series(values, sampling_frequency, config)?;
    let mean = series
        .mean_bpm()
        .ok_or(AnalysisError::InsufficientPeaks {
            found: series.peaks.len(),
        })?;
    tracing::debug!(mean_bpm = mean, beats = series.peaks.len(), "estimated heart rate");
    Ok(mean)
}
