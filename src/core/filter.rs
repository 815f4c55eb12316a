//! Butterworth band-pass design and zero-phase filtering.
//!
//! Design and forward-backward application are delegated to `sci-rs`, which
//! follows scipy's `butter(..., output="sos")` and `sosfiltfilt`. The cascade
//! is kept as second-order sections: high orders at low normalised cutoffs
//! are numerically unusable as a single transfer-function polynomial.
//!
//! `sci-rs` panics on arguments it cannot design for, so every constraint is
//! checked here first and reported as an [`AnalysisError`].

use crate::core::error::{AnalysisError, Result};
use sci_rs::signal::filter::design::{
    butter_dyn, DigitalFilter, FilterBandType, FilterOutputType, Sos,
};
use sci_rs::signal::filter::sosfiltfilt_dyn;

/// A Butterworth band-pass filter as a cascade of second-order sections.
#[derive(Debug, Clone)]
pub struct BandPassFilter {
    sections: Vec<Sos<f64>>,
}

impl BandPassFilter {
    /// Design an order-`order` Butterworth band-pass for `[low_hz, high_hz]`.
    ///
    /// The resulting cascade has `order` sections. Fails with
    /// `InvalidFilterBand` when the band is empty, starts at or below zero,
    /// or reaches Nyquist; a zero order is rejected the same way.
    pub fn butterworth(order: usize, low_hz: f64, high_hz: f64, sampling_frequency: f64) -> Result<Self> {
        if !(sampling_frequency.is_finite() && sampling_frequency > 0.0) {
            return Err(AnalysisError::InvalidSamplingRate(sampling_frequency));
        }

        let nyquist = sampling_frequency / 2.0;
        let band_ok = order > 0 && low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist;
        if !band_ok {
            return Err(AnalysisError::InvalidFilterBand {
                low_hz,
                high_hz,
                nyquist_hz: nyquist,
            });
        }

        let designed = butter_dyn(
            order,
            vec![low_hz, high_hz],
            Some(FilterBandType::Bandpass),
            Some(false),
            Some(FilterOutputType::Sos),
            Some(sampling_frequency),
        );
        let sections = match designed {
            DigitalFilter::Sos(sos) => sos.sos,
            _ => {
                return Err(AnalysisError::InvalidFilterBand {
                    low_hz,
                    high_hz,
                    nyquist_hz: nyquist,
                })
            }
        };

        tracing::debug!(
            order,
            low_hz,
            high_hz,
            sampling_frequency,
            sections = sections.len(),
            "designed band-pass filter"
        );

        Ok(Self { sections })
    }

    /// Samples of odd extension added to each end before filtering.
    ///
    /// Sections whose numerator and denominator both end in zero are
    /// first-order and contribute one tap instead of two.
    pub fn pad_len(&self) -> usize {
        let b_zeros = self.sections.iter().filter(|s| s.b[2] == 0.0).count();
        let a_zeros = self.sections.iter().filter(|s| s.a[2] == 0.0).count();
        3 * (2 * self.sections.len() + 1 - b_zeros.min(a_zeros))
    }

    /// Forward-backward filtering with no phase shift.
    ///
    /// The output has the same length as the input. Inputs no longer than
    /// [`pad_len`](Self::pad_len) fail with `SignalTooShort`.
    pub fn filtfilt(&self, input: &[f64]) -> Result<Vec<f64>> {
        let pad = self.pad_len();
        if input.len() <= pad {
            return Err(AnalysisError::SignalTooShort {
                len: input.len(),
                required: pad,
            });
        }

        Ok(sosfiltfilt_dyn(input.iter(), &self.sections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Magnitude response of the cascade at `freq_hz`.
    fn gain_at(filter: &BandPassFilter, freq_hz: f64, fs: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / fs;
        let (c1, s1) = (omega.cos(), omega.sin());
        let (c2, s2) = ((2.0 * omega).cos(), (2.0 * omega).sin());

        // Each polynomial evaluated at z^-1 = e^{-j omega}
        let magnitude = |c: &[f64; 3]| {
            let re = c[0] + c[1] * c1 + c[2] * c2;
            let im = c[1] * s1 + c[2] * s2;
            re.hypot(im)
        };

        filter
            .sections
            .iter()
            .map(|s| magnitude(&s.b) / magnitude(&s.a))
            .product()
    }

    fn sine(freq_hz: f64, fs: f64, secs: f64) -> Vec<f64> {
        let n = (fs * secs) as usize;
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / fs).sin())
            .collect()
    }

    fn rms(values: &[f64]) -> f64 {
        (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
    }

    #[test]
    fn test_design_produces_stable_sections() {
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, 64.0).unwrap();
        assert_eq!(filter.sections.len(), 5);
        assert_eq!(filter.pad_len(), 33);

        for section in &filter.sections {
            // Roots of z^2 + a1 z + a2 lie inside the unit circle iff
            // |a2| < 1 and |a1| < 1 + a2.
            assert!(section.a[2].abs() < 1.0);
            assert!(section.a[1].abs() < 1.0 + section.a[2]);
        }
    }

    #[test]
    fn test_magnitude_response() {
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, 64.0).unwrap();

        // Corners sit at -3 dB
        assert!((gain_at(&filter, 0.5, 64.0) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((gain_at(&filter, 5.0, 64.0) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);

        assert!(gain_at(&filter, 1.2, 64.0) > 0.99);
        assert!(gain_at(&filter, 0.05, 64.0) < 1e-3);
        assert!(gain_at(&filter, 20.0, 64.0) < 1e-3);
    }

    #[test]
    fn test_invalid_bands() {
        // Nyquist of 4 Hz is below the 5 Hz corner
        assert!(matches!(
            BandPassFilter::butterworth(5, 0.5, 5.0, 8.0),
            Err(AnalysisError::InvalidFilterBand { nyquist_hz, .. }) if nyquist_hz == 4.0
        ));
        assert!(BandPassFilter::butterworth(5, 0.5, 5.0, 10.0).is_err());
        assert!(BandPassFilter::butterworth(5, 5.0, 0.5, 64.0).is_err());
        assert!(BandPassFilter::butterworth(5, 0.0, 5.0, 64.0).is_err());
        assert!(BandPassFilter::butterworth(0, 0.5, 5.0, 64.0).is_err());
        assert!(matches!(
            BandPassFilter::butterworth(5, 0.5, 5.0, 0.0),
            Err(AnalysisError::InvalidSamplingRate(fs)) if fs == 0.0
        ));
    }

    #[test]
    fn test_filtfilt_keeps_passband_and_phase() {
        let fs = 64.0;
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, fs).unwrap();
        let input = sine(1.2, fs, 30.0);
        let output = filter.filtfilt(&input).unwrap();

        assert_eq!(output.len(), input.len());

        // Away from the edges the waveform passes unchanged and unshifted
        for i in 640..1280 {
            assert!(
                (output[i] - input[i]).abs() < 0.02,
                "sample {i}: {} vs {}",
                output[i],
                input[i]
            );
        }
    }

    #[test]
    fn test_filtfilt_rejects_out_of_band() {
        let fs = 64.0;
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, fs).unwrap();

        let drift: Vec<f64> = sine(0.02, fs, 60.0).iter().map(|v| v + 3.0).collect();
        let output = filter.filtfilt(&drift).unwrap();
        assert!(rms(&output[640..3200]) < 0.01);

        let hum = sine(25.0, fs, 60.0);
        let output = filter.filtfilt(&hum).unwrap();
        assert!(rms(&output[640..3200]) < 1e-3);
    }

    #[test]
    fn test_filtfilt_removes_drift_under_pulse() {
        let fs = 64.0;
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, fs).unwrap();
        let pulse = sine(1.2, fs, 60.0);
        let drifting: Vec<f64> = pulse
            .iter()
            .zip(sine(0.02, fs, 60.0))
            .map(|(p, d)| p + 2.0 * d + 1.0)
            .collect();

        let output = filter.filtfilt(&drifting).unwrap();
        let residual: Vec<f64> = output[640..3200]
            .iter()
            .zip(&pulse[640..3200])
            .map(|(o, p)| o - p)
            .collect();
        assert!(rms(&residual) < 0.02);
    }

    #[test]
    fn test_filtfilt_too_short() {
        let filter = BandPassFilter::butterworth(5, 0.5, 5.0, 64.0).unwrap();
        assert_eq!(
            filter.filtfilt(&[0.0; 33]),
            Err(AnalysisError::SignalTooShort {
                len: 33,
                required: 33
            })
        );
        assert!(filter.filtfilt(&[0.0; 34]).is_ok());
        assert!(filter.filtfilt(&[]).is_err());
    }
}
