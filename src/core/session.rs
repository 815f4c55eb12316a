//! Analysis session: one decoded recording plus the parameters to read it with.
//!
//! A session is the explicit context every analysis runs against. It never
//! caches derived data; each call extracts, computes and returns a fresh
//! result. Loading another file means building another session.

use crate::config::AnalysisConfig;
use crate::container::{open_recording, ContainerError, Recording};
use crate::core::channel::{extract_channel, Channel, ChannelData};
use crate::core::conditioning::{
    classify_signal, split_traces, time_series, PulseTraces, SignalClassification, TimePoint,
};
use crate::core::error::{AnalysisError, Result};
use crate::core::heart_rate::{estimate_heart_rate, heart_rate_series, HeartRateSeries};
use crate::core::stats::{pulse_summary_statistics, summary_statistics, SummaryStatistics};
use std::path::{Path, PathBuf};

/// Errors from opening a session.
#[derive(Debug)]
pub enum SessionError {
    Container(ContainerError),
    Analysis(AnalysisError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Container(e) => write!(f, "{e}"),
            SessionError::Analysis(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Container(e) => Some(e),
            SessionError::Analysis(e) => Some(e),
        }
    }
}

impl From<ContainerError> for SessionError {
    fn from(e: ContainerError) -> Self {
        SessionError::Container(e)
    }
}

impl From<AnalysisError> for SessionError {
    fn from(e: AnalysisError) -> Self {
        SessionError::Analysis(e)
    }
}

/// A single-file, single-subject analysis context.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    recording: Recording,
    config: AnalysisConfig,
    source: Option<PathBuf>,
}

impl AnalysisSession {
    /// Decode a recording file and open a session over it.
    pub fn open(path: &Path, config: AnalysisConfig) -> std::result::Result<Self, SessionError> {
        let recording = open_recording(path)?;
        tracing::info!(path = %path.display(), records = recording.len(), "opened recording");

        Ok(Self {
            recording,
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// Open a session over an already decoded recording.
    pub fn from_recording(recording: Recording, config: AnalysisConfig) -> Self {
        Self {
            recording,
            config,
            source: None,
        }
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// File name of the recording, if it came from disk.
    pub fn source_name(&self) -> Option<String> {
        self.source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn channel(&self, channel: Channel) -> Result<ChannelData> {
        extract_channel(&self.recording, channel)
    }

    /// `(seconds, value)` pairs for a channel.
    pub fn time_series(&self, channel: Channel) -> Result<Vec<TimePoint>> {
        let data = self.channel(channel)?;
        time_series(&data.values, data.sampling_frequency)
    }

    /// Mean, median and standard deviation of a channel.
    ///
    /// Lost-signal samples are left out of the pulse channel.
    pub fn summary(&self, channel: Channel) -> Result<SummaryStatistics> {
        let data = self.channel(channel)?;
        match channel {
            Channel::Pulse => {
                pulse_summary_statistics(&data.values, self.config.lost_signal_threshold)
            }
            Channel::Temperature | Channel::Electrodermal => summary_statistics(&data.values),
        }
    }

    pub fn pulse_classification(&self) -> Result<SignalClassification> {
        let data = self.channel(Channel::Pulse)?;
        Ok(classify_signal(
            &data.values,
            self.config.lost_signal_threshold,
        ))
    }

    pub fn pulse_traces(&self) -> Result<PulseTraces> {
        let data = self.channel(Channel::Pulse)?;
        split_traces(
            &data.values,
            data.sampling_frequency,
            self.config.lost_signal_threshold,
        )
    }

    /// Mean heart rate over the whole pulse channel.
    pub fn heart_rate(&self) -> Result<f64> {
        let data = self.channel(Channel::Pulse)?;
        estimate_heart_rate(
            &data.values,
            data.sampling_frequency,
            &self.config.heart_rate,
        )
    }

    /// Instantaneous heart rate over time.
    pub fn heart_rate_series(&self) -> Result<HeartRateSeries> {
        let data = self.channel(Channel::Pulse)?;
        heart_rate_series(
            &data.values,
            data.sampling_frequency,
            &self.config.heart_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Datum;
    use std::f64::consts::PI;

    fn group(values: Vec<f64>, fs: f64) -> Datum {
        Datum::group([
            ("values", Datum::numbers(&values)),
            ("samplingFrequency", Datum::Number(fs)),
        ])
    }

    fn session() -> AnalysisSession {
        let fs = 64.0;
        let bvp: Vec<f64> = (0..(fs as usize * 40))
            .map(|i| (2.0 * PI * 1.5 * i as f64 / fs).sin())
            .collect();
        let raw = Datum::group([
            ("bvp", group(bvp, fs)),
            ("temperature", group(vec![33.0, 33.5, 34.0], 1.0)),
            ("eda", group(vec![0.2, 0.4], 4.0)),
        ]);
        let recording = Recording::new(vec![Datum::group([("rawData", raw)])]);
        AnalysisSession::from_recording(recording, AnalysisConfig::default())
    }

    #[test]
    fn test_heart_rate_views_agree() {
        let session = session();
        let mean = session.heart_rate().unwrap();
        let series = session.heart_rate_series().unwrap();

        assert!((mean - 90.0).abs() < 2.0, "got {mean}");
        assert!((series.mean_bpm().unwrap() - mean).abs() < 1e-12);
    }

    #[test]
    fn test_summary_per_channel() {
        let session = session();

        let temp = session.summary(Channel::Temperature).unwrap();
        assert!((temp.mean - 33.5).abs() < 1e-12);
        assert_eq!(temp.median, 33.5);

        let pulse = session.summary(Channel::Pulse).unwrap();
        let classes = session.pulse_classification().unwrap();
        assert_eq!(pulse.count, classes.valid.len());
        assert!(!classes.lost.is_empty());
    }

    #[test]
    fn test_time_series_and_traces() {
        let session = session();

        let eda = session.time_series(Channel::Electrodermal).unwrap();
        assert_eq!(eda[1], TimePoint { t: 0.25, value: 0.4 });

        let traces = session.pulse_traces().unwrap();
        let classes = session.pulse_classification().unwrap();
        assert_eq!(traces.valid.len(), classes.valid.len());
        assert_eq!(traces.lost.len(), classes.lost.len());
    }

    #[test]
    fn test_empty_recording() {
        let session = AnalysisSession::from_recording(Recording::default(), AnalysisConfig::default());
        assert_eq!(session.heart_rate(), Err(AnalysisError::EmptyContainer));
        assert_eq!(
            session.summary(Channel::Temperature),
            Err(AnalysisError::EmptyContainer)
        );
        assert!(session.source_name().is_none());
    }

    #[test]
    fn test_open_missing_file() {
        let result = AnalysisSession::open(Path::new("/nonexistent.avro"), AnalysisConfig::default());
        assert!(matches!(result, Err(SessionError::Container(ContainerError::Io(_)))));
    }
}
