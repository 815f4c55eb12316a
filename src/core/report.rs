//! Serializable per-file analysis report.
//!
//! A report gathers every channel summary, the pulse signal quality and the
//! heart-rate result for one recording. A channel that fails to analyse is
//! recorded with its error message; the rest of the report is still built.

use crate::core::channel::Channel;
use crate::core::heart_rate::RatePoint;
use crate::core::session::AnalysisSession;
use crate::core::stats::SummaryStatistics;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The current report format version.
pub const REPORT_VERSION: &str = "1.0";

/// The name of this producer.
pub const PRODUCER_NAME: &str = "biosignal-analyzer";

/// Producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier (UUID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

/// Per-channel section of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: Channel,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_frequency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SummaryStatistics>,
    /// Why this channel could not be analysed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How much of the pulse channel carries signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalQuality {
    /// Fraction of valid samples (0-1)
    pub valid_fraction: f64,
    pub valid_samples: usize,
    pub lost_samples: usize,
    /// Threshold the classification used
    pub threshold: f64,
}

/// Heart-rate section of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_bpm: Option<f64>,
    /// Number of detected beats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beats: Option<usize>,
    /// Instantaneous rate over time, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<RatePoint>>,
    /// Pass band used (Hz)
    pub band_hz: [f64; 2],
    pub filter_order: usize,
    /// Ceiling implied by the minimum peak spacing
    pub max_detectable_bpm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full report for one recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub report_version: String,
    pub report_id: String,
    /// When this report was computed (RFC3339)
    pub computed_at_utc: String,
    pub producer: ReportProducer,
    /// Source file name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Records in the container; only the first is analysed
    pub record_count: usize,
    pub channels: Vec<ChannelReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_quality: Option<SignalQuality>,
    pub heart_rate: HeartRateReport,
}

impl AnalysisReport {
    /// One-line description of the heart-rate result.
    pub fn headline(&self) -> String {
        let source = self.source.as_deref().unwrap_or("recording");
        match (self.heart_rate.mean_bpm, &self.heart_rate.error) {
            (Some(bpm), _) => format!("{source}: Average BPM: {bpm:.2}"),
            (None, Some(e)) => format!("{source}: heart rate unavailable ({e})"),
            (None, None) => format!("{source}: heart rate unavailable"),
        }
    }

    pub fn channel(&self, channel: Channel) -> Option<&ChannelReport> {
        self.channels.iter().find(|c| c.channel == channel)
    }
}

/// Builder for analysis reports.
pub struct ReportBuilder {
    instance_id: Uuid,
    include_series: bool,
    source_name: Option<String>,
}

impl ReportBuilder {
    /// Create a new report builder with a unique instance ID.
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4(),
            include_series: false,
            source_name: None,
        }
    }

    /// Include the instantaneous heart-rate series in built reports.
    pub fn with_series(mut self, include_series: bool) -> Self {
        self.include_series = include_series;
        self
    }

    /// Label reports with this name instead of the session's file name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Analyse every channel of a session and assemble the report.
    pub fn build(&self, session: &AnalysisSession) -> AnalysisReport {
        let computed_at = Utc::now();
        let config = session.config();

        let channels = Channel::ALL
            .iter()
            .map(|&channel| channel_report(session, channel))
            .collect();

        let signal_quality = session
            .pulse_classification()
            .ok()
            .map(|classes| SignalQuality {
                valid_fraction: classes.valid_fraction(),
                valid_samples: classes.valid.len(),
                lost_samples: classes.lost.len(),
                threshold: config.lost_signal_threshold,
            });

        let hr_config = &config.heart_rate;
        let mut heart_rate = HeartRateReport {
            mean_bpm: None,
            beats: None,
            series: None,
            band_hz: [hr_config.band_low_hz, hr_config.band_high_hz],
            filter_order: hr_config.filter_order,
            max_detectable_bpm: hr_config.max_detectable_bpm(),
            error: None,
        };
        match session.heart_rate_series() {
            Ok(series) => {
                heart_rate.mean_bpm = series.mean_bpm();
                heart_rate.beats = Some(series.peaks.len());
                if self.include_series {
                    heart_rate.series = Some(series.points);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "heart rate unavailable");
                heart_rate.error = Some(e.to_string());
            }
        }

        AnalysisReport {
            report_version: REPORT_VERSION.to_string(),
            report_id: Uuid::new_v4().to_string(),
            computed_at_utc: computed_at.to_rfc3339(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                instance_id: Some(self.instance_id.to_string()),
            },
            source: self.source_name.clone().or_else(|| session.source_name()),
            record_count: session.recording().len(),
            channels,
            signal_quality,
            heart_rate,
        }
    }

    /// Build and serialize a report to JSON.
    pub fn build_json(&self, session: &AnalysisSession) -> Result<String, serde_json::Error> {
        let report = self.build(session);
        serde_json::to_string_pretty(&report)
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn channel_report(session: &AnalysisSession, channel: Channel) -> ChannelReport {
    let mut report = ChannelReport {
        channel,
        label: channel.label().to_string(),
        sampling_frequency: None,
        sample_count: None,
        duration_secs: None,
        statistics: None,
        error: None,
    };

    match session.channel(channel) {
        Ok(data) => {
            report.sampling_frequency = Some(data.sampling_frequency);
            report.sample_count = Some(data.len());
            report.duration_secs = Some(data.duration_secs());
        }
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    }

    match session.summary(channel) {
        Ok(stats) => report.statistics = Some(stats),
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}
