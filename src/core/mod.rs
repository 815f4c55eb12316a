//! Signal-processing core of the biosignal analyzer.
//!
//! This module contains:
//! - Channel extraction from decoded recordings
//! - Time-axis reconstruction and pulse signal classification
//! - Band-pass filtering, peak detection and heart-rate estimation
//! - Descriptive statistics
//! - The analysis session and report builder tying them together

pub mod channel;
pub mod conditioning;
pub mod error;
pub mod filter;
pub mod heart_rate;
pub mod peaks;
pub mod report;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use channel::{extract_channel, Channel, ChannelData};
pub use conditioning::{
    classify_signal, split_traces, time_axis, time_series, PulseTraces, SignalClassification,
    TimePoint, DEFAULT_LOST_SIGNAL_THRESHOLD,
};
pub use error::AnalysisError;
pub use filter::BandPassFilter;
pub use heart_rate::{
    estimate_heart_rate, heart_rate_series, HeartRateConfig, HeartRateSeries, RatePoint,
};
pub use peaks::find_peaks;
pub use report::{AnalysisReport, ReportBuilder, PRODUCER_NAME, REPORT_VERSION};
pub use session::{AnalysisSession, SessionError};
pub use stats::{pulse_summary_statistics, summary_statistics, SummaryStatistics};
