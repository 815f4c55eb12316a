//! Error taxonomy for the analysis core.
//!
//! Every variant is a deterministic validation failure. None is transient and
//! no operation retries; a failed estimate is never replaced by a default.

use crate::core::channel::Channel;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The channel, or one of its fields, is absent from the record.
    MissingChannel { channel: Channel, field: &'static str },
    /// The container holds zero records.
    EmptyContainer,
    /// Sampling frequency is not a positive finite number.
    InvalidSamplingRate(f64),
    /// The band-pass corners cannot be realised at this sampling rate.
    InvalidFilterBand { low_hz: f64, high_hz: f64, nyquist_hz: f64 },
    /// Fewer than two peaks, so no interval exists.
    InsufficientPeaks { found: usize },
    /// Two consecutive peaks share a sample index.
    DegenerateInterval { index: usize },
    /// The signal is too short for zero-phase filtering.
    SignalTooShort { len: usize, required: usize },
    /// Nothing left to summarise.
    EmptyInput,
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::MissingChannel { channel, field } => {
                write!(f, "Missing channel data: {channel} has no '{field}'")
            }
            AnalysisError::EmptyContainer => write!(f, "Container holds no records"),
            AnalysisError::InvalidSamplingRate(fs) => {
                write!(f, "Invalid sampling rate: {fs} Hz")
            }
            AnalysisError::InvalidFilterBand {
                low_hz,
                high_hz,
                nyquist_hz,
            } => write!(
                f,
                "Invalid filter band: [{low_hz}, {high_hz}] Hz with Nyquist at {nyquist_hz} Hz"
            ),
            AnalysisError::InsufficientPeaks { found } => {
                write!(f, "Insufficient peaks: found {found}, need at least 2")
            }
            AnalysisError::DegenerateInterval { index } => {
                write!(f, "Degenerate interval: peaks {index} and {} coincide", index + 1)
            }
            AnalysisError::SignalTooShort { len, required } => write!(
                f,
                "Signal too short: {len} samples, filtering needs more than {required}"
            ),
            AnalysisError::EmptyInput => write!(f, "No samples to summarise"),
        }
    }
}

impl std::error::Error for AnalysisError {}

pub type Result<T> = std::result::Result<T, AnalysisError>;
