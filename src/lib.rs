//! Biosignal Analyzer - heart rate and signal analysis for wearable recordings.
//!
//! This library reads physiological sensor recordings (blood-volume pulse,
//! skin temperature, electrodermal activity) from Avro container files and
//! derives a heart-rate estimate from the pulse waveform.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Biosignal Analyzer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │  Container  │──▶│   Channel   │──▶│ Conditioner │       │
//! │  │   (Avro)    │   │  Extractor  │   │ (time axis) │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │                           │                 │               │
//! │                           ▼                 ▼               │
//! │                    ┌─────────────┐   ┌─────────────┐       │
//! │                    │ Statistics  │   │ Heart Rate  │       │
//! │                    │             │   │(filter+peak)│       │
//! │                    └─────────────┘   └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use biosignal_analyzer::{config::AnalysisConfig, core::AnalysisSession};
//! use std::path::Path;
//!
//! let session = AnalysisSession::open(Path::new("session.avro"), AnalysisConfig::default())
//!     .expect("Failed to open recording");
//!
//! match session.heart_rate() {
//!     Ok(bpm) => println!("Average BPM: {bpm:.2}"),
//!     Err(e) => eprintln!("No estimate: {e}"),
//! }
//! ```

pub mod config;
pub mod container;
pub mod core;

// Re-export key types at crate root for convenience
pub use config::{AnalysisConfig, Config, ConfigError};
pub use container::{open_recording, read_recording, ContainerError, Datum, Recording};
pub use crate::core::{
    classify_signal, estimate_heart_rate, extract_channel, heart_rate_series, summary_statistics,
    time_axis, AnalysisError, AnalysisReport, AnalysisSession, Channel, ChannelData,
    HeartRateConfig, HeartRateSeries, ReportBuilder, SessionError, SummaryStatistics,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
