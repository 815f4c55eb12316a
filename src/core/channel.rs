//! Channel identifiers and extraction from a decoded recording.
//!
//! Every record nests its sensor channels under a `rawData` group, one
//! sub-group per channel with a `values` array and a `samplingFrequency`.

use crate::container::{Datum, Recording};
use crate::core::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Grouping that holds the per-channel sub-records.
pub const RAW_DATA_KEY: &str = "rawData";
pub const VALUES_KEY: &str = "values";
pub const SAMPLING_FREQUENCY_KEY: &str = "samplingFrequency";

/// The physiological channels a recording carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Blood-volume pulse
    Pulse,
    /// Skin temperature
    Temperature,
    /// Electrodermal activity
    Electrodermal,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Pulse, Channel::Temperature, Channel::Electrodermal];

    /// Key of this channel's sub-group under `rawData`.
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Pulse => "bvp",
            Channel::Temperature => "temperature",
            Channel::Electrodermal => "eda",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Pulse => "BVP",
            Channel::Temperature => "Temperature",
            Channel::Electrodermal => "EDA",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Pulse => write!(f, "pulse"),
            Channel::Temperature => write!(f, "temperature"),
            Channel::Electrodermal => write!(f, "electrodermal"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pulse" | "bvp" => Ok(Channel::Pulse),
            "temperature" | "temp" => Ok(Channel::Temperature),
            "electrodermal" | "eda" => Ok(Channel::Electrodermal),
            other => Err(format!(
                "unknown channel '{other}' (expected pulse, temperature or eda)"
            )),
        }
    }
}

/// One channel's samples and its declared sampling rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    pub channel: Channel,
    /// Samples in acquisition order
    pub values: Vec<f64>,
    /// Samples per second, constant for the whole channel
    pub sampling_frequency: f64,
}

impl ChannelData {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Recording length in seconds implied by the sample count.
    pub fn duration_secs(&self) -> f64 {
        if self.sampling_frequency > 0.0 {
            self.values.len() as f64 / self.sampling_frequency
        } else {
            0.0
        }
    }
}

/// Pull a channel out of the first record of a recording.
pub fn extract_channel(recording: &Recording, channel: Channel) -> Result<ChannelData> {
    let record = recording.first().ok_or(AnalysisError::EmptyContainer)?;

    let raw_data = record
        .get(RAW_DATA_KEY)
        .ok_or(AnalysisError::MissingChannel {
            channel,
            field: RAW_DATA_KEY,
        })?;

    let group = raw_data
        .get(channel.key())
        .ok_or(AnalysisError::MissingChannel {
            channel,
            field: channel.key(),
        })?;

    let values = group
        .get(VALUES_KEY)
        .and_then(Datum::to_f64_vec)
        .ok_or(AnalysisError::MissingChannel {
            channel,
            field: VALUES_KEY,
        })?;

    let sampling_frequency = group
        .get(SAMPLING_FREQUENCY_KEY)
        .and_then(Datum::as_f64)
        .ok_or(AnalysisError::MissingChannel {
            channel,
            field: SAMPLING_FREQUENCY_KEY,
        })?;

    tracing::debug!(
        %channel,
        samples = values.len(),
        sampling_frequency,
        "extracted channel"
    );

    Ok(ChannelData {
        channel,
        values,
        sampling_frequency,
    })
}
