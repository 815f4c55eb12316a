//! Container decoding for sensor recordings.
//!
//! Recordings arrive as Avro object container files. This module turns such a
//! file into a [`Recording`]: an ordered list of record trees made of
//! [`Datum`] values. Nothing downstream depends on the Avro encoding itself.

pub mod reader;
pub mod types;

// Re-export commonly used types
pub use reader::{open_recording, read_recording, ContainerError};
pub use types::{Datum, Recording};
