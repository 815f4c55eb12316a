//! Avro object container reader.

use crate::container::types::{Datum, Recording};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Errors that can occur while decoding a container file.
#[derive(Debug)]
pub enum ContainerError {
    Io(String),
    Decode(String),
}

impl std::fmt::Display for ContainerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerError::Io(e) => write!(f, "IO error: {e}"),
            ContainerError::Decode(e) => write!(f, "Container decode error: {e}"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Decode every record of an Avro object container.
///
/// The embedded writer schema drives decoding; no reader schema is applied.
pub fn read_recording<R: Read>(input: R) -> Result<Recording, ContainerError> {
    let reader =
        apache_avro::Reader::new(input).map_err(|e| ContainerError::Decode(e.to_string()))?;

    let mut records = Vec::new();
    for value in reader {
        let value = value.map_err(|e| ContainerError::Decode(e.to_string()))?;
        records.push(Datum::from(value));
    }

    tracing::debug!(records = records.len(), "decoded container");
    Ok(Recording::new(records))
}

/// Open and decode a container file from disk.
pub fn open_recording(path: &Path) -> Result<Recording, ContainerError> {
    let file = File::open(path).map_err(|e| ContainerError::Io(e.to_string()))?;
    read_recording(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_avro::types::{Record, Value};
    use apache_avro::{Schema, Writer};

    const SCHEMA: &str = r#"
    {
        "type": "record",
        "name": "Session",
        "fields": [
            {"name": "rawData", "type": {
                "type": "record",
                "name": "RawData",
                "fields": [
                    {"name": "temperature", "type": {
                        "type": "record",
                        "name": "Temperature",
                        "fields": [
                            {"name": "samplingFrequency", "type": "float"},
                            {"name": "values", "type": {"type": "array", "items": "float"}}
                        ]
                    }}
                ]
            }}
        ]
    }
    "#;

    fn encode(records: usize) -> Vec<u8> {
        let schema = Schema::parse_str(SCHEMA).unwrap();
        let mut writer = Writer::new(&schema, Vec::new());
        for i in 0..records {
            let mut record = Record::new(writer.schema()).unwrap();
            record.put(
                "rawData",
                Value::Record(vec![(
                    "temperature".to_string(),
                    Value::Record(vec![
                        ("samplingFrequency".to_string(), Value::Float(1.0)),
                        (
                            "values".to_string(),
                            Value::Array(vec![Value::Float(32.5), Value::Float(i as f32)]),
                        ),
                    ]),
                )]),
            );
            writer.append(record).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn test_reads_records_in_order() {
        let bytes = encode(2);
        let recording = read_recording(bytes.as_slice()).unwrap();

        assert_eq!(recording.len(), 2);
        let second = recording.records()[1]
            .path(&["rawData", "temperature", "values"])
            .and_then(Datum::to_f64_vec)
            .unwrap();
        assert_eq!(second, vec![32.5, 1.0]);
    }

    #[test]
    fn test_empty_container() {
        let bytes = encode(0);
        let recording = read_recording(bytes.as_slice()).unwrap();
        assert!(recording.is_empty());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = read_recording(&b"definitely not avro"[..]);
        assert!(matches!(result, Err(ContainerError::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = open_recording(Path::new("/nonexistent/recording.avro"));
        assert!(matches!(result, Err(ContainerError::Io(_))));
    }
}
