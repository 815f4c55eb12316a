//! Format-independent record tree produced by the container reader.

use std::collections::BTreeMap;

/// A node in a decoded record tree.
///
/// Numeric types of every width collapse into [`Datum::Number`]; records and
/// maps both become [`Datum::Group`].
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Datum>),
    Group(BTreeMap<String, Datum>),
}

impl Datum {
    /// Build a group from `(name, value)` pairs.
    pub fn group<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Datum)>,
    {
        Datum::Group(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a list of numbers.
    pub fn numbers(values: &[f64]) -> Self {
        Datum::List(values.iter().copied().map(Datum::Number).collect())
    }

    /// Look up a named child of a group.
    pub fn get(&self, key: &str) -> Option<&Datum> {
        match self {
            Datum::Group(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Follow a chain of group keys.
    pub fn path(&self, keys: &[&str]) -> Option<&Datum> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Datum]> {
        match self {
            Datum::List(items) => Some(items),
            _ => None,
        }
    }

    /// Read a list whose every element is numeric.
    ///
    /// Returns `None` if this is not a list or any element is not a number.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(Datum::as_f64).collect()
    }
}

impl From<apache_avro::types::Value> for Datum {
    fn from(value: apache_avro::types::Value) -> Self {
        use apache_avro::types::Value;

        match value {
            Value::Null => Datum::Null,
            Value::Boolean(b) => Datum::Bool(b),
            Value::Int(v) | Value::Date(v) | Value::TimeMillis(v) => Datum::Number(v as f64),
            Value::Long(v)
            | Value::TimeMicros(v)
            | Value::TimestampMillis(v)
            | Value::TimestampMicros(v) => Datum::Number(v as f64),
            Value::Float(v) => Datum::Number(v as f64),
            Value::Double(v) => Datum::Number(v),
            Value::String(s) | Value::Enum(_, s) => Datum::Text(s),
            Value::Bytes(b) | Value::Fixed(_, b) => Datum::Bytes(b),
            Value::Union(_, inner) => Datum::from(*inner),
            Value::Array(items) => Datum::List(items.into_iter().map(Datum::from).collect()),
            Value::Map(entries) => Datum::Group(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Datum::from(v)))
                    .collect(),
            ),
            Value::Record(fields) => Datum::Group(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Datum::from(v)))
                    .collect(),
            ),
            other => {
                tracing::warn!(value = ?other, "unsupported avro value decoded as null");
                Datum::Null
            }
        }
    }
}

/// A decoded container: the top-level records in file order.
///
/// Read-only once built. Loading another file means building a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    records: Vec<Datum>,
}

impl Recording {
    pub fn new(records: Vec<Datum>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Datum] {
        &self.records
    }

    /// The record analysis runs against. Multi-subject files are not
    /// disambiguated; the first record wins.
    pub fn first(&self) -> Option<&Datum> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_avro::types::Value;

    #[test]
    fn test_path_lookup() {
        let tree = Datum::group([(
            "rawData",
            Datum::group([("bvp", Datum::group([("samplingFrequency", Datum::Number(64.0))]))]),
        )]);

        let fs = tree.path(&["rawData", "bvp", "samplingFrequency"]);
        assert_eq!(fs.and_then(Datum::as_f64), Some(64.0));
        assert!(tree.path(&["rawData", "eda"]).is_none());
        assert!(Datum::Number(1.0).get("anything").is_none());
    }

    #[test]
    fn test_numeric_list_rejects_mixed_content() {
        let good = Datum::numbers(&[1.0, 2.0, 3.0]);
        assert_eq!(good.to_f64_vec(), Some(vec![1.0, 2.0, 3.0]));

        let mixed = Datum::List(vec![Datum::Number(1.0), Datum::Text("x".to_string())]);
        assert_eq!(mixed.to_f64_vec(), None);
        assert_eq!(Datum::Null.to_f64_vec(), None);
    }

    #[test]
    fn test_avro_value_conversion() {
        let value = Value::Record(vec![
            ("samplingFrequency".to_string(), Value::Float(4.0)),
            (
                "values".to_string(),
                Value::Array(vec![Value::Float(0.5), Value::Int(2), Value::Long(3)]),
            ),
            (
                "optional".to_string(),
                Value::Union(1, Box::new(Value::Double(7.5))),
            ),
        ]);

        let datum = Datum::from(value);
        assert_eq!(datum.get("samplingFrequency"), Some(&Datum::Number(4.0)));
        assert_eq!(
            datum.get("values").and_then(Datum::to_f64_vec),
            Some(vec![0.5, 2.0, 3.0])
        );
        assert_eq!(datum.get("optional"), Some(&Datum::Number(7.5)));
    }

    #[test]
    fn test_recording_first_record() {
        let empty = Recording::default();
        assert!(empty.is_empty());
        assert!(empty.first().is_none());

        let recording = Recording::new(vec![Datum::Number(1.0), Datum::Number(2.0)]);
        assert_eq!(recording.len(), 2);
        assert_eq!(recording.first(), Some(&Datum::Number(1.0)));
    }
}
