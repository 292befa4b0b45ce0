//! Common routines for handling input data.
use anyhow::{Context, Result};
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

pub mod event_history;
pub use event_history::read_event_history;

/// Field values which indicate that a value is missing from a CSV file
const MISSING_VALUE_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a (trimmed) CSV field represents a missing value
pub fn is_missing_value(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Read a non-negative whole number which may be written with a fractional part (e.g. `1.0`)
pub fn deserialise_index<'de, D>(deserialiser: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: f64 = Deserialize::deserialize(deserialiser)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        Err(serde::de::Error::custom(format!(
            "Value {value} is not a non-negative integer"
        )))?;
    }

    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::assert_error;
    use rstest::rstest;
    use serde::Deserialize;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: String,
        value: u32,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct IndexRecord {
        #[serde(deserialize_with = "deserialise_index")]
        index: u32,
    }

    #[test]
    fn test_read_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        {
            let mut file = File::create(&file_path).unwrap();
            writeln!(file, "id = \"hello\"\nvalue = 1").unwrap();
        }

        assert_eq!(
            read_toml::<Record>(&file_path).unwrap(),
            Record {
                id: "hello".to_string(),
                value: 1,
            }
        );

        // File doesn't exist
        let missing = dir.path().join("missing.toml");
        assert_error!(read_toml::<Record>(&missing), input_err_msg(&missing));
    }

    #[rstest]
    #[case("", true)]
    #[case("NaN", true)]
    #[case("nan", true)]
    #[case("NA", true)]
    #[case("null", true)]
    #[case("None", true)]
    #[case("0", false)]
    #[case("sold", false)]
    #[case("nana", false)]
    fn test_is_missing_value(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_missing_value(value), expected);
    }

    #[rstest]
    #[case("3", Some(3))]
    #[case("3.0", Some(3))]
    #[case("0", Some(0))]
    #[case("2.5", None)]
    #[case("-1", None)]
    #[case("abc", None)]
    fn test_deserialise_index(#[case] value: &str, #[case] expected: Option<u32>) {
        let data = format!("index\n{value}\n");
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let result: Result<IndexRecord, _> = reader.deserialize().next().unwrap();
        assert_eq!(result.ok().map(|record| record.index), expected);
    }
}
