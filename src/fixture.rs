//! Fixtures for tests

use crate::event::{CustomerGroup, EventRecord};
use crate::units::Money;
use rstest::fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Write lines to `event_history.csv` in the given folder, returning the file path
pub fn write_csv_file(dir_path: &Path, lines: &[&str]) -> PathBuf {
    let file_path = dir_path.join("event_history.csv");
    let mut contents = lines.join("\n");
    contents.push('\n');
    fs::write(&file_path, contents).unwrap();
    file_path
}

/// Create an [`EventRecord`] with the given customer, event and prices
pub fn event_record(
    t: f64,
    customer: &str,
    event: &str,
    customer_wtp: f64,
    price: f64,
    run_id: u32,
) -> EventRecord {
    EventRecord::new(
        t,
        customer.into(),
        event.into(),
        Money(customer_wtp),
        Money(price),
        run_id,
        CustomerGroup::Mid,
    )
}

#[fixture]
pub fn records() -> Vec<EventRecord> {
    vec![
        event_record(0.5, "0", "arrival", 10.0, 4.0, 1),
        event_record(1.5, "1", "arrival", 6.0, 7.0, 1),
        event_record(2.0, "0", "sold", 10.0, 4.0, 1),
        event_record(3.0, "1", "leave", 6.0, 7.0, 1),
        event_record(0.2, "2", "arrival", 8.0, 5.0, 2),
        event_record(1.2, "2", "sold", 8.0, 5.0, 2),
    ]
}
