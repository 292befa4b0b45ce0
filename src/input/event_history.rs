//! Code for reading event histories from CSV files.
use super::{deserialise_index, input_err_msg, is_missing_value};
use crate::event::{CustomerGroup, EventRecord};
use crate::units::Money;
use anyhow::{Context, Result, ensure};
use csv::StringRecord;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Columns which every event history file must have
const REQUIRED_COLUMNS: [&str; 7] = [
    "t",
    "customer",
    "event",
    "customer_wtp",
    "price",
    "run_id",
    "actual_group",
];

#[derive(Debug, Deserialize, PartialEq)]
struct EventRecordRaw {
    t: f64,
    #[serde(deserialize_with = "deserialise_index")]
    customer: u32,
    event: String,
    customer_wtp: f64,
    price: f64,
    #[serde(deserialize_with = "deserialise_index")]
    run_id: u32,
    actual_group: f64,
}

/// Read an event history from a CSV file.
///
/// Rows with a missing value in any column are dropped. The remaining rows are sorted by event
/// label and `welfare` and `profit` are calculated for each.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
///
/// # Returns
///
/// The loaded events and the number of customers (i.e. the largest customer index plus one).
pub fn read_event_history(file_path: &Path) -> Result<(Vec<EventRecord>, u32)> {
    let rows = read_event_history_raw(file_path).with_context(|| input_err_msg(file_path))?;
    let (records, num_customers) =
        process_event_history(rows).with_context(|| input_err_msg(file_path))?;
    debug!(
        "Read {} events for {num_customers} customers from {}",
        records.len(),
        file_path.display()
    );

    Ok((records, num_customers))
}

/// Read the complete rows of an event history CSV file
fn read_event_history_raw(file_path: &Path) -> Result<Vec<EventRecordRaw>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file_path)?;
    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    read_complete_rows(reader.records(), &headers)
}

/// Check that all required columns appear in the header row
fn check_required_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        ensure!(
            headers.iter().any(|header| header == column),
            "Missing required column: {column}"
        );
    }

    Ok(())
}

/// Parse rows, skipping any which have a missing value in any column
fn read_complete_rows<I>(records: I, headers: &StringRecord) -> Result<Vec<EventRecordRaw>>
where
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    let mut rows = Vec::new();
    let mut num_dropped = 0;
    for record in records {
        let record = record?;
        if record.iter().any(is_missing_value) {
            num_dropped += 1;
            continue;
        }

        let row: EventRecordRaw = record.deserialize(Some(headers)).with_context(|| {
            let line = record.position().map_or(0, csv::Position::line);
            format!("Invalid event on line {line}")
        })?;
        rows.push(row);
    }

    if num_dropped > 0 {
        debug!("Dropped {num_dropped} rows with missing values");
    }

    Ok(rows)
}

/// Sort rows by event and calculate derived fields
fn process_event_history(mut rows: Vec<EventRecordRaw>) -> Result<(Vec<EventRecord>, u32)> {
    // NB: Sort is stable, so events of the same kind keep their file order
    rows.sort_by(|a, b| a.event.cmp(&b.event));

    let num_customers = match rows.iter().map(|row| row.customer).max() {
        Some(max) => max
            .checked_add(1)
            .with_context(|| format!("Customer index {max} is too large"))?,
        None => 0,
    };
    let records = rows
        .into_iter()
        .map(|row| {
            EventRecord::new(
                row.t,
                row.customer.to_string().into(),
                row.event.into(),
                Money(row.customer_wtp),
                Money(row.price),
                row.run_id,
                CustomerGroup::from_code(row.actual_group),
            )
        })
        .collect();

    Ok((records, num_customers))
}
