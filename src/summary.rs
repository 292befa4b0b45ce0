//! Per-run totals for a loaded event history.
use crate::event::EventRecord;
use crate::units::Money;
use log::info;
use std::collections::BTreeMap;

/// Totals for a single simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// The simulation run
    pub run_id: u32,
    /// Number of events of any kind
    pub num_events: usize,
    /// Number of completed sales
    pub num_sales: usize,
    /// Total consumer surplus
    pub welfare: Money,
    /// Total seller revenue
    pub profit: Money,
}

/// Summarise events by run, ordered by run ID
pub fn summarise_runs(records: &[EventRecord]) -> Vec<RunSummary> {
    let mut runs: BTreeMap<u32, RunSummary> = BTreeMap::new();
    for record in records {
        let run = runs.entry(record.run_id).or_insert_with(|| RunSummary {
            run_id: record.run_id,
            ..Default::default()
        });

        run.num_events += 1;
        if record.event.is_sold() {
            run.num_sales += 1;
        }
        run.welfare += record.welfare;
        run.profit += record.profit;
    }

    runs.into_values().collect()
}

/// Write a summary of an event history to the log
pub fn log_summary(records: &[EventRecord], num_customers: u32) {
    info!(
        "Event history contains {} events for {num_customers} customers",
        records.len()
    );

    for run in summarise_runs(records) {
        info!(
            "Run {}: {} events, {} sales, welfare {}, profit {}",
            run.run_id, run.num_events, run.num_sales, run.welfare, run.profit
        );
    }
}
