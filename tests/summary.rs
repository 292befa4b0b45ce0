//! Integration tests for the `summary` command.
use event_history::cli::handle_summary_command;
use event_history::settings::Settings;
use std::path::{Path, PathBuf};

/// Get the path to the demo event history.
fn get_demo_file() -> PathBuf {
    Path::new(file!())
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join("simple")
        .join("event_history.csv")
}

/// An integration test for the `summary` command.
#[test]
fn test_handle_summary_command() {
    unsafe { std::env::set_var("EVENT_HISTORY_LOG_LEVEL", "off") };
    handle_summary_command(&get_demo_file(), Some(Settings::default())).unwrap();
}
