//! Integration tests for the `plot` command.
use event_history::cli::{PlotOpts, handle_plot_command};
use event_history::settings::Settings;
use std::fs;
use tempfile::tempdir;

/// An integration test for the `plot` command, including an empty event history.
#[test]
fn test_handle_plot_command() {
    unsafe { std::env::set_var("EVENT_HISTORY_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("empty.csv");
    fs::write(
        &file_path,
        "t,customer,event,customer_wtp,price,run_id,actual_group\n",
    )
    .unwrap();

    let opts = PlotOpts {
        log_dir: Some(dir.path().to_path_buf()),
        ..PlotOpts::default()
    };
    handle_plot_command(&file_path, &opts, Some(Settings::default())).unwrap();

    let svg = fs::read_to_string(dir.path().join("empty.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(!svg.contains("<circle"));
    assert!(dir.path().join("event_history_info.log").is_file());
    assert!(dir.path().join("event_history_error.log").is_file());

    // Second time will fail because the logging is already initialised
    assert_eq!(
        handle_plot_command(&file_path, &opts, Some(Settings::default()))
            .unwrap_err()
            .chain()
            .next()
            .unwrap()
            .to_string(),
        "Failed to initialise logging."
    );
}
