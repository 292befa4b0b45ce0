//! Provides the main entry point to the program.
use event_history::cli::run_cli;
use event_history::log;
use human_panic::{metadata, setup_panic};

fn main() {
    setup_panic!(metadata!().support("Open an issue on the project's issue tracker"));

    if let Err(err) = run_cli() {
        if log::is_logger_initialised() {
            ::log::error!("{err:?}");
        } else {
            eprintln!("Error: {err:?}");
        }

        // Terminate program, signalling an error
        std::process::exit(1);
    }
}
