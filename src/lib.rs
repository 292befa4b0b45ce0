//! Tools for loading, summarising and plotting the event histories produced by customer pricing
//! simulations.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod event;
pub mod id;
pub mod input;
pub mod log;
pub mod plot;
pub mod settings;
pub mod summary;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the config folder for the program.
///
/// The folder is resolved with [`dirs::config_dir`] (e.g. `~/.config/event_history` on Linux).
pub fn get_event_history_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No known config dir for this platform, so use the current directory
        return PathBuf::from(".");
    };

    config_dir.push("event_history");
    config_dir
}
