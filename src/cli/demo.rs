//! Code related to the bundled demo event histories and the CLI commands for interacting with them.
use super::{PlotOpts, handle_plot_command};
use crate::settings::Settings;
use anyhow::{Context, Result, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo event histories.
static DEMOS_DIR: Dir = include_dir!("demos");

/// The name of the event history file in each demo
pub const EVENT_HISTORY_FILE_NAME: &str = "event_history.csv";

/// The available subcommands for managing demos.
#[derive(Subcommand)]
pub enum DemoSubcommands {
    /// List available demos.
    List,
    /// Provide information about the specified demo.
    Info {
        /// The name of the demo.
        name: String,
    },
    /// Extract a demo to a new directory.
    Extract {
        /// The name of the demo to extract.
        name: String,
        /// The destination folder for the demo.
        new_path: Option<PathBuf>,
    },
    /// Plot a demo event history.
    Plot {
        /// The name of the demo to plot.
        name: String,
        /// Other plot options
        #[command(flatten)]
        opts: PlotOpts,
    },
}

impl DemoSubcommands {
    /// Execute the supplied demo subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List => handle_demo_list_command(),
            Self::Info { name } => handle_demo_info_command(&name)?,
            Self::Extract {
                name,
                new_path: dest,
            } => handle_demo_extract_command(&name, dest.as_deref())?,
            Self::Plot { name, opts } => handle_demo_plot_command(&name, opts, None)?,
        }

        Ok(())
    }
}

/// Names of the bundled demos
pub fn demo_names() -> impl Iterator<Item = &'static str> {
    DEMOS_DIR
        .dirs()
        .filter_map(|dir| dir.path().file_name()?.to_str())
}

/// Handle the `demo list` command.
fn handle_demo_list_command() {
    for name in demo_names() {
        println!("{name}");
    }
}

/// Handle the `demo info` command.
fn handle_demo_info_command(name: &str) -> Result<()> {
    let path: PathBuf = [name, "README.txt"].iter().collect();
    let readme = DEMOS_DIR
        .get_file(path)
        .context("Demo not found.")?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")?;

    print!("{readme}");

    Ok(())
}

/// Handle the `demo extract` command
fn handle_demo_extract_command(name: &str, dest: Option<&Path>) -> Result<()> {
    let dest = dest.unwrap_or(Path::new(name));
    extract_demo(name, dest)
}

/// Extract the specified demo to a new directory
pub fn extract_demo(name: &str, new_path: &Path) -> Result<()> {
    // Find the subdirectory in DEMOS_DIR whose name matches `name`.
    let sub_dir = DEMOS_DIR.get_dir(name).context("Demo not found.")?;

    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    // Copy the contents of the subdirectory to the destination
    fs::create_dir(new_path)?;
    for entry in sub_dir.entries() {
        match entry {
            DirEntry::Dir(_) => panic!("Subdirectories in demos not supported"),
            DirEntry::File(f) => {
                let file_name = f.path().file_name().context("Invalid file name in demo")?;
                fs::write(new_path.join(file_name), f.contents())?;
            }
        }
    }

    Ok(())
}

/// Handle the `demo plot` command.
///
/// Unless an output path is given, the plot is saved as `<name>.svg` in the current directory.
pub fn handle_demo_plot_command(
    name: &str,
    mut opts: PlotOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let demo_path = temp_dir.path().join(name);
    extract_demo(name, &demo_path)?;

    if opts.output.is_none() {
        opts.output = Some(PathBuf::from(name).with_extension("svg"));
    }

    handle_plot_command(&demo_path.join(EVENT_HISTORY_FILE_NAME), &opts, settings)
}
