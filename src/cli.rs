//! The command line interface for the program.
use crate::input::read_event_history;
use crate::log;
use crate::plot::{PlotOptions, YAxisBounds, write_event_history_plot};
use crate::settings::Settings;
use crate::summary::log_summary;
use ::log::{info, warn};
use anyhow::{Context, Result, ensure};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod demo;
use demo::DemoSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The file extension for plots
const PLOT_FILE_EXTENSION: &str = "svg";

/// The command line interface for the program.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the plot command
#[derive(Args, Default)]
pub struct PlotOpts {
    /// Path for the output SVG file [default: input path with an .svg extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Whether to overwrite the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Use fixed bounds for the customer axis, as given in the settings file
    #[arg(long)]
    pub fixed_y_axis: bool,
    /// Caption for the plot
    #[arg(long)]
    pub caption: Option<String>,
    /// Directory in which to save log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Plot the events in an event history file.
    Plot {
        /// Path to the event history CSV file.
        file: PathBuf,
        /// Other plot options
        #[command(flatten)]
        opts: PlotOpts,
    },
    /// Summarise the events in an event history file.
    Summary {
        /// Path to the event history CSV file.
        file: PathBuf,
    },
    /// Manage demo event histories.
    Demo {
        /// The available subcommands for managing demos.
        #[command(subcommand)]
        subcommand: DemoSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Plot { file, opts } => handle_plot_command(&file, &opts, None),
            Self::Summary { file } => handle_summary_command(&file, None),
            Self::Demo { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and run the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ event_history --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Use the supplied settings or load them from the settings file
fn get_settings(settings: Option<Settings>) -> Result<Settings> {
    if let Some(settings) = settings {
        Ok(settings)
    } else {
        Settings::load().context("Failed to load settings.")
    }
}

/// Handle the `plot` command.
pub fn handle_plot_command(
    file_path: &Path,
    opts: &PlotOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = get_settings(settings)?;

    // Initialise program logger
    log::init(Some(&settings.log_level), opts.log_dir.as_deref())
        .context("Failed to initialise logging.")?;

    plot_file(file_path, opts, &settings)?;

    Ok(())
}

/// Handle the `summary` command.
pub fn handle_summary_command(file_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = get_settings(settings)?;

    // Initialise program logger (we won't save log files when running the summary command)
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    let (records, num_customers) =
        read_event_history(file_path).context("Failed to load event history.")?;
    info!("Loaded event history from {}", file_path.display());
    log_summary(&records, num_customers);

    Ok(())
}

/// Get the path where the plot for the given event history file will be saved
pub fn get_plot_path(file_path: &Path, opts: &PlotOpts) -> PathBuf {
    opts.output
        .clone()
        .unwrap_or_else(|| file_path.with_extension(PLOT_FILE_EXTENSION))
}

/// Load an event history and save a plot of it, returning the path to the plot.
pub fn plot_file(file_path: &Path, opts: &PlotOpts, settings: &Settings) -> Result<PathBuf> {
    let output_path = get_plot_path(file_path, opts);
    let overwrite = output_path.exists();
    ensure!(
        !overwrite || opts.overwrite || settings.overwrite,
        "Output file {} already exists. Use --overwrite to replace it.",
        output_path.display()
    );

    let (records, num_customers) =
        read_event_history(file_path).context("Failed to load event history.")?;
    info!(
        "Loaded {} events for {num_customers} customers from {}",
        records.len(),
        file_path.display()
    );

    // This setting can be overridden by command-line argument
    let y_axis_bounds = if opts.fixed_y_axis {
        YAxisBounds::Fixed {
            min: settings.y_axis_min,
            max: settings.y_axis_max,
        }
    } else {
        settings.y_axis_bounds()
    };
    let options = PlotOptions {
        y_axis_bounds,
        caption: opts.caption.clone(),
    };

    if overwrite {
        warn!("Output file will be overwritten");
    }
    write_event_history_plot(&records, &output_path, settings.plot_size(), &options)
        .with_context(|| format!("Failed to write plot: {}", output_path.display()))?;
    info!("Plot saved to {}", output_path.display());

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::write_csv_file;
    use std::fs;
    use tempfile::tempdir;

    const EVENTS: [&str; 3] = [
        "t,customer,event,customer_wtp,price,run_id,actual_group",
        "1.0,0,sold,10,4,1,1.0",
        "2.0,1,arrival,8,5,1,0.0",
    ];

    #[test]
    fn test_get_plot_path() {
        let file_path = Path::new("results/event_history.csv");
        assert_eq!(
            get_plot_path(file_path, &PlotOpts::default()),
            Path::new("results/event_history.svg")
        );

        let opts = PlotOpts {
            output: Some("plot.svg".into()),
            ..PlotOpts::default()
        };
        assert_eq!(get_plot_path(file_path, &opts), Path::new("plot.svg"));
    }

    #[test]
    fn test_plot_file() {
        let dir = tempdir().unwrap();
        let file_path = write_csv_file(dir.path(), &EVENTS);

        let output_path = plot_file(&file_path, &PlotOpts::default(), &Settings::default()).unwrap();
        assert_eq!(output_path, dir.path().join("event_history.svg"));
        let svg = fs::read_to_string(&output_path).unwrap();
        assert!(svg.contains("sold"));
    }

    #[test]
    fn test_plot_file_no_overwrite() {
        let dir = tempdir().unwrap();
        let file_path = write_csv_file(dir.path(), &EVENTS);
        let output_path = dir.path().join("event_history.svg");
        fs::write(&output_path, "").unwrap();

        let result = plot_file(&file_path, &PlotOpts::default(), &Settings::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!(
                "Output file {} already exists. Use --overwrite to replace it.",
                output_path.display()
            )
        );

        // Allowed with the option
        let opts = PlotOpts {
            overwrite: true,
            fixed_y_axis: true,
            ..PlotOpts::default()
        };
        plot_file(&file_path, &opts, &Settings::default()).unwrap();
        assert!(!fs::read_to_string(&output_path).unwrap().is_empty());
    }

    #[test]
    fn test_plot_file_missing_input() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.csv");

        let result = plot_file(&file_path, &PlotOpts::default(), &Settings::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Failed to load event history."
        );
    }
}
