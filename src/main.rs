//! winlist - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use winlist::config::CliOverrides;
use winlist::virtual_list::IndexStrategy;

/// Scroll through large text collections with windowed rendering
#[derive(Parser, Debug)]
#[command(name = "winlist")]
#[command(version)]
#[command(about = "Terminal list viewer that renders only the visible window of items")]
pub struct Args {
    /// Text file of blank-line-separated items (reads stdin if not provided)
    pub file: Option<PathBuf>,

    /// Show N synthetic items instead of reading input
    #[arg(long, value_name = "N")]
    pub generate: Option<usize>,

    /// Estimated item height in rows before measurement
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub estimate: Option<u32>,

    /// Items rendered beyond each viewport edge
    #[arg(long)]
    pub overscan: Option<usize>,

    /// Ignore height corrections up to this many rows
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Offset index strategy
    #[arg(long, value_parser = ["dense", "fenwick"])]
    pub strategy: Option<String>,

    /// Hide the scrollbar
    #[arg(long)]
    pub no_scrollbar: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// CLI values that override config file and environment.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            estimate_size: self.estimate,
            overscan: self.overscan,
            remeasure_threshold: self.threshold,
            // Validated by clap's value_parser, so parsing cannot fail
            index_strategy: self
                .strategy
                .as_deref()
                .and_then(|s| s.parse::<IndexStrategy>().ok()),
            show_scrollbar: self.no_scrollbar.then_some(false),
        }
    }
}

fn main() -> Result<(), winlist::model::AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = winlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = winlist::config::merge_config(config_file);
        let with_env = winlist::config::apply_env_overrides(merged);
        winlist::config::apply_cli_overrides(with_env, args.overrides())
    };

    winlist::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let input_source = winlist::source::detect_input_source(args.file.clone(), args.generate)?;

    let colors = winlist::view::ColorConfig::from_env_and_args(args.no_color);
    let settings = winlist::view::ViewSettings::from_config(&config, colors);

    winlist::view::run_with_source(input_source, settings)?;

    Ok(())
}
