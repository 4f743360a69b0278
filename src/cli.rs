//! CLI argument parsing with clap

use clap::Parser;
use std::path::PathBuf;

/// Install Wizard - terminal setup for a remote development environment
///
/// Collects credentials, component and deployment choices, then shows
/// live progress while the installation steps run.
#[derive(Parser, Debug)]
#[command(name = "install-wizard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short = 'C', long, env = "INSTALL_WIZARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file path (the terminal belongs to the wizard, so logs go to a file)
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_config: bool,
}
