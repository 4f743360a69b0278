//! Install Wizard - interactive setup for a remote development environment
//!
//! Runs the credentials, components, deployment and install screens in the
//! terminal, then prints a short summary once the terminal is restored.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use crossterm::tty::IsTty;
use install_wizard::{Cli, Error, InstallAnswers, InstallWizard, Theme, WizardApp, WizardConfig};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! 终端恢复后的摘要输出

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI 主题颜色
    pub struct CliTheme;

    impl CliTheme {
        /// 成功颜色（绿色）
        pub const SUCCESS: Color = Color::Green;
        /// 错误颜色（红色）
        pub const ERROR: Color = Color::Red;
        /// 提示颜色（暗灰色）
        pub const HINT: Color = Color::DarkGrey;
    }

    /// 打印分隔线
    pub fn print_separator() {
        let _ = stdout().execute(Print(format!("{}\n", "─".repeat(60))));
    }

    /// 打印统计项
    pub fn print_stat(key: &str, value: &str, color: Color) {
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(style(key).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(style(value).with(color).bold()));
        let _ = stdout().execute(Print("\n"));
    }

    /// 打印日志文件路径
    pub fn print_log_path(path: &str) {
        let _ = stdout().execute(Print(style("  Log file: ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", path)));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", WizardConfig::sample_config());
        return Ok(());
    }

    if !std::io::stdout().is_tty() {
        return Err(Error::NotInteractive.into());
    }

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let _guard = setup_file_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Install wizard starting"
    );

    let config = load_config(&cli)?;
    info!(?config, "Configuration loaded");

    let theme = Theme::default();
    let mut app = WizardApp::new(InstallWizard::new(config, theme))?;
    app.set_theme(theme);
    let wizard = app.run()?;

    let answers = wizard.answers();
    info!(
        completed = answers.completed,
        failed = answers.failed,
        finished = answers.finished,
        "Wizard closed"
    );
    print_summary(&answers, &log_path);

    Ok(())
}

/// Log file next to the working directory, named by start time
fn default_log_path() -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("Log").join(format!("install_{}.log", timestamp))
}

/// Load configuration from file, or fall back to defaults
fn load_config(cli: &Cli) -> Result<WizardConfig> {
    match &cli.config {
        Some(path) => info!(config_file = %path.display(), "Loading configuration from file"),
        None => info!("No config file given, using defaults"),
    }
    Ok(WizardConfig::load_or_default(cli.config.as_deref())?)
}

/// Setup logging (file only: the terminal belongs to the wizard)
fn setup_file_logging(cli: &Cli, log_path: &Path) -> Result<WorkerGuard> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .init();
    }

    Ok(guard)
}

fn print_summary(answers: &InstallAnswers, log_path: &Path) {
    use cli_output::*;

    print_separator();
    if answers.finished {
        print_stat("Steps completed", &answers.completed.to_string(), CliTheme::SUCCESS);
        let failed_color = if answers.failed > 0 {
            CliTheme::ERROR
        } else {
            CliTheme::SUCCESS
        };
        print_stat("Steps failed", &answers.failed.to_string(), failed_color);
    } else {
        print_stat("Installation", "cancelled", CliTheme::ERROR);
    }
    print_separator();
    print_log_path(&log_path.display().to_string());
}
