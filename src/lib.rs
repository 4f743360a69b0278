//! Install Wizard - terminal widgets for a remote development environment installer
//!
//! This library provides the interactive pieces of the installation
//! wizard, built on ratatui with a shared init / update / view contract:
//! - Text forms with focus navigation, masked secrets and validation
//! - Checkbox groups with bulk select and disabled items
//! - Radio groups whose cursor skips disabled options
//! - A multi-step progress tracker with timing and a rolling log tail
//! - A terminal host and the installer's screen sequence

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod tui;

pub use cli::Cli;
pub use config::{ConfigError, WizardConfig};
pub use error::{Error, Result};
pub use installer::{InstallAnswers, InstallWizard};
pub use tui::{Command, Model, Theme, TuiEvent, WizardApp};
