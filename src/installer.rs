//! Installation wizard screens
//!
//! Seeds the widgets with the remote development environment's fields,
//! components, deployment variants and install steps, and sequences them
//! into one root [`Model`]. The install screen is driven by a simulated
//! step runner: the real work lives in the shell installer, not here.

use crate::config::WizardConfig;
use crate::tui::event::TuiEvent;
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use crate::tui::widgets::validators::{anthropic_api_key, min_length, tailscale_auth_key};
use crate::tui::widgets::{
    CheckboxGroup, CheckboxItem, Form, FormField, ProgressStep, ProgressTracker, RadioGroup,
    RadioItem, StepStatus,
};
use ratatui::text::{Line, Text};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Form label for the machine name
pub const HOSTNAME: &str = "Hostname";
/// Form label for the Tailscale auth key
pub const TAILSCALE_KEY: &str = "Tailscale auth key";
/// Form label for the Anthropic API key
pub const ANTHROPIC_KEY: &str = "Anthropic API key";

/// Optional components, in checkbox order
const COMPONENTS: [(&str, &str); 5] = [
    ("Docker Engine", "Container runtime for the dev environment"),
    ("Tailscale", "Private network access without open ports"),
    ("SSH hardening", "Key-only auth, no root login, fail2ban"),
    ("Assistant CLI", "AI coding assistant preinstalled in the container"),
    ("GPU support", "No compatible GPU detected"),
];
const COMPONENT_ASSISTANT: usize = 3;
const COMPONENT_GPU: usize = 4;

/// Install steps and the component each belongs to
const INSTALL_STEPS: [(&str, &str, Option<usize>); 8] = [
    ("Check prerequisites", "Docker, disk space, ports", None),
    ("Pull images", "Download container images", Some(0)),
    ("Configure Tailscale", "Join the tailnet", Some(1)),
    ("Harden SSH", "Apply sshd policy", Some(2)),
    ("Install assistant CLI", "Install and authenticate", Some(3)),
    ("Install GPU drivers", "Container toolkit", Some(4)),
    ("Start services", "docker compose up -d", None),
    ("Verify", "Health checks", None),
];

/// Credentials form
pub fn credentials_form() -> Form {
    Form::new(
        "Credentials",
        vec![
            FormField::new(HOSTNAME)
                .placeholder("devbox")
                .help("Machine name shown on your tailnet")
                .required()
                .validator(min_length(2)),
            FormField::new(TAILSCALE_KEY)
                .placeholder("tskey-auth-...")
                .help("Generate one at the Tailscale admin console")
                .secret()
                .required()
                .validator(tailscale_auth_key()),
            FormField::new(ANTHROPIC_KEY)
                .placeholder("sk-ant-...")
                .help("Optional; the assistant CLI needs it")
                .secret()
                .validator(anthropic_api_key()),
        ],
    )
}

/// Component checklist
pub fn component_group() -> CheckboxGroup {
    let items = COMPONENTS
        .iter()
        .enumerate()
        .map(|(i, (label, description))| {
            let item = CheckboxItem::new(*label).with_description(*description);
            if i == COMPONENT_GPU {
                item.disabled()
            } else {
                item.checked()
            }
        })
        .collect();
    CheckboxGroup::new("Components", items)
}

/// Deployment variant choice
pub fn deployment_group() -> RadioGroup {
    let mut group = RadioGroup::new(
        "Deployment",
        vec![
            RadioItem::new("Minimal")
                .with_icon("📦")
                .with_description("Single dev container"),
            RadioItem::new("Standard")
                .with_icon("🐳")
                .with_description("Dev container with a Tailscale sidecar")
                .with_hint("Recommended"),
            RadioItem::new("Full")
                .with_icon("🧰")
                .with_description("Adds databases and monitoring"),
            RadioItem::new("Kubernetes")
                .with_icon("☸")
                .with_description("Cluster deployment")
                .with_hint("Coming soon")
                .disabled(),
        ],
    );
    group.set_selected(1);
    group
}

/// Answers collected by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallAnswers {
    /// Form values by label
    pub values: HashMap<String, String>,
    /// Checked component indices
    pub components: Vec<usize>,
    /// Selected deployment index
    pub deployment: usize,
    /// Completed install steps
    pub completed: usize,
    /// Failed install steps
    pub failed: usize,
    /// Whether every install step reached a final state
    pub finished: bool,
}

/// Progress screen driven by a simulated step runner
#[derive(Debug, Clone)]
pub struct SimulatedInstall {
    tracker: ProgressTracker,
    failures: HashMap<usize, String>,
    tick: Duration,
    step_delay: Duration,
    elapsed: Duration,
}

impl SimulatedInstall {
    /// Build the install plan from the collected answers
    pub fn new(
        components: &[usize],
        values: &HashMap<String, String>,
        config: &WizardConfig,
        theme: Theme,
    ) -> Self {
        let steps = INSTALL_STEPS
            .iter()
            .map(|(name, description, _)| ProgressStep::new(*name, *description))
            .collect();
        let mut tracker = ProgressTracker::new("Installing", steps)
            .with_theme(theme)
            .with_max_log_lines(config.max_log_lines)
            .with_width(config.render_width)
            .with_bar_width(config.bar_width)
            .with_spinner_interval(config.spinner_interval());

        let mut failures = HashMap::new();
        for (i, (_, _, component)) in INSTALL_STEPS.iter().enumerate() {
            let Some(component) = component else {
                continue;
            };
            if !components.contains(component) {
                tracker.skip_step(i);
            } else if *component == COMPONENT_ASSISTANT
                && values.get(ANTHROPIC_KEY).is_none_or(|key| key.is_empty())
            {
                failures.insert(i, "no Anthropic API key provided".to_string());
            }
        }

        Self {
            tracker,
            failures,
            tick: config.spinner_interval(),
            step_delay: config.step_delay(),
            elapsed: Duration::ZERO,
        }
    }

    /// Underlying tracker
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    fn next_pending(&self) -> Option<usize> {
        self.tracker
            .steps()
            .iter()
            .position(|step| step.status == StepStatus::Pending)
    }

    fn start_step(&mut self, index: usize) {
        self.tracker.set_current_step(index);
        if let Some(step) = self.tracker.step(index) {
            let line = format!("==> {}: {}", step.name, step.description);
            self.tracker.add_log_line(line);
        }
    }

    /// Finish the running step (failing it if planned) and start the next one
    fn advance(&mut self) {
        let current = self.tracker.current_step();
        let running = self
            .tracker
            .step(current)
            .is_some_and(|step| step.status == StepStatus::Running);

        if running {
            if let Some(reason) = self.failures.remove(&current) {
                self.tracker.add_log_line(format!("    error: {}", reason));
                self.tracker.fail_step(current, reason);
            } else {
                self.tracker.set_output(current, "ok");
                self.tracker.add_log_line("    done");
            }
        }

        match self.next_pending() {
            Some(next) => self.start_step(next),
            None => {
                self.tracker.complete_step(current);
                info!(
                    completed = self.tracker.get_completed_count(),
                    failed = self.tracker.get_failed_count(),
                    "Installation finished"
                );
            }
        }
    }

    fn on_tick(&mut self) {
        if self.tracker.is_complete() {
            return;
        }
        self.elapsed += self.tick;
        if self.elapsed >= self.step_delay {
            self.elapsed = Duration::ZERO;
            self.advance();
        }
    }
}

impl Model for SimulatedInstall {
    type Event = TuiEvent;
    type Command = Command;

    fn init(&mut self) -> Option<Command> {
        if let Some(first) = self.next_pending() {
            self.start_step(first);
        }
        self.tracker.init()
    }

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        match event {
            TuiEvent::Tick => {
                self.on_tick();
                self.tracker.update(event)
            }
            TuiEvent::Enter if self.tracker.is_complete() => Some(Command::Submit),
            _ => None,
        }
    }

    fn view(&self) -> Text<'static> {
        let mut text = self.tracker.view();
        if self.tracker.is_complete() {
            let summary = if self.tracker.has_failed() {
                "Finished with errors. Press Enter to exit."
            } else {
                "All done. Press Enter to exit."
            };
            text.lines.push(Line::default());
            text.lines.push(Line::from(summary));
        }
        text
    }

    fn title(&self) -> &str {
        self.tracker.title()
    }
}

/// Wizard stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// Credentials form
    #[default]
    Credentials,
    /// Component checklist
    Components,
    /// Deployment variant
    Deployment,
    /// Running the install
    Install,
}

impl Stage {
    /// 1-based position in the wizard
    pub fn number(&self) -> usize {
        match self {
            Stage::Credentials => 1,
            Stage::Components => 2,
            Stage::Deployment => 3,
            Stage::Install => 4,
        }
    }

    /// Total number of stages
    pub const COUNT: usize = 4;
}

/// The full wizard: one screen per stage
#[derive(Debug, Clone)]
pub struct InstallWizard {
    stage: Stage,
    form: Form,
    components: CheckboxGroup,
    deployment: RadioGroup,
    install: SimulatedInstall,
    config: WizardConfig,
    theme: Theme,
}

type Screen = dyn Model<Event = TuiEvent, Command = Command>;

impl InstallWizard {
    /// Create the wizard on its first screen
    pub fn new(config: WizardConfig, theme: Theme) -> Self {
        let form = credentials_form().with_theme(theme);
        let components = component_group().with_theme(theme);
        let deployment = deployment_group().with_theme(theme);
        let install = SimulatedInstall::new(&[], &HashMap::new(), &config, theme);
        Self {
            stage: Stage::default(),
            form,
            components,
            deployment,
            install,
            config,
            theme,
        }
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Everything collected so far
    pub fn answers(&self) -> InstallAnswers {
        let tracker = self.install.tracker();
        InstallAnswers {
            values: self.form.get_values(),
            components: self.components.get_selected(),
            deployment: self.deployment.get_selected(),
            completed: tracker.get_completed_count(),
            failed: tracker.get_failed_count(),
            finished: self.stage == Stage::Install && tracker.is_complete(),
        }
    }

    fn screen(&self) -> &Screen {
        match self.stage {
            Stage::Credentials => &self.form,
            Stage::Components => &self.components,
            Stage::Deployment => &self.deployment,
            Stage::Install => &self.install,
        }
    }

    fn screen_mut(&mut self) -> &mut Screen {
        match self.stage {
            Stage::Credentials => &mut self.form,
            Stage::Components => &mut self.components,
            Stage::Deployment => &mut self.deployment,
            Stage::Install => &mut self.install,
        }
    }

    fn advance(&mut self) -> Option<Command> {
        self.stage = match self.stage {
            Stage::Credentials => {
                self.form.blur();
                Stage::Components
            }
            Stage::Components => {
                self.components.blur();
                Stage::Deployment
            }
            Stage::Deployment => {
                self.deployment.blur();
                self.install = SimulatedInstall::new(
                    &self.components.get_selected(),
                    &self.form.get_values(),
                    &self.config,
                    self.theme,
                );
                Stage::Install
            }
            Stage::Install => return Some(Command::Quit),
        };
        debug!(stage = ?self.stage, "Wizard advanced");
        self.screen_mut().init()
    }
}

impl Model for InstallWizard {
    type Event = TuiEvent;
    type Command = Command;

    fn init(&mut self) -> Option<Command> {
        self.screen_mut().init()
    }

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        if *event == TuiEvent::Escape {
            info!(stage = ?self.stage, "Wizard cancelled");
            return Some(Command::Quit);
        }
        match self.screen_mut().update(event) {
            Some(Command::Submit) => self.advance(),
            other => other,
        }
    }

    fn view(&self) -> Text<'static> {
        let mut text = Text::from(Line::styled(
            format!("Step {} of {}", self.stage.number(), Stage::COUNT),
            self.theme.dim(),
        ));
        text.lines.extend(self.screen().view().lines);
        text
    }

    fn title(&self) -> &str {
        self.screen().title()
    }
}
