//! TUI application main module
//!
//! Hosts a root [`Model`] in the terminal: owns the event loop, the tick
//! timer and frame rendering. Screen sequencing belongs to the model.

use crate::error::Result;
use crate::tui::components::{render_hint, render_title_block, three_panel_layout};
use crate::tui::event::{EventPoll, TuiEvent};
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use ratatui::{
    DefaultTerminal, Frame,
    widgets::{Block, Padding, Paragraph},
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default key hint shown in the footer
pub const DEFAULT_HINT: &str =
    "↑/↓ move · tab next field · space toggle · enter confirm · esc quit";

/// Terminal-independent host state
#[derive(Debug)]
pub struct AppState<M> {
    /// Root model
    pub model: M,
    /// Theme used for the frame chrome
    pub theme: Theme,
    /// Footer hint
    pub hint: String,
    /// Whether the loop should stop
    pub should_exit: bool,
    tick_deadline: Option<Instant>,
}

impl<M> AppState<M>
where
    M: Model<Event = TuiEvent, Command = Command>,
{
    /// Wrap a root model
    pub fn new(model: M) -> Self {
        Self {
            model,
            theme: Theme::default(),
            hint: DEFAULT_HINT.to_string(),
            should_exit: false,
            tick_deadline: None,
        }
    }

    /// Run the model's startup command
    pub fn start(&mut self) {
        let command = self.model.init();
        self.apply(command);
    }

    /// Route one event to the model
    pub fn dispatch(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CtrlC => {
                info!("Interrupted by user");
                self.should_exit = true;
            }
            TuiEvent::Resize(_, _) | TuiEvent::None => {}
            TuiEvent::Tick => {
                self.tick_deadline = None;
                let command = self.model.update(event);
                self.apply(command);
            }
            other => {
                let command = self.model.update(other);
                self.apply(command);
            }
        }
    }

    /// Act on a command returned by the model
    pub fn apply(&mut self, command: Option<Command>) {
        match command {
            Some(Command::Tick(interval)) => {
                self.tick_deadline = Some(Instant::now() + interval);
            }
            Some(Command::Submit) | Some(Command::Quit) => {
                debug!(?command, "Root model finished");
                self.should_exit = true;
            }
            None => {}
        }
    }

    /// How long the poller may wait before the next tick is due
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.tick_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(Duration::MAX)
    }

    /// Whether a requested tick is due
    pub fn tick_due(&self, now: Instant) -> bool {
        self.tick_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Render the current frame
    pub fn draw(&self, frame: &mut Frame) {
        let [header, body, footer] = three_panel_layout(frame.area());

        render_title_block(self.model.title(), &self.theme, frame, header);

        let content = Paragraph::new(self.model.view())
            .style(self.theme.normal())
            .block(Block::new().padding(Padding::horizontal(1)));
        frame.render_widget(content, body);

        render_hint(&self.hint, &self.theme, frame, footer);
    }
}

/// TUI application
pub struct WizardApp<M> {
    terminal: DefaultTerminal,
    event_poll: EventPoll,
    state: AppState<M>,
}

impl<M> WizardApp<M>
where
    M: Model<Event = TuiEvent, Command = Command>,
{
    /// Take over the terminal
    pub fn new(model: M) -> Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self {
            terminal,
            event_poll: EventPoll::default(),
            state: AppState::new(model),
        })
    }

    /// Replace the frame theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
    }

    /// Run until the model quits, then restore the terminal and hand the model back
    pub fn run(mut self) -> Result<M> {
        let result = self.event_loop();
        ratatui::restore();
        result?;
        Ok(self.state.model)
    }

    fn event_loop(&mut self) -> std::io::Result<()> {
        self.state.start();

        loop {
            self.terminal.draw(|frame| self.state.draw(frame))?;
            if self.state.should_exit {
                break;
            }

            let timeout = self.state.time_until_tick(Instant::now());
            let event = self.event_poll.next_within(timeout)?;
            self.state.dispatch(&event);

            if !self.state.should_exit && self.state.tick_due(Instant::now()) {
                self.state.dispatch(&TuiEvent::Tick);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{CheckboxGroup, CheckboxItem, ProgressStep, ProgressTracker};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn components() -> CheckboxGroup {
        CheckboxGroup::new(
            "Components",
            vec![CheckboxItem::new("Docker"), CheckboxItem::new("Tailscale")],
        )
    }

    #[test]
    fn test_draw_renders_title_body_and_hint() {
        let state = AppState::new(components());
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| state.draw(frame)).unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains(" Components "));
        assert!(screen.contains("[ ] Docker"));
        assert!(screen.contains("esc quit"));
    }

    #[test]
    fn test_events_reach_model_and_submit_exits() {
        let mut state = AppState::new(components());
        state.dispatch(&TuiEvent::Char(' '));
        state.dispatch(&TuiEvent::Resize(10, 10));
        assert_eq!(state.model.get_selected(), vec![0]);
        assert!(!state.should_exit);

        state.dispatch(&TuiEvent::Enter);
        assert!(state.should_exit);
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut state = AppState::new(components());
        state.dispatch(&TuiEvent::CtrlC);
        assert!(state.should_exit);
    }

    #[test]
    fn test_tick_scheduling() {
        let tracker = ProgressTracker::new("Installing", vec![ProgressStep::new("Docker", "")])
            .with_spinner_interval(Duration::from_millis(0));
        let mut state = AppState::new(tracker);
        assert!(!state.tick_due(Instant::now()));
        assert_eq!(state.time_until_tick(Instant::now()), Duration::MAX);

        state.start();
        assert!(state.tick_due(Instant::now()));
        assert_eq!(state.time_until_tick(Instant::now()), Duration::ZERO);

        state.dispatch(&TuiEvent::Tick);
        // The tracker re-arms its tick
        assert!(state.tick_due(Instant::now()));
        assert!(!state.should_exit);
    }
}
