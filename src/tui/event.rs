//! Event handling module
//!
//! Uses crossterm for terminal event handling and folds every key press
//! into a small, widget-facing [`TuiEvent`].

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Event poll interval (milliseconds)
const POLL_RATE: u64 = 50;

/// Event type consumed by every widget's `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Tab key
    Tab,
    /// Shift+Tab
    BackTab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Character input (space arrives as `Char(' ')`)
    Char(char),
    /// Ctrl+C exit
    CtrlC,
    /// Window resize
    Resize(u16, u16),
    /// Animation tick requested through `Command::Tick`
    Tick,
    /// No event (timeout)
    None,
}

impl From<Event> for TuiEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key_event) => key_event.into(),
            Event::Resize(width, height) => TuiEvent::Resize(width, height),
            Event::Mouse(_) => TuiEvent::None,
            Event::FocusGained => TuiEvent::None,
            Event::FocusLost => TuiEvent::None,
            Event::Paste(_) => TuiEvent::None,
        }
    }
}

impl From<KeyEvent> for TuiEvent {
    fn from(key: KeyEvent) -> Self {
        // Ignore repeat/release events
        if key.kind != KeyEventKind::Press {
            return TuiEvent::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return TuiEvent::CtrlC;
        }

        match key.code {
            KeyCode::Esc => TuiEvent::Escape,
            KeyCode::Enter => TuiEvent::Enter,
            KeyCode::Up => TuiEvent::Up,
            KeyCode::Down => TuiEvent::Down,
            KeyCode::Left => TuiEvent::Left,
            KeyCode::Right => TuiEvent::Right,
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => TuiEvent::BackTab,
            KeyCode::Tab => TuiEvent::Tab,
            KeyCode::BackTab => TuiEvent::BackTab,
            KeyCode::Backspace => TuiEvent::Backspace,
            KeyCode::Delete => TuiEvent::Delete,
            KeyCode::Home => TuiEvent::Home,
            KeyCode::End => TuiEvent::End,
            KeyCode::Char(c) => TuiEvent::Char(c),
            _ => TuiEvent::None,
        }
    }
}

/// Event poller
#[derive(Debug)]
pub struct EventPoll {
    poll_rate: Duration,
}

impl EventPoll {
    /// Create new event poller
    pub fn new(poll_rate: Duration) -> Self {
        Self { poll_rate }
    }

    /// Poll next event, waiting at most `timeout` (capped at the poll rate)
    pub fn next_within(&self, timeout: Duration) -> std::io::Result<TuiEvent> {
        if event::poll(timeout.min(self.poll_rate))? {
            Ok(event::read()?.into())
        } else {
            Ok(TuiEvent::None)
        }
    }

    /// Poll next event using the default poll rate
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        self.next_within(self.poll_rate)
    }
}

impl Default for EventPoll {
    fn default() -> Self {
        Self::new(Duration::from_millis(POLL_RATE))
    }
}
