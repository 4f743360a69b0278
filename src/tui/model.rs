//! Shared widget contract
//!
//! Every widget follows the same init / update / view cycle: `init` may
//! request a startup command, `update` consumes exactly one event and may
//! return a follow-up command, and `view` renders the current frame.

use ratatui::text::Text;
use std::time::Duration;

/// Follow-up work a model asks its host to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deliver `TuiEvent::Tick` after the given interval
    Tick(Duration),
    /// The model's confirm gesture happened; the host may move on
    Submit,
    /// The host should shut down
    Quit,
}

/// Interactive component driven by a single-threaded update loop
pub trait Model {
    /// Input consumed by `update`
    type Event;
    /// Follow-up work returned from `init` and `update`
    type Command;

    /// Startup command, if any
    fn init(&mut self) -> Option<Self::Command> {
        None
    }

    /// Consume one event
    fn update(&mut self, event: &Self::Event) -> Option<Self::Command>;

    /// Render the current frame
    fn view(&self) -> Text<'static>;

    /// Screen title
    fn title(&self) -> &str;
}
