//! Ratatui 终端 UI 模块
//!
//! 提供安装向导使用的交互组件，以及驱动它们的终端宿主。

pub mod app;
pub mod components;
pub mod event;
pub mod model;
pub mod theme;
pub mod widgets;

pub use app::WizardApp;
pub use event::{EventPoll, TuiEvent};
pub use model::{Command, Model};
pub use theme::Theme;
pub use widgets::{
    CheckboxGroup, CheckboxItem, Form, FormField, ProgressStep, ProgressTracker, RadioGroup,
    RadioItem, Selectable, StepStatus, ValidationError, Validator,
};
