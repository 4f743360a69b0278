//! 可复用的交互组件

pub mod checkbox;
pub mod form;
pub mod input;
pub mod progress;
pub mod radio;
pub mod selection;
pub mod validators;

pub use checkbox::{CheckboxGroup, CheckboxItem};
pub use form::{Form, FormField};
pub use input::InputState;
pub use progress::{ProgressStep, ProgressTracker, StepStatus};
pub use radio::{RadioGroup, RadioItem};
pub use selection::Selectable;
pub use validators::{ValidationError, Validator};
