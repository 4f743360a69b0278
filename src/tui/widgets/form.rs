//! 表单组件
//!
//! 一组有序的带标签输入字段：焦点导航、逐字段校验、密文输入，以及校验全部通过后才允许提交。

use crate::tui::event::TuiEvent;
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use crate::tui::widgets::input::InputState;
use crate::tui::widgets::selection::wrap_index;
use crate::tui::widgets::validators::{ValidationError, Validator};
use ratatui::text::{Line, Span, Text};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// 光标字符
const CURSOR_GLYPH: &str = "▌";

/// 表单字段
#[derive(Debug, Clone)]
pub struct FormField {
    /// 标签（同时作为取值键）
    pub label: String,
    /// 占位文本
    pub placeholder: String,
    /// 帮助文本
    pub help: String,
    /// 是否为密文字段
    pub secret: bool,
    /// 是否必填
    pub required: bool,
    /// 自定义校验
    pub validator: Option<Validator>,
    input: InputState,
    error: Option<ValidationError>,
}

impl FormField {
    /// 创建字段
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            help: String::new(),
            secret: false,
            required: false,
            validator: None,
            input: InputState::new(),
            error: None,
        }
    }

    /// 设置占位文本
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// 设置帮助文本
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// 标记为密文字段
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// 标记为必填
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// 附加自定义校验
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// 设置初始值
    pub fn value(mut self, value: &str) -> Self {
        self.input = InputState::with_value(value);
        self
    }

    /// 当前值
    pub fn current_value(&self) -> &str {
        self.input.value()
    }

    /// 最近一次校验的错误
    pub fn current_error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    fn check(&self) -> Result<(), ValidationError> {
        let value = self.input.value();
        if value.is_empty() {
            if self.required {
                return Err(ValidationError::Required {
                    field: self.label.clone(),
                });
            }
            // Validators never see an empty optional value
            return Ok(());
        }
        match &self.validator {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }
}

/// 表单
#[derive(Debug, Clone)]
pub struct Form {
    title: String,
    fields: Vec<FormField>,
    focus_index: usize,
    focused: bool,
    submitted: bool,
    errors: BTreeMap<String, ValidationError>,
    theme: Theme,
}

impl Form {
    /// 创建表单，焦点位于第一个字段
    pub fn new(title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            fields,
            focus_index: 0,
            focused: true,
            submitted: false,
            errors: BTreeMap::new(),
            theme: Theme::default(),
        }
    }

    /// 注入主题
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// 校验所有字段，全部通过时返回 true
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        for field in &mut self.fields {
            field.error = field.check().err();
            if let Some(error) = &field.error {
                self.errors.insert(field.label.clone(), error.clone());
            }
        }
        debug!(form = %self.title, errors = self.errors.len(), "Form validated");
        self.errors.is_empty()
    }

    /// 按标签收集所有值
    pub fn get_values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.label.clone(), f.current_value().to_string()))
            .collect()
    }

    /// 按标签取值，不存在时返回空串
    pub fn get_value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.current_value())
            .unwrap_or("")
    }

    /// 设置指定字段的值，越界时忽略
    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.input.set_value(value);
            field.error = None;
            self.errors.remove(&field.label);
        }
    }

    /// 获得焦点
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// 失去焦点
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// 重置焦点、提交状态与错误
    pub fn reset(&mut self) {
        self.focus_index = 0;
        self.submitted = false;
        self.errors.clear();
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// 是否已提交
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// 是否拥有焦点
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// 当前焦点字段
    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    /// 错误表（按标签）
    pub fn errors(&self) -> &BTreeMap<String, ValidationError> {
        &self.errors
    }

    /// 指定字段的错误
    pub fn field_error(&self, index: usize) -> Option<&ValidationError> {
        self.fields.get(index).and_then(|f| f.error.as_ref())
    }

    /// 所有字段
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    fn move_focus(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        self.focus_index = wrap_index(self.focus_index, delta, self.fields.len());
        debug!(form = %self.title, focus = self.focus_index, "Focus moved");
    }

    fn submit(&mut self) -> Option<Command> {
        if self.validate() {
            self.submitted = true;
            debug!(form = %self.title, "Form submitted");
            Some(Command::Submit)
        } else {
            self.submitted = false;
            None
        }
    }

    fn value_spans(&self, field: &FormField, has_cursor: bool) -> Vec<Span<'static>> {
        let value_style = if has_cursor {
            self.theme.normal()
        } else {
            self.theme.accent()
        };
        let mut spans = vec![Span::styled("  [ ", self.theme.dim())];
        if field.current_value().is_empty() {
            if has_cursor {
                spans.push(Span::styled(CURSOR_GLYPH, self.theme.selected()));
            }
            spans.push(Span::styled(field.placeholder.clone(), self.theme.dim()));
        } else if has_cursor {
            let (before, after) = field.input.split_at_cursor(field.secret);
            spans.push(Span::styled(before, value_style));
            spans.push(Span::styled(CURSOR_GLYPH, self.theme.selected()));
            spans.push(Span::styled(after, value_style));
        } else {
            spans.push(Span::styled(
                field.input.display_value(field.secret),
                value_style,
            ));
        }
        spans.push(Span::styled(" ]", self.theme.dim()));
        spans
    }
}

impl Model for Form {
    type Event = TuiEvent;
    type Command = Command;

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        if !self.focused || self.fields.is_empty() {
            return None;
        }

        match event {
            TuiEvent::Tab | TuiEvent::Down => self.move_focus(1),
            TuiEvent::BackTab | TuiEvent::Up => self.move_focus(-1),
            TuiEvent::Enter => {
                if self.focus_index + 1 == self.fields.len() {
                    return self.submit();
                }
                self.move_focus(1);
            }
            other => {
                let field = &mut self.fields[self.focus_index];
                let before = field.input.value().to_string();
                // 只有内容变化才清除错误，光标移动不算
                if field.input.handle_event(other)
                    && field.input.value() != before
                    && field.error.take().is_some()
                {
                    self.errors.remove(&field.label);
                }
            }
        }
        None
    }

    fn view(&self) -> Text<'static> {
        let mut lines = vec![
            Line::styled(self.title.clone(), self.theme.title()),
            Line::default(),
        ];

        for (i, field) in self.fields.iter().enumerate() {
            let is_current = i == self.focus_index;
            let (marker, label_style) = if is_current {
                ("▸ ", self.theme.selected())
            } else {
                ("  ", self.theme.normal())
            };
            let mut label = vec![Span::styled(
                format!("{}{}", marker, field.label),
                label_style,
            )];
            if field.required {
                label.push(Span::styled(" *", self.theme.warning()));
            }
            lines.push(Line::from(label));
            lines.push(Line::from(
                self.value_spans(field, is_current && self.focused),
            ));

            if !field.help.is_empty() {
                lines.push(Line::styled(format!("    {}", field.help), self.theme.dim()));
            }
            if let Some(error) = &field.error {
                lines.push(Line::styled(format!("    ✗ {}", error), self.theme.error()));
            }
            lines.push(Line::default());
        }

        Text::from(lines)
    }

    fn title(&self) -> &str {
        &self.title
    }
}
