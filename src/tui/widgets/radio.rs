//! 单选组组件
//!
//! 光标移动会自动跳过禁用项；只有启用项才能被选中。

use crate::tui::event::TuiEvent;
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use crate::tui::widgets::selection::Selectable;
use ratatui::text::{Line, Span, Text};
use tracing::debug;

/// 单选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioItem {
    /// 标签
    pub label: String,
    /// 描述
    pub description: String,
    /// 附加提示
    pub hint: String,
    /// 图标
    pub icon: String,
    /// 是否启用
    pub enabled: bool,
}

impl RadioItem {
    /// 创建启用的选项
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            hint: String::new(),
            icon: String::new(),
            enabled: true,
        }
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 设置提示
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// 设置图标
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// 禁用
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// 单选组
#[derive(Debug, Clone)]
pub struct RadioGroup {
    title: String,
    items: Vec<RadioItem>,
    selected: usize,
    cursor: usize,
    focused: bool,
    theme: Theme,
}

impl RadioGroup {
    /// 创建单选组；不校验第 0 项是否启用，初始状态由调用方负责
    pub fn new(title: impl Into<String>, items: Vec<RadioItem>) -> Self {
        Self {
            title: title.into(),
            items,
            selected: 0,
            cursor: 0,
            focused: true,
            theme: Theme::default(),
        }
    }

    /// 注入主题
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// 移动光标并跳过禁用项；最多尝试 `len` 次，全部禁用时停在最后到达的位置
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.move_by(delta);
        let mut attempts = 1;
        while !self.items[self.cursor].enabled && attempts < count {
            self.move_by(delta);
            attempts += 1;
        }
    }

    /// 选中光标所在项（仅启用项）
    pub fn select(&mut self) {
        self.set_selected(self.cursor);
    }

    /// 直接设置选中项；禁用项或越界时忽略
    pub fn set_selected(&mut self, index: usize) {
        if let Some(item) = self.items.get(index).filter(|i| i.enabled) {
            self.selected = index;
            debug!(group = %self.title, item = %item.label, "Option selected");
        }
    }

    /// 选中索引
    pub fn get_selected(&self) -> usize {
        self.selected
    }

    /// 选中项
    pub fn get_selected_item(&self) -> Option<&RadioItem> {
        self.items.get(self.selected)
    }

    /// 所有选项
    pub fn items(&self) -> &[RadioItem] {
        &self.items
    }

    /// 获得焦点
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// 失去焦点
    pub fn blur(&mut self) {
        self.focused = false;
    }
}

impl Selectable for RadioGroup {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, index: usize) {
        self.cursor = index;
    }
}

impl Model for RadioGroup {
    type Event = TuiEvent;
    type Command = Command;

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        if !self.focused {
            return None;
        }

        match event {
            TuiEvent::Up | TuiEvent::Char('k') => self.move_cursor(-1),
            TuiEvent::Down | TuiEvent::Char('j') => self.move_cursor(1),
            TuiEvent::Char(' ') => self.select(),
            TuiEvent::Enter => {
                self.select();
                return self
                    .get_selected_item()
                    .filter(|item| item.enabled)
                    .map(|_| Command::Submit);
            }
            _ => {}
        }
        None
    }

    fn view(&self) -> Text<'static> {
        let mut lines = vec![
            Line::styled(self.title.clone(), self.theme.title()),
            Line::default(),
        ];

        for (i, item) in self.items.iter().enumerate() {
            let is_cursor = i == self.cursor;
            let marker = if is_cursor { "▸ " } else { "  " };
            let glyph = if i == self.selected { "(●)" } else { "( )" };
            let style = if !item.enabled {
                self.theme.disabled()
            } else if is_cursor {
                self.theme.selected()
            } else {
                self.theme.normal()
            };

            let mut spans = vec![
                Span::styled(marker, self.theme.selected()),
                Span::styled(glyph, style),
                Span::raw(" "),
            ];
            if !item.icon.is_empty() {
                spans.push(Span::raw(format!("{} ", item.icon)));
            }
            spans.push(Span::styled(item.label.clone(), style));
            lines.push(Line::from(spans));

            if !item.description.is_empty() {
                lines.push(Line::styled(
                    format!("      {}", item.description),
                    self.theme.dim(),
                ));
            }
            if !item.hint.is_empty() {
                lines.push(Line::styled(
                    format!("      {}", item.hint),
                    self.theme.warning(),
                ));
            }
        }

        Text::from(lines)
    }

    fn title(&self) -> &str {
        &self.title
    }
}
