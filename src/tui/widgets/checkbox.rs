//! 复选框组组件
//!
//! 光标逐行移动（包括禁用项，便于用户看到不可用的原因），禁用项不可勾选。

use crate::tui::event::TuiEvent;
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use crate::tui::widgets::selection::Selectable;
use ratatui::text::{Line, Span, Text};
use tracing::debug;

/// 复选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem {
    /// 标签
    pub label: String,
    /// 描述
    pub description: String,
    checked: bool,
    enabled: bool,
}

impl CheckboxItem {
    /// 创建启用且未勾选的选项
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
            checked: false,
            enabled: true,
        }
    }

    /// 设置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 初始勾选（仅对启用项生效）
    pub fn checked(mut self) -> Self {
        self.checked = self.enabled;
        self
    }

    /// 禁用，同时清除勾选
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self.checked = false;
        self
    }

    /// 是否勾选
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// 是否启用
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// 复选框组
#[derive(Debug, Clone)]
pub struct CheckboxGroup {
    title: String,
    items: Vec<CheckboxItem>,
    cursor: usize,
    focused: bool,
    theme: Theme,
}

impl CheckboxGroup {
    /// 创建复选框组
    pub fn new(title: impl Into<String>, items: Vec<CheckboxItem>) -> Self {
        Self {
            title: title.into(),
            items,
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

    /// 切换光标所在项（禁用项不变）
    pub fn toggle(&mut self) {
        if let Some(item) = self.items.get_mut(self.cursor).filter(|i| i.enabled) {
            item.checked = !item.checked;
            debug!(group = %self.title, item = %item.label, checked = item.checked, "Item toggled");
        }
    }

    /// 勾选所有启用项
    pub fn select_all(&mut self) {
        for item in self.items.iter_mut().filter(|i| i.enabled) {
            item.checked = true;
        }
    }

    /// 清除所有勾选
    pub fn select_none(&mut self) {
        for item in &mut self.items {
            item.checked = false;
        }
    }

    /// 已勾选的索引（升序）
    pub fn get_selected(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.checked)
            .map(|(i, _)| i)
            .collect()
    }

    /// 设置启用状态；禁用时强制取消勾选
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.enabled = enabled;
            if !enabled {
                item.checked = false;
            }
        }
    }

    /// 设置勾选状态；禁用项或越界时忽略
    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if let Some(item) = self.items.get_mut(index).filter(|i| i.enabled) {
            item.checked = checked;
        }
    }

    /// 指定项是否勾选
    pub fn is_checked(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|i| i.checked)
    }

    /// 所有选项
    pub fn items(&self) -> &[CheckboxItem] {
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

impl Selectable for CheckboxGroup {
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

impl Model for CheckboxGroup {
    type Event = TuiEvent;
    type Command = Command;

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        if !self.focused {
            return None;
        }

        match event {
            TuiEvent::Up | TuiEvent::Char('k') => self.prev(),
            TuiEvent::Down | TuiEvent::Char('j') => self.next(),
            TuiEvent::Char(' ') | TuiEvent::Char('x') => self.toggle(),
            TuiEvent::Char('a') => self.select_all(),
            TuiEvent::Char('n') => self.select_none(),
            TuiEvent::Enter => {
                debug!(group = %self.title, selected = ?self.get_selected(), "Selection confirmed");
                return Some(Command::Submit);
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
            let (glyph, glyph_style) = if !item.enabled {
                ("[-]", self.theme.dim())
            } else if item.checked {
                ("[✓]", self.theme.success())
            } else {
                ("[ ]", self.theme.normal())
            };
            let label_style = if !item.enabled {
                self.theme.disabled()
            } else if is_cursor {
                self.theme.selected()
            } else {
                self.theme.normal()
            };

            lines.push(Line::from(vec![
                Span::styled(marker, self.theme.selected()),
                Span::styled(glyph, glyph_style),
                Span::raw(" "),
                Span::styled(item.label.clone(), label_style),
            ]));
            if !item.description.is_empty() {
                lines.push(Line::styled(
                    format!("      {}", item.description),
                    self.theme.dim(),
                ));
            }
        }

        Text::from(lines)
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::plain_text;

    fn components() -> CheckboxGroup {
        CheckboxGroup::new(
            "Components",
            vec![
                CheckboxItem::new("Tailscale").with_description("Private mesh access"),
                CheckboxItem::new("GPU drivers").disabled(),
                CheckboxItem::new("Assistant CLI"),
            ],
        )
    }

    #[test]
    fn test_select_all_skips_disabled() {
        let mut group = components();
        group.select_all();
        assert_eq!(group.get_selected(), vec![0, 2]);
    }

    #[test]
    fn test_cursor_visits_disabled_rows() {
        let mut group = components();
        group.update(&TuiEvent::Down);
        assert_eq!(group.cursor(), 1);
        group.update(&TuiEvent::Char('j'));
        group.update(&TuiEvent::Char('j'));
        assert_eq!(group.cursor(), 0);
        group.update(&TuiEvent::Char('k'));
        assert_eq!(group.cursor(), 2);
    }

    #[test]
    fn test_toggle_ignores_disabled() {
        let mut group = components();
        group.update(&TuiEvent::Char(' '));
        assert!(group.is_checked(0));
        group.update(&TuiEvent::Down);
        group.update(&TuiEvent::Char('x'));
        assert!(!group.is_checked(1));
        group.update(&TuiEvent::Up);
        group.update(&TuiEvent::Char('x'));
        assert!(!group.is_checked(0));
    }

    #[test]
    fn test_disabling_clears_checked() {
        let mut group = components();
        group.set_checked(2, true);
        assert!(group.is_checked(2));
        group.set_enabled(2, false);
        assert!(!group.is_checked(2));
        assert!(!group.items()[2].is_enabled());

        group.set_checked(2, true);
        assert!(!group.is_checked(2));
        group.set_enabled(42, false);
        group.set_checked(42, true);
        assert_eq!(group.items().len(), 3);
    }

    #[test]
    fn test_select_none_clears_everything() {
        let mut group = components();
        group.update(&TuiEvent::Char('a'));
        assert_eq!(group.get_selected(), vec![0, 2]);
        group.update(&TuiEvent::Char('n'));
        assert!(group.get_selected().is_empty());
    }

    #[test]
    fn test_blurred_group_ignores_input() {
        let mut group = components();
        group.blur();
        group.update(&TuiEvent::Char('a'));
        group.update(&TuiEvent::Down);
        assert!(group.get_selected().is_empty());
        assert_eq!(group.cursor(), 0);
        assert_eq!(group.update(&TuiEvent::Enter), None);
    }

    #[test]
    fn test_enter_submits() {
        let mut group = components();
        assert_eq!(group.update(&TuiEvent::Enter), Some(Command::Submit));
    }

    #[test]
    fn test_view_glyphs() {
        let mut group = components();
        group.set_checked(0, true);
        let view = plain_text(&group.view());
        assert!(view.contains("▸ [✓] Tailscale"));
        assert!(view.contains("Private mesh access"));
        assert!(view.contains("  [-] GPU drivers"));
        assert!(view.contains("  [ ] Assistant CLI"));
    }

    #[test]
    fn test_checked_builder_respects_disabled() {
        let item = CheckboxItem::new("x").disabled().checked();
        assert!(!item.is_checked());
    }
}
