//! 单行文本输入状态

use crate::tui::event::TuiEvent;
use unicode_width::UnicodeWidthStr;

/// 密文字段的遮罩字符
pub const MASK_CHAR: char = '•';

/// 文本输入状态
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    buffer: String,
    cursor: usize,
}

impl InputState {
    /// 新建输入状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用初始值创建，光标置于末尾
    pub fn with_value(value: &str) -> Self {
        Self {
            buffer: value.to_string(),
            cursor: value.len(),
        }
    }

    /// 插入字符
    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// 删除光标前字符
    pub fn delete_before_cursor(&mut self) {
        if self.cursor > 0 {
            let prev_char_len = self.buffer[..self.cursor]
                .chars()
                .last()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor -= prev_char_len;
            self.buffer.remove(self.cursor);
        }
    }

    /// 删除光标后字符
    pub fn delete_after_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            let next_char_len = self.buffer[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.buffer.drain(self.cursor..self.cursor + next_char_len);
        }
    }

    /// 光标左移
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= self.buffer[..self.cursor]
                .chars()
                .last()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
        }
    }

    /// 光标右移
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += self.buffer[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
        }
    }

    /// 移动到行首
    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    /// 移动到行尾
    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// 处理编辑按键，返回是否被消费
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::Char(c) => self.insert_char(*c),
            TuiEvent::Backspace => self.delete_before_cursor(),
            TuiEvent::Delete => self.delete_after_cursor(),
            TuiEvent::Left => self.move_cursor_left(),
            TuiEvent::Right => self.move_cursor_right(),
            TuiEvent::Home => self.move_cursor_to_start(),
            TuiEvent::End => self.move_cursor_to_end(),
            _ => return false,
        }
        true
    }

    /// 光标可视位置
    pub fn visual_cursor_position(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// 获取当前值
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// 获取光标字节位置
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// 替换整个值，光标置于末尾
    pub fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.cursor = self.buffer.len();
    }

    /// 显示用文本：密文字段每个字符替换为遮罩字符
    pub fn display_value(&self, masked: bool) -> String {
        if masked {
            std::iter::repeat_n(MASK_CHAR, self.buffer.chars().count()).collect()
        } else {
            self.buffer.clone()
        }
    }

    /// 按光标拆分显示文本
    pub fn split_at_cursor(&self, masked: bool) -> (String, String) {
        let (before, after) = self.buffer.split_at(self.cursor);
        if masked {
            (
                std::iter::repeat_n(MASK_CHAR, before.chars().count()).collect(),
                std::iter::repeat_n(MASK_CHAR, after.chars().count()).collect(),
            )
        } else {
            (before.to_string(), after.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut input = InputState::new();
        for c in "host".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.value(), "host");
        input.delete_before_cursor();
        assert_eq!(input.value(), "hos");
        input.move_cursor_to_start();
        input.delete_after_cursor();
        assert_eq!(input.value(), "os");
        assert_eq!(input.cursor_position(), 0);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = InputState::with_value("名字");
        assert_eq!(input.visual_cursor_position(), 4);
        input.move_cursor_left();
        input.insert_char('x');
        assert_eq!(input.value(), "名x字");
        input.delete_before_cursor();
        input.delete_before_cursor();
        assert_eq!(input.value(), "字");
    }

    #[test]
    fn test_handle_event_consumes_editing_keys() {
        let mut input = InputState::new();
        assert!(input.handle_event(&TuiEvent::Char('a')));
        assert!(input.handle_event(&TuiEvent::Home));
        assert!(input.handle_event(&TuiEvent::Char('b')));
        assert!(!input.handle_event(&TuiEvent::Tab));
        assert_eq!(input.value(), "ba");
    }

    #[test]
    fn test_masked_display() {
        let input = InputState::with_value("sk-ant-1");
        assert_eq!(input.display_value(true), "••••••••");
        assert_eq!(input.display_value(false), "sk-ant-1");

        let mut input = InputState::with_value("abc");
        input.move_cursor_left();
        assert_eq!(input.split_at_cursor(true), ("••".to_string(), "•".to_string()));
    }

    #[test]
    fn test_boundary_safe_cursor_moves() {
        let mut input = InputState::new();
        input.move_cursor_left();
        input.delete_before_cursor();
        input.move_cursor_right();
        input.delete_after_cursor();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor_position(), 0);
    }
}
