//! 主题模块
//!
//! 提供统一的颜色与样式定义。主题是一个普通的 `Copy` 值，由调用方注入到各个组件中，
//! 不存在全局可变状态。

use ratatui::style::{Color, Modifier, Style};

/// 主题颜色配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// 背景色
    pub bg: Color,
    /// 前景色
    pub fg: Color,
    /// 强调色（青色）
    pub accent: Color,
    /// 选中项前景色
    pub selected: Color,
    /// 成功色（绿色）
    pub success: Color,
    /// 警告色（黄色）
    pub warning: Color,
    /// 错误色（红色）
    pub error: Color,
    /// 次要文字色（灰色）
    pub dim: Color,
    /// 边框色
    pub border: Color,
    /// 进度条已完成部分
    pub bar_fill: Color,
    /// 进度条未完成部分
    pub bar_track: Color,
    /// 标题颜色
    pub title: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            accent: Color::Cyan,
            selected: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            dim: Color::DarkGray,
            border: Color::Cyan,
            bar_fill: Color::Cyan,
            bar_track: Color::DarkGray,
            title: Color::Cyan,
        }
    }
}

impl Theme {
    /// 创建默认主题
    pub fn new() -> Self {
        Self::default()
    }

    /// 普通文本样式
    pub fn normal(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    /// 标题样式
    pub fn title(&self) -> Style {
        Style::new()
            .fg(self.title)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 选中项（光标所在行）样式
    pub fn selected(&self) -> Style {
        Style::new()
            .fg(self.selected)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// 禁用项样式
    pub fn disabled(&self) -> Style {
        Style::new()
            .fg(self.dim)
            .bg(self.bg)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// 次要文字样式（描述、提示、占位符）
    pub fn dim(&self) -> Style {
        Style::new().fg(self.dim).bg(self.bg)
    }

    /// 强调样式
    pub fn accent(&self) -> Style {
        Style::new().fg(self.accent).bg(self.bg)
    }

    /// 边框样式
    pub fn border(&self) -> Style {
        Style::new().fg(self.border).bg(self.bg)
    }

    /// 成功样式
    pub fn success(&self) -> Style {
        Style::new().fg(self.success).bg(self.bg)
    }

    /// 警告样式
    pub fn warning(&self) -> Style {
        Style::new().fg(self.warning).bg(self.bg)
    }

    /// 错误样式
    pub fn error(&self) -> Style {
        Style::new().fg(self.error).bg(self.bg)
    }

    /// 进度条填充样式
    pub fn bar_fill(&self) -> Style {
        Style::new().fg(self.bar_fill).bg(self.bg)
    }

    /// 进度条轨道样式
    pub fn bar_track(&self) -> Style {
        Style::new().fg(self.bar_track).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::new();
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.error().fg, Some(Color::Red));
        assert_eq!(theme.success().fg, Some(Color::Green));
    }

    #[test]
    fn test_title_is_bold() {
        let theme = Theme::default();
        assert!(theme.title().add_modifier.contains(Modifier::BOLD));
        assert!(theme.disabled().add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_custom_palette_flows_into_styles() {
        let theme = Theme {
            bar_fill: Color::Blue,
            ..Theme::default()
        };
        assert_eq!(theme.bar_fill().fg, Some(Color::Blue));
        assert_eq!(theme.bar_track().fg, Some(Color::DarkGray));
    }
}
