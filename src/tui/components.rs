//! Common UI components module
//!
//! Provides reusable rendering helpers shared by the host and the widgets.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;

/// Three-panel layout: header, body, footer
pub fn three_panel_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area)
}

/// Render a centered title block with border
pub fn render_title_block(title: &str, theme: &Theme, frame: &mut Frame, area: Rect) {
    let title_line = Line::from(format!(" {} ", title))
        .centered()
        .style(theme.title());

    let block = Block::bordered()
        .title(title_line)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .style(theme.normal());

    frame.render_widget(block, area);
}

/// Render bottom hint text
pub fn render_hint(hint: &str, theme: &Theme, frame: &mut Frame, area: Rect) {
    let hint_widget = Paragraph::new(hint)
        .style(theme.dim())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hint_widget, area);
}

/// 按显示宽度截断文本，超出部分以省略号结尾，避免 UTF-8 边界问题
pub fn truncate_value(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut output = String::new();

    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        output.push(ch);
        current_width += ch_width;
    }

    output.push_str("...");
    output
}

/// Flatten styled text into the plain text block it displays
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 按比例生成固定宽度的进度条
pub fn progress_bar(ratio: f64, width: usize, theme: &Theme) -> Vec<Span<'static>> {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    vec![
        Span::styled("█".repeat(filled), theme.bar_fill()),
        Span::styled("░".repeat(width - filled), theme.bar_track()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_value_untouched() {
        assert_eq!(truncate_value("hello", 10), "hello");
        assert_eq!(truncate_value("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_value() {
        let truncated = truncate_value("abcdefghijklmnop", 10);
        assert_eq!(truncated, "abcdefg...");
        assert_eq!(truncated.width(), 10);
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide
        let truncated = truncate_value("安装日志输出内容", 9);
        assert_eq!(truncated, "安装日...");
    }

    #[test]
    fn test_plain_text_joins_spans_and_lines() {
        let text = Text::from(vec![
            Line::from(vec![Span::raw("a"), Span::raw("b")]),
            Line::from("c"),
        ]);
        assert_eq!(plain_text(&text), "ab\nc");
    }

    #[test]
    fn test_progress_bar_width() {
        let theme = Theme::default();
        let spans = progress_bar(0.75, 20, &theme);
        assert_eq!(spans[0].content.chars().count(), 15);
        assert_eq!(spans[1].content.chars().count(), 5);

        let full = progress_bar(1.5, 10, &theme);
        assert_eq!(full[0].content.chars().count(), 10);
        assert!(full[1].content.is_empty());
    }
}
