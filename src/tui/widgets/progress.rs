//! 多步骤进度组件
//!
//! 按顺序展示安装步骤的状态、耗时、整体百分比，以及最近若干行输出。

use crate::tui::components::{progress_bar, truncate_value};
use crate::tui::event::TuiEvent;
use crate::tui::model::{Command, Model};
use crate::tui::theme::Theme;
use chrono::{DateTime, Local};
use ratatui::text::{Line, Span, Text};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, warn};

/// 默认保留的日志行数
pub const DEFAULT_MAX_LOG_LINES: usize = 8;
/// 默认渲染宽度
pub const DEFAULT_RENDER_WIDTH: usize = 80;
/// 默认进度条宽度
pub const DEFAULT_BAR_WIDTH: usize = 40;
/// 默认动画间隔
pub const DEFAULT_SPINNER_INTERVAL: Duration = Duration::from_millis(100);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const OUTPUT_RULE_WIDTH: usize = 40;

/// 步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    /// 等待中
    #[default]
    Pending,
    /// 执行中
    Running,
    /// 已完成
    Complete,
    /// 失败
    Failed,
    /// 已跳过
    Skipped,
}

impl StepStatus {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed | Self::Skipped)
    }
}

/// 单个步骤
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressStep {
    /// 名称
    pub name: String,
    /// 描述
    pub description: String,
    /// 状态
    pub status: StepStatus,
    /// 步骤输出
    pub output: String,
    /// 开始时间
    pub start_time: Option<DateTime<Local>>,
    /// 结束时间
    pub end_time: Option<DateTime<Local>>,
    /// 失败原因
    pub error: Option<String>,
}

impl ProgressStep {
    /// 创建等待中的步骤
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: StepStatus::Pending,
            output: String::new(),
            start_time: None,
            end_time: None,
            error: None,
        }
    }

    /// 耗时（需同时有开始与结束时间）
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    fn finish(&mut self, status: StepStatus) {
        self.status = status;
        self.end_time = Some(Local::now());
    }
}

/// 进度跟踪器
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    title: String,
    steps: Vec<ProgressStep>,
    current: usize,
    logs: VecDeque<String>,
    max_log_lines: usize,
    width: usize,
    bar_width: usize,
    spinner_frame: usize,
    spinner_interval: Duration,
    theme: Theme,
}

impl ProgressTracker {
    /// 由步骤列表创建
    pub fn new(title: impl Into<String>, steps: Vec<ProgressStep>) -> Self {
        Self {
            title: title.into(),
            steps,
            current: 0,
            logs: VecDeque::new(),
            max_log_lines: DEFAULT_MAX_LOG_LINES,
            width: DEFAULT_RENDER_WIDTH,
            bar_width: DEFAULT_BAR_WIDTH,
            spinner_frame: 0,
            spinner_interval: DEFAULT_SPINNER_INTERVAL,
            theme: Theme::default(),
        }
    }

    /// 注入主题
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// 设置日志缓冲上限
    pub fn with_max_log_lines(mut self, max_log_lines: usize) -> Self {
        self.max_log_lines = max_log_lines;
        self
    }

    /// 设置渲染宽度
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// 设置进度条宽度
    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// 设置动画间隔
    pub fn with_spinner_interval(mut self, interval: Duration) -> Self {
        self.spinner_interval = interval;
        self
    }

    /// 切换当前步骤；上一个仍在执行的步骤会被自动标记为完成
    pub fn set_current_step(&mut self, index: usize) {
        if index >= self.steps.len() {
            return;
        }
        if index != self.current {
            if let Some(previous) = self
                .steps
                .get_mut(self.current)
                .filter(|s| s.status == StepStatus::Running)
            {
                previous.finish(StepStatus::Complete);
                debug!(step = %previous.name, "Step completed on advance");
            }
        }

        self.current = index;
        let step = &mut self.steps[index];
        if step.status == StepStatus::Pending {
            step.status = StepStatus::Running;
            step.start_time = Some(Local::now());
            debug!(step = %step.name, "Step started");
        }
    }

    /// 标记完成
    pub fn complete_step(&mut self, index: usize) {
        if let Some(step) = self.active_step_mut(index) {
            step.finish(StepStatus::Complete);
            debug!(step = %step.name, "Step completed");
        }
    }

    /// 标记失败并记录原因
    pub fn fail_step(&mut self, index: usize, error: impl Into<String>) {
        if let Some(step) = self.active_step_mut(index) {
            step.finish(StepStatus::Failed);
            let error = error.into();
            warn!(step = %step.name, error = %error, "Step failed");
            step.error = Some(error);
        }
    }

    /// 标记跳过（仅限待处理步骤）
    pub fn skip_step(&mut self, index: usize) {
        if let Some(step) = self
            .steps
            .get_mut(index)
            .filter(|step| step.status == StepStatus::Pending)
        {
            step.status = StepStatus::Skipped;
            debug!(step = %step.name, "Step skipped");
        }
    }

    /// 设置步骤输出
    pub fn set_output(&mut self, index: usize, output: impl Into<String>) {
        if let Some(step) = self.steps.get_mut(index) {
            step.output = output.into();
        }
    }

    /// 追加日志行，超出上限时丢弃最旧的行
    pub fn add_log_line(&mut self, line: impl Into<String>) {
        self.logs.push_back(line.into());
        while self.logs.len() > self.max_log_lines {
            self.logs.pop_front();
        }
    }

    /// 已完成数
    pub fn get_completed_count(&self) -> usize {
        self.count(StepStatus::Complete)
    }

    /// 失败数
    pub fn get_failed_count(&self) -> usize {
        self.count(StepStatus::Failed)
    }

    /// 跳过数
    pub fn get_skipped_count(&self) -> usize {
        self.count(StepStatus::Skipped)
    }

    /// 所有步骤都已进入终态（无步骤时为 true）
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|s| s.status.is_terminal())
    }

    /// 是否有失败步骤
    pub fn has_failed(&self) -> bool {
        self.get_failed_count() > 0
    }

    /// 进度比例：(完成 + 跳过) / 总数；无步骤时为 1.0
    pub fn ratio(&self) -> f64 {
        if self.steps.is_empty() {
            return 1.0;
        }
        self.done_count() as f64 / self.steps.len() as f64
    }

    /// 整数百分比
    pub fn percentage(&self) -> usize {
        if self.steps.is_empty() {
            return 100;
        }
        self.done_count() * 100 / self.steps.len()
    }

    /// 当前步骤索引
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// 指定步骤
    pub fn step(&self, index: usize) -> Option<&ProgressStep> {
        self.steps.get(index)
    }

    /// 所有步骤
    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    /// 日志缓冲（由旧到新）
    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }

    fn done_count(&self) -> usize {
        self.get_completed_count() + self.get_skipped_count()
    }

    fn active_step_mut(&mut self, index: usize) -> Option<&mut ProgressStep> {
        self.steps
            .get_mut(index)
            .filter(|step| !step.status.is_terminal())
    }

    fn step_icon(&self, index: usize, step: &ProgressStep) -> Span<'static> {
        match step.status {
            StepStatus::Complete => Span::styled("✓", self.theme.success()),
            StepStatus::Failed => Span::styled("✗", self.theme.error()),
            StepStatus::Skipped => Span::styled("◌", self.theme.dim()),
            StepStatus::Running => self.spinner(),
            StepStatus::Pending if index == self.current => self.spinner(),
            StepStatus::Pending => Span::styled("○", self.theme.dim()),
        }
    }

    fn spinner(&self) -> Span<'static> {
        Span::styled(
            SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()],
            self.theme.accent(),
        )
    }

    fn step_line(&self, index: usize, step: &ProgressStep) -> Line<'static> {
        let name_style = match step.status {
            StepStatus::Running => self.theme.selected(),
            StepStatus::Failed => self.theme.error(),
            StepStatus::Pending | StepStatus::Skipped => self.theme.dim(),
            StepStatus::Complete => self.theme.normal(),
        };
        let mut spans = vec![
            Span::raw("  "),
            self.step_icon(index, step),
            Span::raw(" "),
            Span::styled(step.name.clone(), name_style),
        ];
        if !step.description.is_empty() {
            spans.push(Span::styled(
                format!(" - {}", step.description),
                self.theme.dim(),
            ));
        }
        let finished = matches!(step.status, StepStatus::Complete | StepStatus::Failed);
        if let Some(elapsed) = step.duration().filter(|_| finished) {
            let secs = elapsed.num_milliseconds().max(0) as f64 / 1000.0;
            spans.push(Span::styled(format!(" ({:.1}s)", secs), self.theme.dim()));
        }
        Line::from(spans)
    }
}

impl Model for ProgressTracker {
    type Event = TuiEvent;
    type Command = Command;

    fn init(&mut self) -> Option<Command> {
        Some(Command::Tick(self.spinner_interval))
    }

    fn update(&mut self, event: &TuiEvent) -> Option<Command> {
        match event {
            TuiEvent::Tick => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                Some(Command::Tick(self.spinner_interval))
            }
            _ => None,
        }
    }

    fn view(&self) -> Text<'static> {
        // 无步骤时显示 100% 但轨道为空
        let fill = if self.steps.is_empty() { 0.0 } else { self.ratio() };
        let mut bar = progress_bar(fill, self.bar_width, &self.theme);
        bar.push(Span::styled(
            format!(" {}%", self.percentage()),
            self.theme.normal(),
        ));

        let mut lines = vec![
            Line::styled(self.title.clone(), self.theme.title()),
            Line::default(),
            Line::from(bar),
            Line::default(),
        ];

        for (i, step) in self.steps.iter().enumerate() {
            lines.push(self.step_line(i, step));
            if let Some(error) = &step.error {
                lines.push(Line::styled(format!("      {}", error), self.theme.error()));
            }
        }

        if !self.logs.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Output:", self.theme.title()));
            lines.push(Line::styled(
                "─".repeat(OUTPUT_RULE_WIDTH),
                self.theme.border(),
            ));
            let max_width = self.width.saturating_sub(2);
            for line in &self.logs {
                lines.push(Line::styled(
                    format!("  {}", truncate_value(line, max_width)),
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

    fn install_steps(count: usize) -> ProgressTracker {
        let steps = (0..count)
            .map(|i| ProgressStep::new(format!("step {}", i), ""))
            .collect();
        ProgressTracker::new("Installing", steps)
    }

    #[test]
    fn test_rolling_log_buffer() {
        let mut tracker = install_steps(1).with_max_log_lines(3);
        for line in ["a", "b", "c", "d", "e"] {
            tracker.add_log_line(line);
        }
        assert_eq!(tracker.log_lines().collect::<Vec<_>>(), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_default_log_cap() {
        let mut tracker = install_steps(1);
        for i in 0..20 {
            tracker.add_log_line(format!("line {}", i));
        }
        let lines: Vec<_> = tracker.log_lines().collect();
        assert_eq!(lines.len(), DEFAULT_MAX_LOG_LINES);
        assert_eq!(lines[0], "line 12");
        assert_eq!(lines[7], "line 19");
    }

    #[test]
    fn test_advance_completes_running_step() {
        let mut tracker = install_steps(3);
        tracker.set_current_step(0);
        assert_eq!(tracker.step(0).map(|s| s.status), Some(StepStatus::Running));
        assert!(tracker.step(0).and_then(|s| s.start_time).is_some());

        tracker.set_current_step(1);
        let first = tracker.step(0).unwrap();
        assert_eq!(first.status, StepStatus::Complete);
        assert!(first.end_time.is_some());
        assert_eq!(tracker.step(1).map(|s| s.status), Some(StepStatus::Running));
        assert_eq!(tracker.current_step(), 1);
    }

    #[test]
    fn test_failed_step_survives_advance() {
        let mut tracker = install_steps(2);
        tracker.set_current_step(0);
        tracker.fail_step(0, "docker not found");
        tracker.set_current_step(1);
        let first = tracker.step(0).unwrap();
        assert_eq!(first.status, StepStatus::Failed);
        assert_eq!(first.error.as_deref(), Some("docker not found"));
        assert!(tracker.has_failed());
        assert_eq!(tracker.get_failed_count(), 1);
    }

    #[test]
    fn test_reselecting_current_step_keeps_it_running() {
        let mut tracker = install_steps(2);
        tracker.set_current_step(0);
        tracker.set_current_step(0);
        assert_eq!(tracker.step(0).map(|s| s.status), Some(StepStatus::Running));
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let mut tracker = install_steps(2);
        tracker.skip_step(0);
        tracker.complete_step(0);
        tracker.fail_step(0, "late");
        tracker.set_current_step(0);
        let step = tracker.step(0).unwrap();
        assert_eq!(step.status, StepStatus::Skipped);
        assert!(step.error.is_none());
        assert!(step.end_time.is_none());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut tracker = install_steps(2);
        tracker.set_current_step(5);
        tracker.complete_step(5);
        tracker.fail_step(5, "x");
        tracker.skip_step(5);
        tracker.set_output(5, "x");
        assert_eq!(tracker.current_step(), 0);
        assert!(tracker.steps().iter().all(|s| s.status == StepStatus::Pending));
    }

    #[test]
    fn test_percentage_and_completion() {
        let mut tracker = install_steps(4);
        tracker.complete_step(0);
        tracker.complete_step(1);
        tracker.skip_step(2);
        assert!(!tracker.is_complete());
        assert_eq!(tracker.percentage(), 75);
        assert!(plain_text(&tracker.view()).contains(" 75%"));

        tracker.complete_step(3);
        assert!(tracker.is_complete());
        assert_eq!(tracker.percentage(), 100);
        assert!(
            tracker.get_completed_count() + tracker.get_failed_count() + tracker.get_skipped_count()
                <= tracker.steps().len()
        );
    }

    #[test]
    fn test_empty_tracker() {
        let tracker = ProgressTracker::new("Nothing", Vec::new());
        assert!(tracker.is_complete());
        assert_eq!(tracker.percentage(), 100);
        assert_eq!(tracker.ratio(), 1.0);

        let view = plain_text(&tracker.with_bar_width(4).view());
        assert!(view.contains("░░░░ 100%"));
        assert!(!view.contains('█'));
    }

    #[test]
    fn test_running_step_cannot_be_skipped() {
        let mut tracker = install_steps(2);
        tracker.set_current_step(0);
        tracker.skip_step(0);
        assert_eq!(tracker.step(0).map(|s| s.status), Some(StepStatus::Running));
        assert_eq!(tracker.get_skipped_count(), 0);

        tracker.skip_step(1);
        assert_eq!(tracker.step(1).map(|s| s.status), Some(StepStatus::Skipped));
    }

    #[test]
    fn test_step_icons() {
        let mut tracker = ProgressTracker::new(
            "Installing",
            vec![
                ProgressStep::new("Docker", "Install engine"),
                ProgressStep::new("Tailscale", ""),
                ProgressStep::new("SSH", ""),
                ProgressStep::new("Claude", ""),
                ProgressStep::new("Verify", ""),
            ],
        );
        let view = plain_text(&tracker.view());
        assert!(view.contains("⠋ Docker - Install engine"));
        assert!(view.contains("○ Tailscale"));

        tracker.set_current_step(0);
        tracker.set_current_step(1);
        tracker.fail_step(1, "auth key rejected");
        tracker.skip_step(2);
        tracker.set_current_step(3);

        let view = plain_text(&tracker.view());
        assert!(view.contains("✓ Docker - Install engine ("));
        assert!(view.contains("✗ Tailscale ("));
        assert!(view.contains("auth key rejected"));
        assert!(view.contains("◌ SSH"));
        assert!(view.contains("⠋ Claude"));
        assert!(view.contains("○ Verify"));
    }

    #[test]
    fn test_tick_animates_spinner() {
        let mut tracker = install_steps(1).with_spinner_interval(Duration::from_millis(50));
        assert_eq!(
            tracker.init(),
            Some(Command::Tick(Duration::from_millis(50)))
        );
        assert_eq!(
            tracker.update(&TuiEvent::Tick),
            Some(Command::Tick(Duration::from_millis(50)))
        );
        assert!(plain_text(&tracker.view()).contains("⠙ step 0"));
        assert_eq!(tracker.update(&TuiEvent::Enter), None);
    }

    #[test]
    fn test_output_section_truncates_long_lines() {
        let mut tracker = install_steps(1).with_width(20);
        assert!(!plain_text(&tracker.view()).contains("Output:"));

        tracker.add_log_line("short");
        tracker.add_log_line("a very long line of installer output");
        let view = plain_text(&tracker.view());
        assert!(view.contains("Output:"));
        assert!(view.contains(&"─".repeat(OUTPUT_RULE_WIDTH)));
        assert!(view.contains("  short"));
        assert!(view.contains("  a very long lin..."));
        assert!(!view.contains("installer output"));
    }

    #[test]
    fn test_set_output() {
        let mut tracker = install_steps(1);
        tracker.set_output(0, "done");
        assert_eq!(tracker.step(0).map(|s| s.output.as_str()), Some("done"));
    }
}
