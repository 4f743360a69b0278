//! 通用光标选择行为

/// 可在列表中移动光标的组件
pub trait Selectable {
    /// 总选项数
    fn count(&self) -> usize;
    /// 当前光标位置
    fn cursor(&self) -> usize;
    /// 设置光标位置（调用方保证在范围内）
    fn set_cursor(&mut self, index: usize);

    /// 按偏移移动光标，首尾环绕
    fn move_by(&mut self, delta: isize) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.set_cursor(wrap_index(self.cursor(), delta, count));
    }

    /// 选择下一个
    fn next(&mut self) {
        self.move_by(1);
    }

    /// 选择上一个
    fn prev(&mut self) {
        self.move_by(-1);
    }
}

/// 计算环绕后的索引，`count` 必须大于 0
pub fn wrap_index(current: usize, delta: isize, count: usize) -> usize {
    let count = count as isize;
    (current as isize + delta.rem_euclid(count)).rem_euclid(count) as usize
}
