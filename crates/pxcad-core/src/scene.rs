//! 场景：有序的线段列表和圆列表
//!
//! 图元以当前下标作为身份标识。追加是安全的；删除会使后续下标失效，
//! 调用者需在结构性修改后对选择集执行 `Selection::sanitize`。

use crate::geometry::{Circle, Line, Primitive};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub lines: Vec<Line>,
    pub circles: Vec<Circle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加线段，返回其下标
    pub fn add_line(&mut self, line: Line) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    /// 追加圆，返回其下标
    pub fn add_circle(&mut self, circle: Circle) -> usize {
        self.circles.push(circle);
        self.circles.len() - 1
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.circles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.circles.is_empty()
    }

    /// 图元总数
    pub fn len(&self) -> usize {
        self.lines.len() + self.circles.len()
    }

    /// 按绘制顺序遍历所有图元：先线段，后圆
    pub fn primitives(&self) -> impl Iterator<Item = Primitive> + '_ {
        self.lines
            .iter()
            .copied()
            .map(Primitive::Line)
            .chain(self.circles.iter().copied().map(Primitive::Circle))
    }
}
