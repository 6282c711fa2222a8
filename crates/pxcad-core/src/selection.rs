//! 选择集与选择包围盒

use crate::geometry::{Point, Rect};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 选中图元的下标集合
///
/// 下标是弱引用：场景结构变化后必须调用 [`Selection::sanitize`]。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub lines: BTreeSet<usize>,
    pub circles: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.circles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len() + self.circles.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.circles.clear();
    }

    /// 丢弃超出场景范围的下标
    pub fn sanitize(&mut self, scene: &Scene) {
        let (nl, nc) = (scene.lines.len(), scene.circles.len());
        self.lines.retain(|&i| i < nl);
        self.circles.retain(|&i| i < nc);
    }

    /// 选中场景中的全部图元
    pub fn select_all(scene: &Scene) -> Self {
        Self {
            lines: (0..scene.lines.len()).collect(),
            circles: (0..scene.circles.len()).collect(),
        }
    }
}

/// 计算选择集的包围盒，失效下标被忽略，空选择返回 None
pub fn selection_bbox(scene: &Scene, selection: &Selection) -> Option<Rect> {
    let mut points: Vec<Point> = Vec::new();
    for line in selection.lines.iter().filter_map(|&i| scene.lines.get(i)) {
        points.push(line.p0);
        points.push(line.p1);
    }
    for circle in selection.circles.iter().filter_map(|&i| scene.circles.get(i)) {
        let (c, r) = (circle.center, circle.radius());
        points.push(Point::new(c.x - r, c.y - r));
        points.push(Point::new(c.x + r, c.y + r));
    }

    let first = *points.first()?;
    let (mut l, mut t, mut r, mut b) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        l = l.min(p.x);
        t = t.min(p.y);
        r = r.max(p.x);
        b = b.max(p.y);
    }
    Some(Rect::from_edges(l, t, r, b))
}

/// 框选：线段任一端点在矩形内即选中，圆以圆心判断
pub fn select_in_rect(scene: &Scene, rect: Rect) -> Selection {
    Selection {
        lines: scene
            .lines
            .iter()
            .enumerate()
            .filter(|(_, l)| rect.contains(l.p0) || rect.contains(l.p1))
            .map(|(i, _)| i)
            .collect(),
        circles: scene
            .circles
            .iter()
            .enumerate()
            .filter(|(_, c)| rect.contains(c.center))
            .map(|(i, _)| i)
            .collect(),
    }
}
