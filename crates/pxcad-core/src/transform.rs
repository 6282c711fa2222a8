//! 变换引擎
//!
//! 纯点映射（绕浮点枢轴旋转/缩放）以及基于快照的场景修改。
//! 拖拽过程中每次更新都从手势开始时的快照重新计算，不会累积舍入误差。

use crate::geometry::Point;
use crate::math::{round_i32, Point2};
use crate::scene::Scene;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};

/// 绕枢轴旋转（不舍入）
pub fn rotate_point_f(p: Point2<f64>, pivot: Point2<f64>, theta: f64) -> Point2<f64> {
    let (st, ct) = theta.sin_cos();
    let (dx, dy) = (p.x - pivot.x, p.y - pivot.y);
    Point2::new(
        pivot.x + ct * dx - st * dy,
        pivot.y + st * dx + ct * dy,
    )
}

/// 绕枢轴旋转并舍入到像素
pub fn rotate_point(p: Point, pivot: Point2<f64>, theta: f64) -> Point {
    let r = rotate_point_f(p.to_point2(), pivot, theta);
    Point::new(round_i32(r.x), round_i32(r.y))
}

/// 相对枢轴按轴缩放（不舍入）
pub fn scale_point_f(p: Point2<f64>, pivot: Point2<f64>, sx: f64, sy: f64) -> Point2<f64> {
    Point2::new(pivot.x + sx * (p.x - pivot.x), pivot.y + sy * (p.y - pivot.y))
}

/// 相对枢轴按轴缩放并舍入到像素
pub fn scale_point(p: Point, pivot: Point2<f64>, sx: f64, sy: f64) -> Point {
    let s = scale_point_f(p.to_point2(), pivot, sx, sy);
    Point::new(round_i32(s.x), round_i32(s.y))
}

pub fn distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    (b - a).norm()
}

/// 向量 `p - center` 的角度（弧度）
pub fn angle_from_center(center: Point2<f64>, p: Point2<f64>) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// 作用于选择集的变换
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate { dx: i32, dy: i32 },
    Rotate { pivot: Point2<f64>, theta: f64 },
    Scale { pivot: Point2<f64>, sx: f64, sy: f64, uniform: bool },
}

impl Transform {
    pub fn map_point(&self, p: Point) -> Point {
        match *self {
            Transform::Translate { dx, dy } => p.translated(dx, dy),
            Transform::Rotate { pivot, theta } => rotate_point(p, pivot, theta),
            Transform::Scale { pivot, sx, sy, .. } => scale_point(p, pivot, sx, sy),
        }
    }

    /// 平移与旋转保持半径；缩放按 `|sx|`（等比）或 `max(|sx|, |sy|)` 缩放
    pub fn map_radius(&self, r: i32) -> i32 {
        match *self {
            Transform::Translate { .. } | Transform::Rotate { .. } => r,
            Transform::Scale { sx, sy, uniform, .. } => {
                let factor = if uniform { sx.abs() } else { sx.abs().max(sy.abs()) };
                round_i32(r as f64 * factor).max(0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub index: usize,
    pub p0: Point,
    pub p1: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleSnapshot {
    pub index: usize,
    pub center: Point,
    pub radius: i32,
}

/// 变换后的绝对几何
pub type TransformedGeometry = TransformSnapshot;

/// 手势开始时选中图元的绝对坐标
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub lines: Vec<LineSnapshot>,
    pub circles: Vec<CircleSnapshot>,
}

impl TransformSnapshot {
    /// 记录选择集的当前几何，失效下标被跳过
    pub fn capture(scene: &Scene, selection: &Selection) -> Self {
        let lines = selection
            .lines
            .iter()
            .filter_map(|&index| {
                scene.lines.get(index).map(|l| LineSnapshot {
                    index,
                    p0: l.p0,
                    p1: l.p1,
                })
            })
            .collect();
        let circles = selection
            .circles
            .iter()
            .filter_map(|&index| {
                scene.circles.get(index).map(|c| CircleSnapshot {
                    index,
                    center: c.center,
                    radius: c.radius(),
                })
            })
            .collect();
        Self { lines, circles }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.circles.is_empty()
    }

    /// 计算快照经过变换后的几何，不修改场景
    pub fn apply(&self, transform: &Transform) -> TransformedGeometry {
        Self {
            lines: self
                .lines
                .iter()
                .map(|s| LineSnapshot {
                    index: s.index,
                    p0: transform.map_point(s.p0),
                    p1: transform.map_point(s.p1),
                })
                .collect(),
            circles: self
                .circles
                .iter()
                .map(|s| CircleSnapshot {
                    index: s.index,
                    center: transform.map_point(s.center),
                    radius: transform.map_radius(s.radius),
                })
                .collect(),
        }
    }

    /// 将变换结果写回场景，跳过已失效的下标，返回写入的图元数
    pub fn commit(&self, scene: &mut Scene, transform: &Transform) -> usize {
        let result = self.apply(transform);
        let mut written = 0;
        for s in &result.lines {
            if let Some(line) = scene.lines.get_mut(s.index) {
                line.p0 = s.p0;
                line.p1 = s.p1;
                written += 1;
            }
        }
        for s in &result.circles {
            if let Some(circle) = scene.circles.get_mut(s.index) {
                circle.center = s.center;
                circle.set_radius(s.radius);
                written += 1;
            }
        }
        written
    }
}

/// 对快照应用变换并写入场景
pub fn apply_transform(scene: &mut Scene, snapshot: &TransformSnapshot, transform: &Transform) -> usize {
    snapshot.commit(scene, transform)
}
