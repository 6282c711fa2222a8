//! 手势参数推导
//!
//! 每个手势在按下时确定枢轴与基准量，之后根据当前鼠标位置计算出一个 [`Transform`]。

use crate::config::HandleMetrics;
use crate::geometry::{Point, Rect};
use crate::handles::{handle_positions, HandleKey};
use crate::math::{Point2, EPSILON};
use crate::transform::{angle_from_center, distance, Transform};
use serde::{Deserialize, Serialize};

/// 平移：鼠标相对按下位置的整数偏移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateGesture {
    pub anchor: Point,
}

impl TranslateGesture {
    pub fn begin(anchor: Point) -> Self {
        Self { anchor }
    }

    pub fn delta(&self, mouse: Point) -> (i32, i32) {
        (mouse.x - self.anchor.x, mouse.y - self.anchor.y)
    }

    pub fn transform(&self, mouse: Point) -> Transform {
        let (dx, dy) = self.delta(mouse);
        Transform::Translate { dx, dy }
    }
}

/// 拖动缩放控制柄
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleScale {
    pub handle: HandleKey,
    pub pivot: Point2<f64>,
    /// 被拖动控制柄的初始中心
    pub grabbed: Point,
}

impl HandleScale {
    /// 开始缩放；`handle` 必须是缩放控制柄
    pub fn begin(bbox: Rect, handle: HandleKey, from_center: bool, metrics: &HandleMetrics) -> Option<Self> {
        let opposite = handle.opposite()?;
        let layout = handle_positions(bbox, metrics.rotation_offset, metrics.rotation_top_margin);
        let pivot = if from_center {
            bbox.center()
        } else {
            layout.get(opposite).to_point2()
        };
        Some(Self {
            handle,
            pivot,
            grabbed: layout.get(handle),
        })
    }

    /// 计算 `(sx, sy)`
    ///
    /// 等比模式只对角点控制柄生效：取绝对值较大的因子（相等时取 x），
    /// 另一轴使用该绝对值并保留自身符号。
    pub fn factors(&self, mouse: Point, uniform: bool) -> (f64, f64) {
        let (affect_x, affect_y) = self.handle.axes();
        let mut sx = 1.0;
        let mut sy = 1.0;
        if affect_x {
            let denom = self.grabbed.x as f64 - self.pivot.x;
            if denom.abs() > EPSILON {
                sx = (mouse.x as f64 - self.pivot.x) / denom;
            }
        }
        if affect_y {
            let denom = self.grabbed.y as f64 - self.pivot.y;
            if denom.abs() > EPSILON {
                sy = (mouse.y as f64 - self.pivot.y) / denom;
            }
        }

        if uniform && affect_x && affect_y {
            if sx.abs() >= sy.abs() {
                sy = sx.abs().copysign(if sy != 0.0 { sy } else { 1.0 });
            } else {
                sx = sy.abs().copysign(if sx != 0.0 { sx } else { 1.0 });
            }
        }
        (sx, sy)
    }

    /// `uniform` 同时决定圆半径取 `|sx|` 还是 `max(|sx|, |sy|)`
    pub fn transform(&self, mouse: Point, uniform: bool) -> Transform {
        let (sx, sy) = self.factors(mouse, uniform);
        Transform::Scale {
            pivot: self.pivot,
            sx,
            sy,
            uniform,
        }
    }
}

/// 绕包围盒中心旋转
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateGesture {
    pub pivot: Point2<f64>,
    pub anchor_angle: f64,
}

impl RotateGesture {
    pub fn begin(bbox: Rect, mouse: Point) -> Self {
        let pivot = bbox.center();
        let m = mouse.to_point2();
        let anchor_angle = if m == pivot {
            0.0
        } else {
            angle_from_center(pivot, m)
        };
        Self { pivot, anchor_angle }
    }

    /// 当前旋转角；`snap` 为吸附增量（弧度）
    pub fn theta(&self, mouse: Point, snap: Option<f64>) -> f64 {
        let m = mouse.to_point2();
        let current = if m == self.pivot {
            self.anchor_angle
        } else {
            angle_from_center(self.pivot, m)
        };
        let theta = current - self.anchor_angle;
        match snap {
            Some(step) if step > 0.0 => (theta / step).round_ties_even() * step,
            _ => theta,
        }
    }

    pub fn transform(&self, mouse: Point, snap: Option<f64>) -> Transform {
        Transform::Rotate {
            pivot: self.pivot,
            theta: self.theta(mouse, snap),
        }
    }
}

/// 按到包围盒中心的距离比等比缩放
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformScaleGesture {
    pub pivot: Point2<f64>,
    pub anchor_dist: f64,
}

impl UniformScaleGesture {
    pub fn begin(bbox: Rect, mouse: Point) -> Self {
        let pivot = bbox.center();
        Self {
            pivot,
            anchor_dist: distance(pivot, mouse.to_point2()).max(EPSILON),
        }
    }

    pub fn factor(&self, mouse: Point) -> f64 {
        distance(self.pivot, mouse.to_point2()).max(EPSILON) / self.anchor_dist
    }

    pub fn transform(&self, mouse: Point) -> Transform {
        let s = self.factor(mouse);
        Transform::Scale {
            pivot: self.pivot,
            sx: s,
            sy: s,
            uniform: true,
        }
    }
}
