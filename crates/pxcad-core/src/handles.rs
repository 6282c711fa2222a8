//! 包围盒控制柄
//!
//! 8 个缩放控制柄（角点和边中点）加上顶边上方的旋转控制柄。

use crate::config::HandleMetrics;
use crate::geometry::{Point, Rect};
use crate::math::{trunc_i32, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 控制柄标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKey {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Rot,
}

impl HandleKey {
    /// 缩放控制柄，按命中测试顺序排列
    pub const RESIZE: [HandleKey; 8] = [
        HandleKey::Nw,
        HandleKey::N,
        HandleKey::Ne,
        HandleKey::E,
        HandleKey::Se,
        HandleKey::S,
        HandleKey::Sw,
        HandleKey::W,
    ];

    pub const ALL: [HandleKey; 9] = [
        HandleKey::Nw,
        HandleKey::N,
        HandleKey::Ne,
        HandleKey::E,
        HandleKey::Se,
        HandleKey::S,
        HandleKey::Sw,
        HandleKey::W,
        HandleKey::Rot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HandleKey::Nw => "nw",
            HandleKey::N => "n",
            HandleKey::Ne => "ne",
            HandleKey::E => "e",
            HandleKey::Se => "se",
            HandleKey::S => "s",
            HandleKey::Sw => "sw",
            HandleKey::W => "w",
            HandleKey::Rot => "rot",
        }
    }

    /// 对侧控制柄；旋转控制柄没有对侧
    pub fn opposite(&self) -> Option<HandleKey> {
        match self {
            HandleKey::Nw => Some(HandleKey::Se),
            HandleKey::N => Some(HandleKey::S),
            HandleKey::Ne => Some(HandleKey::Sw),
            HandleKey::E => Some(HandleKey::W),
            HandleKey::Se => Some(HandleKey::Nw),
            HandleKey::S => Some(HandleKey::N),
            HandleKey::Sw => Some(HandleKey::Ne),
            HandleKey::W => Some(HandleKey::E),
            HandleKey::Rot => None,
        }
    }

    /// 拖动该控制柄影响的轴 `(x, y)`
    pub fn axes(&self) -> (bool, bool) {
        match self {
            HandleKey::N | HandleKey::S => (false, true),
            HandleKey::E | HandleKey::W => (true, false),
            HandleKey::Rot => (false, false),
            _ => (true, true),
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(self, HandleKey::Nw | HandleKey::Ne | HandleKey::Se | HandleKey::Sw)
    }

    pub fn is_resize(&self) -> bool {
        *self != HandleKey::Rot
    }

    /// 是否拖动左边
    pub fn moves_left(&self) -> bool {
        matches!(self, HandleKey::Nw | HandleKey::W | HandleKey::Sw)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, HandleKey::Ne | HandleKey::E | HandleKey::Se)
    }

    /// 是否拖动上边
    pub fn moves_top(&self) -> bool {
        matches!(self, HandleKey::Nw | HandleKey::N | HandleKey::Ne)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, HandleKey::Sw | HandleKey::S | HandleKey::Se)
    }

    fn slot(&self) -> usize {
        match self {
            HandleKey::Nw => 0,
            HandleKey::N => 1,
            HandleKey::Ne => 2,
            HandleKey::E => 3,
            HandleKey::Se => 4,
            HandleKey::S => 5,
            HandleKey::Sw => 6,
            HandleKey::W => 7,
            HandleKey::Rot => 8,
        }
    }
}

impl fmt::Display for HandleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 控制柄中心位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleLayout {
    centers: [Point; 9],
}

impl HandleLayout {
    pub fn get(&self, key: HandleKey) -> Point {
        self.centers[key.slot()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (HandleKey, Point)> + '_ {
        HandleKey::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

/// 计算包围盒各控制柄的中心
pub fn handle_positions(rect: Rect, rot_offset: i32, top_margin: i32) -> HandleLayout {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let cx = trunc_i32(l as f64 + rect.width() as f64 / 2.0);
    let cy = trunc_i32(t as f64 + rect.height() as f64 / 2.0);
    let rot_y = (t - rot_offset).max(top_margin);

    HandleLayout {
        centers: [
            Point::new(l, t),
            Point::new(cx, t),
            Point::new(r, t),
            Point::new(r, cy),
            Point::new(r, b),
            Point::new(cx, b),
            Point::new(l, b),
            Point::new(l, cy),
            Point::new(cx, rot_y),
        ],
    }
}

/// 以 `center` 为中心、边长 `size` 的半开方形区域
pub fn point_in_square(center: Point, size: i32, p: Point) -> bool {
    let half = size / 2;
    let (x0, y0) = (center.x - half, center.y - half);
    x0 <= p.x && p.x < x0 + size && y0 <= p.y && p.y < y0 + size
}

/// 闭圆区域
pub fn point_in_circle(center: Point, radius: i32, p: Point) -> bool {
    let dx = (p.x - center.x) as i64;
    let dy = (p.y - center.y) as i64;
    let r = radius as i64;
    dx * dx + dy * dy <= r * r
}

/// 点到线段 `a → b` 的距离不超过 `radius`；退化线段不命中
pub fn point_near_segment(a: Point, b: Point, radius: i32, p: Point) -> bool {
    let v = Vector2::new((b.x - a.x) as f64, (b.y - a.y) as f64);
    let w = Vector2::new((p.x - a.x) as f64, (p.y - a.y) as f64);
    let len2 = v.norm_squared();
    if len2 <= 0.0 {
        return false;
    }
    let t = (w.dot(&v) / len2).clamp(0.0, 1.0);
    let d = w - v * t;
    d.norm_squared() <= (radius as f64) * (radius as f64)
}

/// 只测试 8 个缩放控制柄（裁剪窗口使用）
pub fn hit_test_resize_handles(layout: &HandleLayout, metrics: &HandleMetrics, p: Point) -> Option<HandleKey> {
    let size = metrics.hit_square_size();
    HandleKey::RESIZE
        .into_iter()
        .find(|&k| point_in_square(layout.get(k), size, p))
}

/// 按 nw、n、ne、e、se、s、sw、w、旋转控制柄、旋转杆的顺序命中测试
pub fn hit_test_handles(rect: Rect, metrics: &HandleMetrics, p: Point) -> Option<HandleKey> {
    let layout = handle_positions(rect, metrics.rotation_offset, metrics.rotation_top_margin);
    if let Some(key) = hit_test_resize_handles(&layout, metrics, p) {
        return Some(key);
    }

    let rot = layout.get(HandleKey::Rot);
    if point_in_circle(rot, metrics.knob_hit_radius(), p) {
        return Some(HandleKey::Rot);
    }
    if point_near_segment(layout.get(HandleKey::N), rot, metrics.stem_hit_radius, p) {
        return Some(HandleKey::Rot);
    }
    None
}

/// 裁剪窗口的控制柄命中测试
pub fn hit_test_clip_handles(rect: Rect, metrics: &HandleMetrics, p: Point) -> Option<HandleKey> {
    let layout = handle_positions(rect, metrics.rotation_offset, metrics.rotation_top_margin);
    hit_test_resize_handles(&layout, metrics, p)
}
