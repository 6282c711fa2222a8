//! 矩形编辑：裁剪窗口的创建、移动、缩放与画布约束

use crate::geometry::{Point, Rect};
use crate::handles::HandleKey;
use crate::math::round_i32;
use serde::{Deserialize, Serialize};

/// 包含两个角点的规范化矩形
pub fn rect_from_points(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

pub fn move_rect(rect: Rect, dx: i32, dy: i32) -> Rect {
    rect.translated(dx, dy)
}

/// 将矩形限制在 `[0, width] × [0, height]` 内：先缩小尺寸，再平移
pub fn clamp_rect_to_canvas(rect: Rect, width: i32, height: i32) -> Rect {
    let w = rect.width().min(width.max(0));
    let h = rect.height().min(height.max(0));
    let left = rect.left().clamp(0, width.max(0) - w);
    let top = rect.top().clamp(0, height.max(0) - h);
    Rect::new(left, top, w, h)
}

/// 由拖拽创建裁剪窗口，宽高至少为 1
pub fn clip_window_from_drag(a: Point, b: Point, canvas_width: i32, canvas_height: i32) -> Rect {
    let rect = Rect::new(
        a.x.min(b.x),
        a.y.min(b.y),
        (b.x - a.x).abs().max(1),
        (b.y - a.y).abs().max(1),
    );
    clamp_rect_to_canvas(rect, canvas_width, canvas_height)
}

/// 平移后约束在画布内（方向键微调、拖动）
pub fn nudge_rect(rect: Rect, dx: i32, dy: i32, canvas_width: i32, canvas_height: i32) -> Rect {
    clamp_rect_to_canvas(move_rect(rect, dx, dy), canvas_width, canvas_height)
}

/// 控制柄缩放选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeOptions {
    /// 角点拖动时保持初始宽高比
    pub keep_aspect: bool,
    /// 以矩形中心为锚点对称缩放
    pub from_center: bool,
    pub min_width: i32,
    pub min_height: i32,
    /// 画布尺寸，结果会被裁到 `[0, w] × [0, h]`
    pub bounds: Option<(i32, i32)>,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            keep_aspect: false,
            from_center: false,
            min_width: 1,
            min_height: 1,
            bounds: None,
        }
    }
}

/// 沿一个轴的编辑：返回新的 (低边, 高边)
fn drag_axis(lo0: i32, hi0: i32, moves_lo: bool, moves_hi: bool, mouse: i32, from_center: bool) -> (i32, i32) {
    if !(moves_lo || moves_hi) {
        return (lo0, hi0);
    }
    if from_center {
        let c = (lo0 as f64 + hi0 as f64) / 2.0;
        let half = (mouse as f64 - c).abs();
        return (round_i32(c - half), round_i32(c + half));
    }
    if moves_lo {
        (mouse, hi0)
    } else {
        (lo0, mouse)
    }
}

/// 把长度不足 `min` 的区间扩展到 `min`，远离锚点方向扩展
fn enforce_min(lo: i32, hi: i32, min: i32, anchor: Option<i32>, from_center: bool) -> (i32, i32) {
    if hi - lo >= min {
        return (lo, hi);
    }
    if from_center {
        let c = (lo as f64 + hi as f64) / 2.0;
        let lo = round_i32(c - min as f64 / 2.0);
        return (lo, lo + min);
    }
    match anchor {
        Some(a) if a == hi && a != lo => (hi - min, hi),
        _ => (lo, lo + min),
    }
}

/// 拖动控制柄缩放矩形
///
/// 被拖动的边跟随鼠标，其余边保持不动（或在 `from_center` 时关于中心对称）。
/// 角点拖动且 `keep_aspect` 时高度由宽度和初始宽高比决定，从锚定边朝鼠标一侧展开。
/// 结果先规范化并裁到画布内，再保证最小尺寸；补足尺寸后越出画布的部分平移回画布，
/// 只有最小尺寸大于画布时才会小于最小尺寸。
pub fn resize_rect_from_handle(rect0: Rect, handle: HandleKey, mouse: Point, opts: &ResizeOptions) -> Rect {
    let (l0, t0, r0, b0) = (rect0.left(), rect0.top(), rect0.right(), rect0.bottom());

    let (mut l, mut r) = drag_axis(l0, r0, handle.moves_left(), handle.moves_right(), mouse.x, opts.from_center);
    let (mut t, mut b) = drag_axis(t0, b0, handle.moves_top(), handle.moves_bottom(), mouse.y, opts.from_center);

    let anchor_y = if handle.moves_top() {
        Some(b0)
    } else if handle.moves_bottom() {
        Some(t0)
    } else {
        None
    };

    if opts.keep_aspect && handle.is_corner() && rect0.width() > 0 && rect0.height() > 0 {
        let aspect = rect0.width() as f64 / rect0.height() as f64;
        let h = round_i32((r - l).abs() as f64 / aspect);
        if opts.from_center {
            let cy = (t0 as f64 + b0 as f64) / 2.0;
            t = round_i32(cy - h as f64 / 2.0);
            b = t + h;
        } else if let Some(anchor) = anchor_y {
            if mouse.y >= anchor {
                t = anchor;
                b = anchor + h;
            } else {
                t = anchor - h;
                b = anchor;
            }
        }
    }

    if l > r {
        std::mem::swap(&mut l, &mut r);
    }
    if t > b {
        std::mem::swap(&mut t, &mut b);
    }

    if let Some((w, h)) = opts.bounds {
        let (w, h) = (w.max(0), h.max(0));
        l = l.clamp(0, w);
        r = r.clamp(0, w);
        t = t.clamp(0, h);
        b = b.clamp(0, h);
    }

    let anchor_x = if handle.moves_left() {
        Some(r0)
    } else if handle.moves_right() {
        Some(l0)
    } else {
        None
    };
    (l, r) = enforce_min(l, r, opts.min_width.max(0), anchor_x, opts.from_center);
    (t, b) = enforce_min(t, b, opts.min_height.max(0), anchor_y, opts.from_center);

    let rect = Rect::from_edges(l, t, r, b);
    match opts.bounds {
        Some((w, h)) => clamp_rect_to_canvas(rect, w, h),
        None => rect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Rect {
        Rect::new(10, 10, 20, 10)
    }

    #[test]
    fn test_corner_follows_mouse() {
        let r = resize_rect_from_handle(base(), HandleKey::Se, Point::new(40, 30), &ResizeOptions::default());
        assert_eq!(r, Rect::new(10, 10, 30, 20));
    }

    #[test]
    fn test_keep_aspect() {
        let opts = ResizeOptions { keep_aspect: true, ..Default::default() };
        let r = resize_rect_from_handle(base(), HandleKey::Se, Point::new(40, 30), &opts);
        assert_eq!(r, Rect::new(10, 10, 30, 15));

        // 向上越过锚定边
        let r = resize_rect_from_handle(base(), HandleKey::Se, Point::new(50, 0), &opts);
        assert_eq!(r, Rect::new(10, -10, 40, 20));
    }

    #[test]
    fn test_edge_from_center() {
        let opts = ResizeOptions { from_center: true, ..Default::default() };
        let r = resize_rect_from_handle(base(), HandleKey::E, Point::new(35, 99), &opts);
        assert_eq!(r, Rect::new(5, 10, 30, 10));
    }

    #[test]
    fn test_min_size_grows_away_from_anchor() {
        let opts = ResizeOptions { min_width: 8, min_height: 8, ..Default::default() };
        let r = resize_rect_from_handle(base(), HandleKey::W, Point::new(29, 0), &opts);
        assert_eq!(r, Rect::new(22, 10, 8, 10));

        // 越过右边后从原右边向右展开
        let r = resize_rect_from_handle(base(), HandleKey::W, Point::new(33, 0), &opts);
        assert_eq!(r, Rect::new(30, 10, 8, 10));
    }

    #[test]
    fn test_cropped_to_bounds() {
        let opts = ResizeOptions { bounds: Some((100, 100)), ..Default::default() };
        let r = resize_rect_from_handle(base(), HandleKey::Se, Point::new(1000, 1000), &opts);
        assert_eq!(r, Rect::new(10, 10, 90, 90));

        let r = resize_rect_from_handle(base(), HandleKey::Nw, Point::new(-20, -20), &opts);
        assert_eq!(r, Rect::new(0, 0, 30, 20));
    }

    #[test]
    fn test_min_size_holds_at_canvas_edge() {
        let opts = ResizeOptions {
            min_width: 8,
            min_height: 8,
            bounds: Some((100, 100)),
            ..Default::default()
        };
        // 左边越过原右边并拖出画布：先裁到画布，再补足宽度并移回画布
        let r = resize_rect_from_handle(Rect::new(80, 10, 15, 10), HandleKey::W, Point::new(150, 0), &opts);
        assert_eq!(r, Rect::new(92, 10, 8, 10));

        let r = resize_rect_from_handle(Rect::new(10, 90, 10, 8), HandleKey::N, Point::new(0, 300), &opts);
        assert!(r.height() >= 8 && r.bottom() <= 100, "{r}");
    }

    #[test]
    fn test_edge_handle_keeps_other_axis() {
        let r = resize_rect_from_handle(base(), HandleKey::N, Point::new(500, 0), &ResizeOptions::default());
        assert_eq!(r, Rect::new(10, 0, 20, 20));
    }

    #[test]
    fn test_clamp_rect_to_canvas() {
        assert_eq!(clamp_rect_to_canvas(Rect::new(-5, 10, 20, 20), 100, 100), Rect::new(0, 10, 20, 20));
        assert_eq!(clamp_rect_to_canvas(Rect::new(90, 95, 20, 20), 100, 100), Rect::new(80, 80, 20, 20));
        assert_eq!(clamp_rect_to_canvas(Rect::new(-50, 0, 300, 20), 100, 100), Rect::new(0, 0, 100, 20));
    }

    #[test]
    fn test_clip_window_from_drag() {
        assert_eq!(
            clip_window_from_drag(Point::new(50, 40), Point::new(10, 20), 780, 650),
            Rect::new(10, 20, 40, 20)
        );
        // 单击得到 1x1
        assert_eq!(
            clip_window_from_drag(Point::new(5, 5), Point::new(5, 5), 780, 650),
            Rect::new(5, 5, 1, 1)
        );
        assert_eq!(
            clip_window_from_drag(Point::new(700, 600), Point::new(900, 700), 780, 650),
            Rect::new(580, 550, 200, 100)
        );
    }

    #[test]
    fn test_nudge_clamped() {
        assert_eq!(nudge_rect(Rect::new(2, 2, 10, 10), -10, 0, 100, 100), Rect::new(0, 2, 10, 10));
        assert_eq!(move_rect(Rect::new(2, 2, 10, 10), -10, 0), Rect::new(-8, 2, 10, 10));
    }
}
