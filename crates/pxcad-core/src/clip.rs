//! 线段裁剪
//!
//! 矩形边界包含在内。两种算法：
//! - Cohen–Sutherland：区域编码，按 TOP、BOTTOM、RIGHT、LEFT 顺序求交
//! - Liang–Barsky：参数化裁剪

use crate::error::CoreError;
use crate::geometry::{Point, Rect};
use crate::math::round_i32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 区域编码
pub const INSIDE: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;
pub const BOTTOM: u8 = 4;
pub const TOP: u8 = 8;

/// 裁剪算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipAlgorithm {
    CohenSutherland,
    LiangBarsky,
}

impl ClipAlgorithm {
    /// 短标识符（"CS" / "LB"）
    pub fn id(&self) -> &'static str {
        match self {
            ClipAlgorithm::CohenSutherland => "CS",
            ClipAlgorithm::LiangBarsky => "LB",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClipAlgorithm::CohenSutherland => "Cohen-Sutherland",
            ClipAlgorithm::LiangBarsky => "Liang-Barsky",
        }
    }
}

impl fmt::Display for ClipAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClipAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "CS" | "COHENSUTHERLAND" => Ok(ClipAlgorithm::CohenSutherland),
            "LB" | "LIANGBARSKY" => Ok(ClipAlgorithm::LiangBarsky),
            _ => Err(CoreError::UnknownClipAlgorithm(s.to_string())),
        }
    }
}

/// 用指定算法裁剪线段，完全在外时返回 None
pub fn clip(p0: Point, p1: Point, rect: Rect, algorithm: ClipAlgorithm) -> Option<(Point, Point)> {
    match algorithm {
        ClipAlgorithm::CohenSutherland => cohen_sutherland(p0, p1, rect),
        ClipAlgorithm::LiangBarsky => liang_barsky(p0, p1, rect),
    }
}

/// 计算点相对矩形的区域编码
pub fn outcode(x: i32, y: i32, rect: Rect) -> u8 {
    let mut code = INSIDE;
    if x < rect.left() {
        code |= LEFT;
    } else if x > rect.right() {
        code |= RIGHT;
    }
    if y < rect.top() {
        code |= TOP;
    } else if y > rect.bottom() {
        code |= BOTTOM;
    }
    code
}

/// 线段与水平边 `y = edge` 的交点 x 坐标
fn cross_horizontal(x0: i32, y0: i32, x1: i32, y1: i32, edge: i32) -> f64 {
    if y1 == y0 {
        return x0 as f64;
    }
    let num = (x1 as i64 - x0 as i64) * (edge as i64 - y0 as i64);
    x0 as f64 + num as f64 / (y1 as i64 - y0 as i64) as f64
}

/// 线段与竖直边 `x = edge` 的交点 y 坐标
fn cross_vertical(x0: i32, y0: i32, x1: i32, y1: i32, edge: i32) -> f64 {
    if x1 == x0 {
        return y0 as f64;
    }
    let num = (y1 as i64 - y0 as i64) * (edge as i64 - x0 as i64);
    y0 as f64 + num as f64 / (x1 as i64 - x0 as i64) as f64
}

/// Cohen–Sutherland 裁剪
pub fn cohen_sutherland(p0: Point, p1: Point, rect: Rect) -> Option<(Point, Point)> {
    let (mut x0, mut y0, mut x1, mut y1) = (p0.x, p0.y, p1.x, p1.y);
    let mut code0 = outcode(x0, y0, rect);
    let mut code1 = outcode(x1, y1, rect);

    loop {
        if code0 | code1 == INSIDE {
            return Some((Point::new(x0, y0), Point::new(x1, y1)));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let code_out = if code0 != INSIDE { code0 } else { code1 };
        let (x, y) = if code_out & TOP != 0 {
            (cross_horizontal(x0, y0, x1, y1, rect.top()), rect.top() as f64)
        } else if code_out & BOTTOM != 0 {
            (cross_horizontal(x0, y0, x1, y1, rect.bottom()), rect.bottom() as f64)
        } else if code_out & RIGHT != 0 {
            (rect.right() as f64, cross_vertical(x0, y0, x1, y1, rect.right()))
        } else {
            (rect.left() as f64, cross_vertical(x0, y0, x1, y1, rect.left()))
        };

        if code_out == code0 {
            x0 = round_i32(x);
            y0 = round_i32(y);
            code0 = outcode(x0, y0, rect);
        } else {
            x1 = round_i32(x);
            y1 = round_i32(y);
            code1 = outcode(x1, y1, rect);
        }
    }
}

/// Liang–Barsky 裁剪
pub fn liang_barsky(p0: Point, p1: Point, rect: Rect) -> Option<(Point, Point)> {
    let (x0, y0) = (p0.x as i64, p0.y as i64);
    let dx = p1.x as i64 - x0;
    let dy = p1.y as i64 - y0;

    let p = [-dx, dx, -dy, dy];
    let q = [
        x0 - rect.left() as i64,
        rect.right() as i64 - x0,
        y0 - rect.top() as i64,
        rect.bottom() as i64 - y0,
    ];

    let (mut u0, mut u1) = (0.0_f64, 1.0_f64);
    for (&pi, &qi) in p.iter().zip(q.iter()) {
        if pi == 0 {
            if qi < 0 {
                return None;
            }
            continue;
        }
        let r = qi as f64 / pi as f64;
        if pi < 0 {
            if r > u1 {
                return None;
            }
            u0 = u0.max(r);
        } else {
            if r < u0 {
                return None;
            }
            u1 = u1.min(r);
        }
    }

    let (fx, fy, fdx, fdy) = (x0 as f64, y0 as f64, dx as f64, dy as f64);
    Some((
        Point::new(round_i32(fx + u0 * fdx), round_i32(fy + u0 * fdy)),
        Point::new(round_i32(fx + u1 * fdx), round_i32(fy + u1 * fdy)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: [ClipAlgorithm; 2] = [ClipAlgorithm::CohenSutherland, ClipAlgorithm::LiangBarsky];

    #[test]
    fn test_diagonal_clip() {
        let rect = Rect::new(2, 2, 4, 4);
        for algo in BOTH {
            assert_eq!(
                clip(Point::new(0, 0), Point::new(10, 10), rect, algo),
                Some((Point::new(2, 2), Point::new(6, 6))),
                "{algo}"
            );
        }
    }

    #[test]
    fn test_trivial_reject() {
        let rect = Rect::new(0, 0, 10, 10);
        for algo in BOTH {
            assert_eq!(clip(Point::new(100, 100), Point::new(200, 200), rect, algo), None);
        }
    }

    #[test]
    fn test_inside_untouched() {
        let rect = Rect::new(0, 0, 10, 10);
        for algo in BOTH {
            assert_eq!(
                clip(Point::new(1, 9), Point::new(10, 0), rect, algo),
                Some((Point::new(1, 9), Point::new(10, 0)))
            );
        }
    }

    #[test]
    fn test_boundary_inclusive() {
        // 沿右边界的线段保留
        let rect = Rect::new(0, 0, 10, 10);
        for algo in BOTH {
            assert_eq!(
                clip(Point::new(10, -5), Point::new(10, 15), rect, algo),
                Some((Point::new(10, 0), Point::new(10, 10)))
            );
        }
    }

    #[test]
    fn test_outside_not_trivially_rejected() {
        // 两端都在外且编码无交集，但线段不穿过矩形
        let rect = Rect::new(0, 0, 10, 10);
        for algo in BOTH {
            assert_eq!(clip(Point::new(-5, 8), Point::new(3, 20), rect, algo), None, "{algo}");
        }
    }

    #[test]
    fn test_degenerate_point() {
        let rect = Rect::new(0, 0, 10, 10);
        for algo in BOTH {
            assert_eq!(
                clip(Point::new(4, 4), Point::new(4, 4), rect, algo),
                Some((Point::new(4, 4), Point::new(4, 4)))
            );
            assert_eq!(clip(Point::new(40, 4), Point::new(40, 4), rect, algo), None);
        }
    }

    #[test]
    fn test_general_segments_can_diverge() {
        // Cohen–Sutherland 每次求交后取整，后续求交基于取整后的端点
        let rect = Rect::new(-8, 2, 11, 24);
        let (p0, p1) = (Point::new(7, -95), Point::new(3, 13));
        assert_eq!(cohen_sutherland(p0, p1, rect), Some((Point::new(3, 2), Point::new(3, 13))));
        assert_eq!(liang_barsky(p0, p1, rect), Some((Point::new(3, 13), Point::new(3, 13))));

        // 真实线段从角点外侧擦过，取整后的端点落在矩形内
        let rect = Rect::new(-30, 12, 19, 16);
        let (p0, p1) = (Point::new(-27, -100), Point::new(-32, 72));
        assert_eq!(cohen_sutherland(p0, p1, rect), Some((Point::new(-30, 12), Point::new(-30, 12))));
        assert_eq!(liang_barsky(p0, p1, rect), None);
    }

    #[test]
    fn test_outcodes() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(outcode(5, 5, rect), INSIDE);
        assert_eq!(outcode(-1, -1, rect), LEFT | TOP);
        assert_eq!(outcode(11, 11, rect), RIGHT | BOTTOM);
        assert_eq!(outcode(10, 10, rect), INSIDE);
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("CS".parse::<ClipAlgorithm>().unwrap(), ClipAlgorithm::CohenSutherland);
        assert_eq!("lb".parse::<ClipAlgorithm>().unwrap(), ClipAlgorithm::LiangBarsky);
        assert_eq!(
            "Cohen-Sutherland".parse::<ClipAlgorithm>().unwrap(),
            ClipAlgorithm::CohenSutherland
        );
        assert_eq!(ClipAlgorithm::LiangBarsky.id(), "LB");
        assert!(matches!(
            "XY".parse::<ClipAlgorithm>(),
            Err(CoreError::UnknownClipAlgorithm(_))
        ));
    }
}
