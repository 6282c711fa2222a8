//! 几何图元定义
//!
//! 支持的基本图元：
//! - 点 (Point)：整数像素坐标
//! - 线段 (Line)：两端点加扫描转换算法标记
//! - 圆 (Circle)：圆心加非负整数半径
//! - 矩形 (Rect)：轴对齐，边界包含

use crate::error::CoreError;
use crate::math::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 像素点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// 平移，坐标在 i32 范围两端饱和
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 线段扫描转换算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineAlgorithm {
    Dda,
    Bresenham,
}

impl LineAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            LineAlgorithm::Dda => "DDA",
            LineAlgorithm::Bresenham => "Bresenham",
        }
    }
}

impl FromStr for LineAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DDA" => Ok(LineAlgorithm::Dda),
            "BRESENHAM" => Ok(LineAlgorithm::Bresenham),
            _ => Err(CoreError::UnknownLineAlgorithm(s.to_string())),
        }
    }
}

/// 线段
///
/// 算法标记在创建时确定，之后的变换和裁剪只改变端点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
    algo: LineAlgorithm,
}

impl Line {
    pub fn new(p0: Point, p1: Point, algo: LineAlgorithm) -> Self {
        Self { p0, p1, algo }
    }

    pub fn algo(&self) -> LineAlgorithm {
        self.algo
    }

    /// 替换端点，保留算法标记
    pub fn with_endpoints(&self, p0: Point, p1: Point) -> Self {
        Self { p0, p1, algo: self.algo }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.p0 = self.p0.translated(dx, dy);
        self.p1 = self.p1.translated(dx, dy);
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.p0, self.p1)
    }
}

#[derive(Deserialize)]
struct CircleRepr {
    center: Point,
    radius: i32,
}

impl From<CircleRepr> for Circle {
    fn from(repr: CircleRepr) -> Self {
        Circle::new(repr.center, repr.radius)
    }
}

/// 圆
///
/// 半径始终 ≥ 0：构造、修改和反序列化时负值截为 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CircleRepr")]
pub struct Circle {
    pub center: Point,
    radius: i32,
}

impl Circle {
    pub fn new(center: Point, radius: i32) -> Self {
        Self {
            center,
            radius: radius.max(0),
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(0);
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.center = self.center.translated(dx, dy);
    }

    pub fn bounding_box(&self) -> Rect {
        let r = self.radius;
        Rect::new(
            self.center.x.saturating_sub(r),
            self.center.y.saturating_sub(r),
            r.saturating_mul(2),
            r.saturating_mul(2),
        )
    }
}

#[derive(Deserialize)]
struct RectRepr {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl From<RectRepr> for Rect {
    fn from(repr: RectRepr) -> Self {
        Rect::new(repr.left, repr.top, repr.width, repr.height)
    }
}

/// 轴对齐矩形
///
/// `right = left + width`，`bottom = top + height`，两条边都属于矩形。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RectRepr")]
pub struct Rect {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// 从四条边构造，边的顺序可以颠倒
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let (l, r) = if left <= right { (left, right) } else { (right, left) };
        let (t, b) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Self::new(l, t, r.saturating_sub(l), b.saturating_sub(t))
    }

    /// 包含两个角点的规范化矩形
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::from_edges(a.x, a.y, b.x, b.y)
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// 浮点中心 `((left+right)/2, (top+bottom)/2)`
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.left as f64 + self.right() as f64) / 2.0,
            (self.top as f64 + self.bottom() as f64) / 2.0,
        )
    }

    /// 包含边界的点包含测试
    pub fn contains(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right() && self.top <= p.y && p.y <= self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.left.saturating_add(dx), self.top.saturating_add(dy), self.width, self.height)
    }

    pub fn union(&self, other: &Rect) -> Self {
        Self::from_edges(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}x{})", self.left, self.top, self.width, self.height)
    }
}

/// 图元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Line(Line),
    Circle(Circle),
}

impl Primitive {
    /// 获取图元的包围盒
    pub fn bounding_box(&self) -> Rect {
        match self {
            Primitive::Line(l) => l.bounding_box(),
            Primitive::Circle(c) => c.bounding_box(),
        }
    }

    /// 获取图元的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Line(_) => "Line",
            Primitive::Circle(_) => "Circle",
        }
    }
}

impl From<Line> for Primitive {
    fn from(line: Line) -> Self {
        Primitive::Line(line)
    }
}

impl From<Circle> for Primitive {
    fn from(circle: Circle) -> Self {
        Primitive::Circle(circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_clamps_negative_size() {
        let r = Rect::new(5, 5, -3, 4);
        assert_eq!(r.width(), 0);
        assert_eq!(r.height(), 4);
        assert_eq!(r.right(), 5);
    }

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(10, 2), Point::new(4, 8));
        assert_eq!(r, Rect::new(4, 2, 6, 6));
        assert!(r.contains(Point::new(10, 8)));
        assert!(r.contains(Point::new(4, 2)));
        assert!(!r.contains(Point::new(11, 8)));
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let p = Point::new(i32::MAX - 1, i32::MIN + 1).translated(10, -10);
        assert_eq!(p, Point::new(i32::MAX, i32::MIN));

        let r = Rect::new(i32::MAX - 5, 0, 100, 10);
        assert_eq!(r.right(), i32::MAX);
        assert!(r.contains(Point::new(i32::MAX, 5)));
        assert_eq!(Rect::new(0, i32::MAX, 0, 50).bottom(), i32::MAX);
        assert_eq!(Rect::from_points(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0)).width(), i32::MAX);

        let c = Circle::new(Point::new(i32::MIN, 0), i32::MAX);
        assert_eq!(c.bounding_box().left(), i32::MIN);
        assert_eq!(c.bounding_box().width(), i32::MAX);
    }

    #[test]
    fn test_rect_center() {
        let c = Rect::new(0, 0, 5, 4).center();
        assert_eq!(c, Point2::new(2.5, 2.0));
    }

    #[test]
    fn test_circle_radius_clamped() {
        let mut c = Circle::new(Point::new(0, 0), -4);
        assert_eq!(c.radius(), 0);
        c.set_radius(7);
        assert_eq!(c.radius(), 7);
        c.set_radius(-1);
        assert_eq!(c.radius(), 0);
    }

    #[test]
    fn test_circle_deserialize_clamps_radius() {
        let c: Circle = serde_json::from_str(r#"{"center":{"x":3,"y":4},"radius":-9}"#).unwrap();
        assert_eq!(c.center, Point::new(3, 4));
        assert_eq!(c.radius(), 0);

        let r: Rect =
            serde_json::from_str(r#"{"left":1,"top":2,"width":-3,"height":4}"#).unwrap();
        assert_eq!(r, Rect::new(1, 2, 0, 4));
    }

    #[test]
    fn test_line_keeps_algorithm() {
        let line = Line::new(Point::new(0, 0), Point::new(3, 3), LineAlgorithm::Dda);
        let moved = line.with_endpoints(Point::new(1, 1), Point::new(2, 2));
        assert_eq!(moved.algo(), LineAlgorithm::Dda);
        assert_eq!(moved.p1, Point::new(2, 2));
    }

    #[test]
    fn test_line_algorithm_parse() {
        assert_eq!("dda".parse::<LineAlgorithm>().unwrap(), LineAlgorithm::Dda);
        assert_eq!(
            "Bresenham".parse::<LineAlgorithm>().unwrap(),
            LineAlgorithm::Bresenham
        );
        assert!(matches!(
            "wu".parse::<LineAlgorithm>(),
            Err(CoreError::UnknownLineAlgorithm(_))
        ));
    }

    #[test]
    fn test_primitive_bbox() {
        let c = Primitive::from(Circle::new(Point::new(10, 10), 3));
        assert_eq!(c.bounding_box(), Rect::new(7, 7, 6, 6));
        assert_eq!(c.type_name(), "Circle");
    }
}
