//! 扫描转换
//!
//! 每种算法都是一个惰性、有限的迭代器，可通过重新调用构造函数重新开始。
//! 迭代器会输出画布外的像素，丢弃它们是绘制表面的职责。

use crate::geometry::{Circle, Line, LineAlgorithm, Point, Primitive};
use crate::math::round_i32;

/// DDA 线段迭代器
///
/// 以 `f64` 累加步进，每次步进前输出舍入后的当前位置。
#[derive(Debug, Clone)]
pub struct DdaLine {
    x: f64,
    y: f64,
    x_inc: f64,
    y_inc: f64,
    remaining: u64,
}

impl DdaLine {
    pub fn new(p0: Point, p1: Point) -> Self {
        let dx = p1.x as i64 - p0.x as i64;
        let dy = p1.y as i64 - p0.y as i64;
        let steps = dx.abs().max(dy.abs());
        let (x_inc, y_inc) = if steps == 0 {
            (0.0, 0.0)
        } else {
            (dx as f64 / steps as f64, dy as f64 / steps as f64)
        };
        Self {
            x: p0.x as f64,
            y: p0.y as f64,
            x_inc,
            y_inc,
            remaining: steps as u64 + 1,
        }
    }
}

impl Iterator for DdaLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let p = Point::new(round_i32(self.x), round_i32(self.y));
        self.x += self.x_inc;
        self.y += self.y_inc;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

/// Bresenham 整数线段迭代器
#[derive(Debug, Clone)]
pub struct BresenhamLine {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl BresenhamLine {
    pub fn new(p0: Point, p1: Point) -> Self {
        let (x0, y0) = (p0.x as i64, p0.y as i64);
        let (x1, y1) = (p1.x as i64, p1.y as i64);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = Point::new(self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(p);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(p)
    }
}

/// Bresenham（中点）圆迭代器
///
/// 每个八分圆步输出 8 个对称点，坐标轴和对角线上的重复点照常输出。
#[derive(Debug, Clone)]
pub struct BresenhamCircle {
    cx: i32,
    cy: i32,
    x: i32,
    y: i32,
    d: i32,
    octants: [Point; 8],
    next_octant: usize,
    single: Option<Point>,
}

impl BresenhamCircle {
    pub fn new(center: Point, radius: i32) -> Self {
        let mut it = Self {
            cx: center.x,
            cy: center.y,
            x: 0,
            y: radius,
            d: 1 - radius,
            octants: [center; 8],
            next_octant: 8,
            single: None,
        };
        if radius <= 0 {
            it.single = Some(center);
            // x > y：主循环不再执行
            it.x = 1;
            it.y = 0;
        }
        it
    }

    fn fill_octants(&mut self) {
        let (cx, cy, x, y) = (self.cx, self.cy, self.x, self.y);
        self.octants = [
            Point::new(cx + x, cy + y),
            Point::new(cx + y, cy + x),
            Point::new(cx - x, cy + y),
            Point::new(cx - y, cy + x),
            Point::new(cx + x, cy - y),
            Point::new(cx + y, cy - x),
            Point::new(cx - x, cy - y),
            Point::new(cx - y, cy - x),
        ];
        self.next_octant = 0;
    }

    fn advance(&mut self) {
        self.x += 1;
        if self.d < 0 {
            self.d += 2 * self.x + 1;
        } else {
            self.y -= 1;
            self.d += 2 * (self.x - self.y) + 1;
        }
    }
}

impl Iterator for BresenhamCircle {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if let Some(p) = self.single.take() {
            return Some(p);
        }
        if self.next_octant >= 8 {
            if self.x > self.y {
                return None;
            }
            self.fill_octants();
            self.advance();
        }
        let p = self.octants[self.next_octant];
        self.next_octant += 1;
        Some(p)
    }
}

/// 任意图元的像素序列
#[derive(Debug, Clone)]
pub enum Pixels {
    Dda(DdaLine),
    Bresenham(BresenhamLine),
    Circle(BresenhamCircle),
}

impl Iterator for Pixels {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        match self {
            Pixels::Dda(it) => it.next(),
            Pixels::Bresenham(it) => it.next(),
            Pixels::Circle(it) => it.next(),
        }
    }
}

pub fn line_dda(p0: Point, p1: Point) -> DdaLine {
    DdaLine::new(p0, p1)
}

pub fn line_bresenham(p0: Point, p1: Point) -> BresenhamLine {
    BresenhamLine::new(p0, p1)
}

pub fn circle_bresenham(center: Point, radius: i32) -> BresenhamCircle {
    BresenhamCircle::new(center, radius)
}

/// 按线段的算法标记扫描转换
pub fn rasterize_line(line: &Line) -> Pixels {
    match line.algo() {
        LineAlgorithm::Dda => Pixels::Dda(line_dda(line.p0, line.p1)),
        LineAlgorithm::Bresenham => Pixels::Bresenham(line_bresenham(line.p0, line.p1)),
    }
}

pub fn rasterize_circle(circle: &Circle) -> Pixels {
    Pixels::Circle(circle_bresenham(circle.center, circle.radius()))
}

/// 扫描转换任意图元
pub fn rasterize(primitive: &Primitive) -> Pixels {
    match primitive {
        Primitive::Line(line) => rasterize_line(line),
        Primitive::Circle(circle) => rasterize_circle(circle),
    }
}
