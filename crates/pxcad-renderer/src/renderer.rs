//! 场景重绘
//!
//! 每次都整体重绘：清空表面，按顺序扫描转换线段，再扫描转换圆。

use crate::surface::{put_pixel, Color, PixelSurface};
use pxcad_core::clip::ClipAlgorithm;
use pxcad_core::geometry::{Primitive, Rect};
use pxcad_core::ops::preview_clip_lines;
use pxcad_core::raster::{rasterize, rasterize_line};
use pxcad_core::scene::Scene;
use std::collections::BTreeSet;
use tracing::debug;

/// 绘制颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub background: Color,
    pub ink: Color,
    /// 裁剪预览叠加色
    pub preview: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: 0xF5F5F5,
            ink: 0x000000,
            preview: 0x3CC878,
        }
    }
}

/// 写入与丢弃的像素数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub plotted: usize,
    pub dropped: usize,
}

impl RenderStats {
    fn record(&mut self, written: bool) {
        if written {
            self.plotted += 1;
        } else {
            self.dropped += 1;
        }
    }

    fn merge(&mut self, other: RenderStats) {
        self.plotted += other.plotted;
        self.dropped += other.dropped;
    }
}

/// 扫描转换单个图元
pub fn draw_primitive<S: PixelSurface + ?Sized>(surface: &mut S, primitive: &Primitive, color: Color) -> RenderStats {
    let mut stats = RenderStats::default();
    for p in rasterize(primitive) {
        stats.record(put_pixel(surface, p, color));
    }
    stats
}

/// 清空表面并重绘整个场景
pub fn redraw_scene<S: PixelSurface + ?Sized>(surface: &mut S, scene: &Scene, style: &RenderStyle) -> RenderStats {
    surface.fill(style.background);
    let mut stats = RenderStats::default();
    for primitive in scene.primitives() {
        stats.merge(draw_primitive(surface, &primitive, style.ink));
    }
    debug!(
        "Redrew {} primitives: {} pixels plotted, {} dropped",
        scene.len(),
        stats.plotted,
        stats.dropped
    );
    stats
}

/// 在当前画面上叠加裁剪预览
pub fn draw_clip_preview<S: PixelSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    window: Rect,
    algorithm: ClipAlgorithm,
    selected: Option<&BTreeSet<usize>>,
    style: &RenderStyle,
) -> RenderStats {
    let mut stats = RenderStats::default();
    for line in preview_clip_lines(scene, window, algorithm, selected) {
        for p in rasterize_line(&line) {
            stats.record(put_pixel(surface, p, style.preview));
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelBuffer;
    use pxcad_core::geometry::{Circle, Line, LineAlgorithm, Point};

    #[test]
    fn test_redraw_clears_and_draws() {
        let style = RenderStyle::default();
        let mut buf = PixelBuffer::new(20, 20, 0xFF0000).unwrap();
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(0, 0), Point::new(9, 0), LineAlgorithm::Dda));
        scene.add_circle(Circle::new(Point::new(10, 10), 0));

        let stats = redraw_scene(&mut buf, &scene, &style);
        assert_eq!(stats, RenderStats { plotted: 11, dropped: 0 });
        assert_eq!(buf.count(0xFF0000), 0);
        assert_eq!(buf.count(style.ink), 11);
        assert_eq!(buf.get(10, 10), Some(style.ink));
    }

    #[test]
    fn test_offscreen_pixels_dropped() {
        let style = RenderStyle::default();
        let mut buf = PixelBuffer::new(10, 10, style.background).unwrap();
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(-5, 5), Point::new(14, 5), LineAlgorithm::Bresenham));

        let stats = redraw_scene(&mut buf, &scene, &style);
        assert_eq!(stats, RenderStats { plotted: 10, dropped: 10 });
    }

    #[test]
    fn test_clip_preview_overlay() {
        let style = RenderStyle::default();
        let mut buf = PixelBuffer::new(30, 30, style.background).unwrap();
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(0, 5), Point::new(29, 5), LineAlgorithm::Bresenham));
        redraw_scene(&mut buf, &scene, &style);

        let stats = draw_clip_preview(
            &mut buf,
            &scene,
            Rect::new(10, 0, 10, 10),
            ClipAlgorithm::LiangBarsky,
            None,
            &style,
        );
        assert_eq!(stats.plotted, 11);
        assert_eq!(buf.count(style.preview), 11);
        assert_eq!(buf.count(style.ink), 19);
        // 场景本身不变
        assert_eq!(scene.lines[0].p0, Point::new(0, 5));
    }
}
