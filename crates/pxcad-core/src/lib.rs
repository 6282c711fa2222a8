//! PXCAD 光栅几何引擎
//!
//! 提供像素级2D图元、扫描转换、线段裁剪、枢轴变换以及选择控制柄几何。
//!
//! # 架构设计
//!
//! 所有与外部协作者交换的坐标都是整数（设备像素），只有枢轴和中间计算使用浮点：
//! - `geometry`: 点、线段、圆、矩形与图元
//! - `raster`: DDA / Bresenham 扫描转换（惰性迭代器）
//! - `clip`: Cohen–Sutherland / Liang–Barsky 裁剪
//! - `transform`: 基于快照的平移、旋转、缩放
//! - `handles`: 包围盒控制柄布局与命中测试
//!
//! # 示例
//!
//! ```rust
//! use pxcad_core::prelude::*;
//!
//! let line = Line::new(Point::new(0, 0), Point::new(10, 10), LineAlgorithm::Bresenham);
//! let rect = Rect::new(2, 2, 4, 4);
//!
//! let clipped = clip(line.p0, line.p1, rect, ClipAlgorithm::CohenSutherland);
//! assert_eq!(clipped, Some((Point::new(2, 2), Point::new(6, 6))));
//!
//! let pixels: Vec<Point> = rasterize_line(&line).collect();
//! assert_eq!(pixels.len(), 11);
//! ```

pub mod clip;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod handles;
pub mod math;
pub mod ops;
pub mod raster;
pub mod rect_edit;
pub mod scene;
pub mod selection;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::clip::{clip, cohen_sutherland, liang_barsky, ClipAlgorithm};
    pub use crate::config::{ClipWindowConfig, EditorConfig, HandleMetrics};
    pub use crate::error::CoreError;
    pub use crate::geometry::{Circle, Line, LineAlgorithm, Point, Primitive, Rect};
    pub use crate::gesture::{HandleScale, RotateGesture, TranslateGesture, UniformScaleGesture};
    pub use crate::handles::{handle_positions, hit_test_handles, HandleKey, HandleLayout};
    pub use crate::math::{Point2, Vector2};
    pub use crate::ops::{clip_lines, clip_selected_lines, preview_clip_lines, ClipSummary};
    pub use crate::raster::{rasterize, rasterize_circle, rasterize_line, Pixels};
    pub use crate::rect_edit::{clamp_rect_to_canvas, move_rect, resize_rect_from_handle, ResizeOptions};
    pub use crate::scene::Scene;
    pub use crate::selection::{select_in_rect, selection_bbox, Selection};
    pub use crate::transform::{apply_transform, Transform, TransformSnapshot, TransformedGeometry};
}
