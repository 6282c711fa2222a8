//! PXCAD 渲染器
//!
//! 把场景扫描转换后写入像素表面。窗口与位图拷贝由外部协作者负责。

pub mod renderer;
pub mod surface;

pub use renderer::{draw_clip_preview, draw_primitive, redraw_scene, RenderStats, RenderStyle};
pub use surface::{put_pixel, Color, PixelBuffer, PixelSurface, RenderError};
