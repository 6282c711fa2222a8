//! 绘制圆：先点圆心，再点圆周上一点

use super::clear_transient;
use crate::state::Mode;
use crate::tool::{CanvasEvent, Key, Tool, ToolContext, ToolResult};
use pxcad_core::geometry::{Circle, Point};
use pxcad_core::math::round_i32;
use tracing::debug;

const PROMPT: &str = "Circle (Bresenham): click center, then radius";

#[derive(Debug, Clone, Default)]
pub struct DrawCircleTool;

impl DrawCircleTool {
    pub fn new() -> Self {
        Self
    }
}

/// 两点距离舍入后的半径，不小于 0
pub fn radius_between(center: Point, p: Point) -> i32 {
    let dx = (p.x - center.x) as f64;
    let dy = (p.y - center.y) as f64;
    round_i32(dx.hypot(dy)).max(0)
}

impl Tool for DrawCircleTool {
    fn mode(&self) -> Mode {
        Mode::CircleBresenham
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.pending_circle_center = None;
        ctx.state.set_status(PROMPT);
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        match *event {
            CanvasEvent::PointerDown { pos, .. } => match ctx.state.pending_circle_center.take() {
                None => {
                    ctx.state.pending_circle_center = Some(pos);
                    ctx.state.set_status(format!("Circle (Bresenham): center {}, click radius", pos));
                    ToolResult::Handled
                }
                Some(center) => {
                    let r = radius_between(center, pos);
                    let index = ctx.scene.add_circle(Circle::new(center, r));
                    debug!("Added circle #{} at {} r={}", index, center, r);
                    ctx.state.set_status(format!("Circle (Bresenham): center {}, r={}", center, r));
                    ToolResult::SceneChanged
                }
            },
            CanvasEvent::KeyDown { key: Key::Escape, .. } if ctx.state.pending_circle_center.is_some() => {
                ctx.state.pending_circle_center = None;
                ctx.state.set_status(PROMPT);
                ToolResult::Handled
            }
            _ => ToolResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use pxcad_core::scene::Scene;

    #[test]
    fn test_radius_rounding() {
        let c = Point::new(0, 0);
        assert_eq!(radius_between(c, Point::new(3, 4)), 5);
        assert_eq!(radius_between(c, Point::new(0, 0)), 0);
        // hypot(1, 1) ≈ 1.414
        assert_eq!(radius_between(c, Point::new(1, 1)), 1);
        // hypot(2, 2) ≈ 2.83
        assert_eq!(radius_between(c, Point::new(-2, 2)), 3);
    }

    #[test]
    fn test_two_clicks_commit_circle() {
        let mut state = AppState::default();
        let mut scene = Scene::new();
        let mut tool = DrawCircleTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        tool.enter(&mut ctx);
        assert_eq!(ctx.state.status, PROMPT);
        tool.handle_event(&mut ctx, &CanvasEvent::down(100, 100));
        assert_eq!(tool.handle_event(&mut ctx, &CanvasEvent::down(106, 108)), ToolResult::SceneChanged);
        assert_eq!(scene.circles.len(), 1);
        assert_eq!(scene.circles[0].center, Point::new(100, 100));
        assert_eq!(scene.circles[0].radius(), 10);
    }
}
