//! 旋转工具：绕选择集包围盒中心旋转，Shift 按角度吸附

use super::{clear_transient, handle_drag_tool};
use crate::state::{Gesture, Mode};
use crate::tool::{CanvasEvent, Tool, ToolContext, ToolResult};
use pxcad_core::gesture::RotateGesture;

#[derive(Debug, Clone, Default)]
pub struct RotateTool;

impl RotateTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for RotateTool {
    fn mode(&self) -> Mode {
        Mode::Rotate
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.set_status("Drag around pivot to rotate");
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        handle_drag_tool(ctx, event, |bbox, pos| Gesture::Rotate(RotateGesture::begin(bbox, pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::tool::Modifiers;
    use pxcad_core::geometry::{Line, LineAlgorithm, Point};
    use pxcad_core::scene::Scene;
    use pxcad_core::selection::Selection;

    fn setup() -> (AppState, Scene) {
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(0, 10), Point::new(20, 10), LineAlgorithm::Bresenham));
        let mut state = AppState::default();
        state.selection.selected = Selection::select_all(&scene);
        (state, scene)
    }

    #[test]
    fn test_quarter_turn() {
        let (mut state, mut scene) = setup();
        let mut tool = RotateTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        // 包围盒 (0,10,20x0)，中心 (10,10)
        tool.handle_event(&mut ctx, &CanvasEvent::down(30, 10));
        tool.handle_event(&mut ctx, &CanvasEvent::up(10, 30));
        assert_eq!(ctx.state.status, "Rotate: +90.0°");
        assert_eq!(scene.lines[0].p0, Point::new(10, 0));
        assert_eq!(scene.lines[0].p1, Point::new(10, 20));
    }

    #[test]
    fn test_shift_snaps() {
        let (mut state, mut scene) = setup();
        let mut tool = RotateTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        tool.handle_event(&mut ctx, &CanvasEvent::down(30, 10));
        // atan2(1, 20) ≈ 2.9°，吸附为 0
        let ev = CanvasEvent::moved(30, 11).with_modifiers(Modifiers::SHIFT);
        tool.handle_event(&mut ctx, &ev);
        assert_eq!(ctx.state.status, "Rotate: +0.0°");
        assert_eq!(scene.lines[0].p0, Point::new(0, 10));
    }
}
