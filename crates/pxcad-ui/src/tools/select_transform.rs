//! 选择/变换工具
//!
//! 按下时依次尝试：
//! 1. 选择集包围盒的控制柄（缩放控制柄开始缩放，旋转控制柄开始旋转）
//! 2. 包围盒内部开始移动
//! 3. 其余位置开始框选
//!
//! Shift：角点等比缩放、旋转角度吸附；Alt：以中心为枢轴缩放。

use super::{begin_gesture, clear_transient, current_bbox, drag_gesture, end_gesture};
use crate::state::{Gesture, Mode};
use crate::tool::{CanvasEvent, Modifiers, Tool, ToolContext, ToolResult};
use pxcad_core::geometry::{Point, Rect};
use pxcad_core::gesture::{HandleScale, RotateGesture, TranslateGesture};
use pxcad_core::handles::{hit_test_handles, HandleKey};
use pxcad_core::selection::select_in_rect;
use tracing::debug;

const PROMPT: &str =
    "Drag to select; drag inside selection to move; handles to scale; rotate knob to rotate";

#[derive(Debug, Clone, Default)]
pub struct SelectTransformTool;

impl SelectTransformTool {
    pub fn new() -> Self {
        Self
    }

    /// 根据按下位置决定手势
    fn pick_gesture(ctx: &ToolContext<'_>, bbox: Rect, pos: Point, modifiers: Modifiers) -> Option<Gesture> {
        match hit_test_handles(bbox, &ctx.state.config.handles, pos) {
            Some(HandleKey::Rot) => Some(Gesture::Rotate(RotateGesture::begin(bbox, pos))),
            Some(handle) => HandleScale::begin(bbox, handle, modifiers.alt, &ctx.state.config.handles)
                .map(Gesture::Scale),
            None if bbox.contains(pos) => Some(Gesture::Move(TranslateGesture::begin(pos))),
            None => None,
        }
    }

    fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, pos: Point, modifiers: Modifiers) -> ToolResult {
        if let Some(bbox) = current_bbox(ctx) {
            if let Some(gesture) = Self::pick_gesture(ctx, bbox, pos, modifiers) {
                if begin_gesture(ctx, pos, gesture) {
                    return ToolResult::Handled;
                }
            }
        }

        let sel = &mut ctx.state.selection;
        sel.selecting = true;
        sel.anchor = Some(pos);
        sel.current = Some(pos);
        ToolResult::Handled
    }

    fn finish_band(&mut self, ctx: &mut ToolContext<'_>, pos: Point) -> ToolResult {
        let Some(anchor) = ctx.state.selection.anchor else {
            return ToolResult::Ignored;
        };
        let band = Rect::from_points(anchor, pos);
        let selected = select_in_rect(ctx.scene, band);
        debug!("Rubber band {} selected {} primitives", band, selected.len());
        ctx.state.set_status(format!(
            "Selected {} lines, {} circles",
            selected.lines.len(),
            selected.circles.len()
        ));

        let sel = &mut ctx.state.selection;
        sel.selected = selected;
        sel.selecting = false;
        sel.anchor = None;
        sel.current = None;
        ToolResult::Handled
    }
}

impl Tool for SelectTransformTool {
    fn mode(&self) -> Mode {
        Mode::Select
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.set_status(PROMPT);
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        match *event {
            CanvasEvent::PointerDown { pos, modifiers } => self.pointer_down(ctx, pos, modifiers),
            CanvasEvent::PointerMove { pos, modifiers } => {
                if ctx.state.transform.dragging {
                    drag_gesture(ctx, pos, modifiers)
                } else if ctx.state.selection.selecting {
                    ctx.state.selection.current = Some(pos);
                    ToolResult::Handled
                } else {
                    ToolResult::Ignored
                }
            }
            CanvasEvent::PointerUp { pos, modifiers } => {
                if ctx.state.transform.dragging {
                    end_gesture(ctx, pos, modifiers)
                } else if ctx.state.selection.selecting {
                    self.finish_band(ctx, pos)
                } else {
                    ToolResult::Ignored
                }
            }
            CanvasEvent::KeyDown { .. } => ToolResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use pxcad_core::geometry::{Circle, Line, LineAlgorithm};
    use pxcad_core::scene::Scene;

    /// 线段 (10,10)-(100,80) 与圆 (300,300) r=5
    fn setup() -> (AppState, Scene) {
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(10, 10), Point::new(100, 80), LineAlgorithm::Dda));
        scene.add_circle(Circle::new(Point::new(300, 300), 5));
        (AppState::default(), scene)
    }

    fn band_select(tool: &mut SelectTransformTool, ctx: &mut ToolContext<'_>, a: (i32, i32), b: (i32, i32)) {
        tool.handle_event(ctx, &CanvasEvent::down(a.0, a.1));
        tool.handle_event(ctx, &CanvasEvent::moved(b.0, b.1));
        tool.handle_event(ctx, &CanvasEvent::up(b.0, b.1));
    }

    #[test]
    fn test_rubber_band_selects() {
        let (mut state, mut scene) = setup();
        let mut tool = SelectTransformTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        band_select(&mut tool, &mut ctx, (0, 0), (15, 15));
        assert_eq!(ctx.state.status, "Selected 1 lines, 0 circles");
        assert!(ctx.state.selection.selected.lines.contains(&0));
        assert!(!ctx.state.selection.selecting);

        // 空白处框选清空选择
        band_select(&mut tool, &mut ctx, (400, 400), (420, 420));
        assert!(ctx.state.selection.selected.is_empty());
    }

    #[test]
    fn test_drag_inside_moves() {
        let (mut state, mut scene) = setup();
        let mut tool = SelectTransformTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        band_select(&mut tool, &mut ctx, (0, 0), (15, 15));

        assert_eq!(tool.handle_event(&mut ctx, &CanvasEvent::down(50, 50)), ToolResult::Handled);
        assert!(matches!(ctx.state.transform.gesture, Some(Gesture::Move(_))));
        assert_eq!(tool.handle_event(&mut ctx, &CanvasEvent::up(55, 50)), ToolResult::SceneChanged);
        assert_eq!(scene.lines[0].p0, Point::new(15, 10));
        assert_eq!(scene.lines[0].p1, Point::new(105, 80));
        assert_eq!(scene.circles[0].center, Point::new(300, 300));
    }

    #[test]
    fn test_corner_handle_scales_from_opposite() {
        let (mut state, mut scene) = setup();
        let mut tool = SelectTransformTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        band_select(&mut tool, &mut ctx, (0, 0), (15, 15));

        tool.handle_event(&mut ctx, &CanvasEvent::down(100, 80));
        assert!(matches!(
            ctx.state.transform.gesture,
            Some(Gesture::Scale(HandleScale { handle: HandleKey::Se, .. }))
        ));
        tool.handle_event(&mut ctx, &CanvasEvent::up(190, 150));
        assert_eq!(ctx.state.status, "Scale: sx=2.00 sy=2.00");
        assert_eq!(scene.lines[0].p0, Point::new(10, 10));
        assert_eq!(scene.lines[0].p1, Point::new(190, 150));
    }

    #[test]
    fn test_rotate_knob() {
        let mut scene = Scene::new();
        scene.add_line(Line::new(Point::new(100, 100), Point::new(140, 120), LineAlgorithm::Bresenham));
        let mut state = AppState::default();
        let mut tool = SelectTransformTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        band_select(&mut tool, &mut ctx, (90, 90), (150, 130));

        // 顶边中点 (120,100) 上方 rotation_offset 像素
        let knob_y = 100 - ctx.state.config.handles.rotation_offset;
        tool.handle_event(&mut ctx, &CanvasEvent::down(120, knob_y));
        assert!(matches!(ctx.state.transform.gesture, Some(Gesture::Rotate(_))));
        tool.handle_event(&mut ctx, &CanvasEvent::up(120, knob_y));
        assert_eq!(ctx.state.status, "Rotate: +0.0°");
        assert!(!ctx.state.transform.dragging);
        assert_eq!(scene.lines[0].p0, Point::new(100, 100));
    }

    #[test]
    fn test_alt_scales_from_center() {
        let (mut state, mut scene) = setup();
        let mut tool = SelectTransformTool::new();
        let mut ctx = ToolContext::new(&mut state, &mut scene);
        band_select(&mut tool, &mut ctx, (0, 0), (15, 15));

        let down = CanvasEvent::down(100, 80).with_modifiers(Modifiers::ALT);
        tool.handle_event(&mut ctx, &down);
        match ctx.state.transform.gesture {
            Some(Gesture::Scale(g)) => assert_eq!(g.pivot, pxcad_core::math::Point2::new(55.0, 45.0)),
            other => panic!("unexpected gesture {:?}", other),
        }
    }
}
