//! 工具实现
//!
//! 每个模式一个工具，[`ActiveTool`] 负责分发。

mod clip_window;
mod draw_circle;
mod draw_line;
mod rotate;
mod scale_uniform;
mod select_transform;
mod translate;

pub use clip_window::ClipWindowTool;
pub use draw_circle::DrawCircleTool;
pub use draw_line::DrawLineTool;
pub use rotate::RotateTool;
pub use scale_uniform::ScaleUniformTool;
pub use select_transform::SelectTransformTool;
pub use translate::TranslateTool;

use crate::state::{describe_transform, Gesture, Mode};
use crate::tool::{CanvasEvent, Modifiers, Tool, ToolContext, ToolResult};
use pxcad_core::geometry::{LineAlgorithm, Point, Rect};
use pxcad_core::selection::selection_bbox;
use pxcad_core::transform::TransformSnapshot;
use tracing::debug;

/// 当前激活的工具
#[derive(Debug, Clone)]
pub enum ActiveTool {
    Select(SelectTransformTool),
    Translate(TranslateTool),
    Rotate(RotateTool),
    ScaleUniform(ScaleUniformTool),
    Line(DrawLineTool),
    Circle(DrawCircleTool),
    ClipWindow(ClipWindowTool),
}

/// 创建模式对应的工具，`Idle` 没有工具
pub fn create_tool(mode: Mode) -> Option<ActiveTool> {
    let tool = match mode {
        Mode::Idle => return None,
        Mode::Select => ActiveTool::Select(SelectTransformTool::new()),
        Mode::Translate => ActiveTool::Translate(TranslateTool::new()),
        Mode::Rotate => ActiveTool::Rotate(RotateTool::new()),
        Mode::ScaleUniform => ActiveTool::ScaleUniform(ScaleUniformTool::new()),
        Mode::LineDda => ActiveTool::Line(DrawLineTool::new(LineAlgorithm::Dda)),
        Mode::LineBresenham => ActiveTool::Line(DrawLineTool::new(LineAlgorithm::Bresenham)),
        Mode::CircleBresenham => ActiveTool::Circle(DrawCircleTool::new()),
        Mode::ClipWindow => ActiveTool::ClipWindow(ClipWindowTool::new()),
    };
    Some(tool)
}

macro_rules! dispatch {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            ActiveTool::Select($t) => $body,
            ActiveTool::Translate($t) => $body,
            ActiveTool::Rotate($t) => $body,
            ActiveTool::ScaleUniform($t) => $body,
            ActiveTool::Line($t) => $body,
            ActiveTool::Circle($t) => $body,
            ActiveTool::ClipWindow($t) => $body,
        }
    };
}

impl Tool for ActiveTool {
    fn mode(&self) -> Mode {
        dispatch!(self, t => t.mode())
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        dispatch!(self, t => t.enter(ctx))
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        dispatch!(self, t => t.exit(ctx))
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        dispatch!(self, t => t.handle_event(ctx, event))
    }
}

// ========== 变换工具共用的手势流程 ==========

/// 清理选择集后的包围盒
pub(crate) fn current_bbox(ctx: &mut ToolContext<'_>) -> Option<Rect> {
    ctx.state.selection.selected.sanitize(ctx.scene);
    selection_bbox(ctx.scene, &ctx.state.selection.selected)
}

/// 记录快照并开始手势，选择集为空时不开始
pub(crate) fn begin_gesture(ctx: &mut ToolContext<'_>, pos: Point, gesture: Gesture) -> bool {
    let snapshot = TransformSnapshot::capture(ctx.scene, &ctx.state.selection.selected);
    if snapshot.is_empty() {
        return false;
    }
    debug!(
        "Begin {} at {} with {} lines, {} circles",
        gesture.name(),
        pos,
        snapshot.lines.len(),
        snapshot.circles.len()
    );
    ctx.state.transform.begin(pos, snapshot, gesture);
    true
}

/// 以当前鼠标位置重新计算变换并写回场景
pub(crate) fn drag_gesture(ctx: &mut ToolContext<'_>, pos: Point, modifiers: Modifiers) -> ToolResult {
    let gesture = match (ctx.state.transform.dragging, ctx.state.transform.gesture) {
        (true, Some(g)) => g,
        _ => return ToolResult::Ignored,
    };
    let snap = ctx.state.config.snap_angle_rad();
    let transform = gesture.transform(pos, modifiers.shift, snap);
    ctx.state.transform.snapshot.commit(ctx.scene, &transform);
    ctx.state.status = describe_transform(&transform);
    ToolResult::SceneChanged
}

/// 松开鼠标：按最终位置提交后结束手势
pub(crate) fn end_gesture(ctx: &mut ToolContext<'_>, pos: Point, modifiers: Modifiers) -> ToolResult {
    let result = drag_gesture(ctx, pos, modifiers);
    if result == ToolResult::Ignored {
        return result;
    }
    debug!("End gesture: {}", ctx.state.status);
    ctx.state.transform.reset();
    result
}

/// 退出工具时的通用清理
pub(crate) fn clear_transient(ctx: &mut ToolContext<'_>) {
    ctx.state.transform.reset();
    ctx.state.selection.selecting = false;
    ctx.state.selection.anchor = None;
    ctx.state.selection.current = None;
    ctx.state.clip.setting = false;
    ctx.state.clip.anchor = None;
    ctx.state.clip.current = None;
    ctx.state.pending_line_start = None;
    ctx.state.pending_circle_center = None;
    ctx.state.status.clear();
}

/// 单手势变换工具的事件流程：按下开始、拖动提交、松开结束
pub(crate) fn handle_drag_tool<F>(ctx: &mut ToolContext<'_>, event: &CanvasEvent, make: F) -> ToolResult
where
    F: FnOnce(Rect, Point) -> Gesture,
{
    match *event {
        CanvasEvent::PointerDown { pos, .. } => {
            let Some(bbox) = current_bbox(ctx) else {
                return ToolResult::Ignored;
            };
            if begin_gesture(ctx, pos, make(bbox, pos)) {
                ToolResult::Handled
            } else {
                ToolResult::Ignored
            }
        }
        CanvasEvent::PointerMove { pos, modifiers } => drag_gesture(ctx, pos, modifiers),
        CanvasEvent::PointerUp { pos, modifiers } => end_gesture(ctx, pos, modifiers),
        CanvasEvent::KeyDown { .. } => ToolResult::Ignored,
    }
}
