//! 等比缩放工具：按鼠标到包围盒中心的距离比缩放

use super::{clear_transient, handle_drag_tool};
use crate::state::{Gesture, Mode};
use crate::tool::{CanvasEvent, Tool, ToolContext, ToolResult};
use pxcad_core::gesture::UniformScaleGesture;

#[derive(Debug, Clone, Default)]
pub struct ScaleUniformTool;

impl ScaleUniformTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for ScaleUniformTool {
    fn mode(&self) -> Mode {
        Mode::ScaleUniform
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.set_status("Drag away from pivot to scale");
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        handle_drag_tool(ctx, event, |bbox, pos| {
            Gesture::UniformScale(UniformScaleGesture::begin(bbox, pos))
        })
    }
}
