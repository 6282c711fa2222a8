//! 平移工具

use super::{clear_transient, handle_drag_tool};
use crate::state::{Gesture, Mode};
use crate::tool::{CanvasEvent, Tool, ToolContext, ToolResult};
use pxcad_core::gesture::TranslateGesture;

#[derive(Debug, Clone, Default)]
pub struct TranslateTool;

impl TranslateTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for TranslateTool {
    fn mode(&self) -> Mode {
        Mode::Translate
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.set_status("Drag selection to move");
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        handle_drag_tool(ctx, event, |_, pos| Gesture::Move(TranslateGesture::begin(pos)))
    }
}
