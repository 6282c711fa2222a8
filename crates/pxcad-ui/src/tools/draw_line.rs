//! 绘制线段：两次点击确定起点和终点

use super::clear_transient;
use crate::state::Mode;
use crate::tool::{CanvasEvent, Key, Tool, ToolContext, ToolResult};
use pxcad_core::geometry::{Line, LineAlgorithm};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DrawLineTool {
    algo: LineAlgorithm,
}

impl DrawLineTool {
    pub fn new(algo: LineAlgorithm) -> Self {
        Self { algo }
    }

    pub fn algo(&self) -> LineAlgorithm {
        self.algo
    }

    fn label(&self) -> String {
        format!("Line ({})", self.algo.name())
    }
}

impl Tool for DrawLineTool {
    fn mode(&self) -> Mode {
        match self.algo {
            LineAlgorithm::Dda => Mode::LineDda,
            LineAlgorithm::Bresenham => Mode::LineBresenham,
        }
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.state.pending_line_start = None;
        ctx.state.set_status(format!("{}: click start, then end", self.label()));
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        match *event {
            CanvasEvent::PointerDown { pos, .. } => match ctx.state.pending_line_start.take() {
                None => {
                    ctx.state.pending_line_start = Some(pos);
                    ctx.state.set_status(format!("{}: start {}, click end", self.label(), pos));
                    ToolResult::Handled
                }
                Some(start) => {
                    let index = ctx.scene.add_line(Line::new(start, pos, self.algo));
                    debug!("Added line #{} {} -> {} ({})", index, start, pos, self.algo.name());
                    ctx.state.set_status(format!("{}: {} -> {}", self.label(), start, pos));
                    ToolResult::SceneChanged
                }
            },
            CanvasEvent::KeyDown { key: Key::Escape, .. } if ctx.state.pending_line_start.is_some() => {
                ctx.state.pending_line_start = None;
                ctx.state.set_status(format!("{}: click start, then end", self.label()));
                ToolResult::Handled
            }
            _ => ToolResult::Ignored,
        }
    }
}
