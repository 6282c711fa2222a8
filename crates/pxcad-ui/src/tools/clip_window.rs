//! 裁剪窗口工具
//!
//! 空白处拖拽创建窗口，窗口内拖拽移动，控制柄缩放（Shift 保持宽高比，Alt 以中心缩放）。
//! 空闲时 Delete/Backspace 清除窗口，方向键微调（Shift 加速）。
//! 窗口始终约束在画布内。

use super::clear_transient;
use crate::state::Mode;
use crate::tool::{CanvasEvent, Key, Modifiers, Tool, ToolContext, ToolResult};
use pxcad_core::geometry::{Point, Rect};
use pxcad_core::handles::{hit_test_clip_handles, HandleKey};
use pxcad_core::rect_edit::{clip_window_from_drag, nudge_rect, resize_rect_from_handle, ResizeOptions};
use tracing::{debug, info};

const PROMPT: &str =
    "Clip mode: drag to create; drag inside to move; handles to resize; Del to clear; Arrows to nudge";

/// 拖拽状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Status {
    #[default]
    Idle,
    Creating,
    Moving { anchor: Point, rect0: Rect },
    Resizing { handle: HandleKey, rect0: Rect },
}

#[derive(Debug, Clone, Default)]
pub struct ClipWindowTool {
    status: Status,
}

fn describe(prefix: &str, r: Rect) -> String {
    format!("{}: x={}, y={}, w={}, h={}", prefix, r.left(), r.top(), r.width(), r.height())
}

impl ClipWindowTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn canvas(ctx: &ToolContext<'_>) -> (i32, i32) {
        (ctx.state.config.canvas_width, ctx.state.config.canvas_height)
    }

    fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, pos: Point) -> ToolResult {
        if let Some(window) = ctx.state.clip.window {
            if let Some(handle) = hit_test_clip_handles(window, &ctx.state.config.handles, pos) {
                self.status = Status::Resizing { handle, rect0: window };
                return ToolResult::Handled;
            }
            if window.contains(pos) {
                self.status = Status::Moving { anchor: pos, rect0: window };
                return ToolResult::Handled;
            }
        }

        self.status = Status::Creating;
        let clip = &mut ctx.state.clip;
        clip.setting = true;
        clip.anchor = Some(pos);
        clip.current = Some(pos);
        ToolResult::Handled
    }

    fn pointer_drag(&mut self, ctx: &mut ToolContext<'_>, pos: Point, modifiers: Modifiers) -> ToolResult {
        let (cw, ch) = Self::canvas(ctx);
        match self.status {
            Status::Idle => return ToolResult::Ignored,
            Status::Creating => {
                ctx.state.clip.current = Some(pos);
            }
            Status::Moving { anchor, rect0 } => {
                let moved = nudge_rect(rect0, pos.x - anchor.x, pos.y - anchor.y, cw, ch);
                ctx.state.clip.window = Some(moved);
                ctx.state.set_status(describe("Clip", moved));
            }
            Status::Resizing { handle, rect0 } => {
                let opts = ResizeOptions {
                    keep_aspect: modifiers.shift,
                    from_center: modifiers.alt,
                    min_width: ctx.state.config.clip_window.min_width,
                    min_height: ctx.state.config.clip_window.min_height,
                    bounds: Some((cw, ch)),
                };
                let resized = resize_rect_from_handle(rect0, handle, pos, &opts);
                ctx.state.clip.window = Some(resized);
                ctx.state.set_status(format!("Resize: {}×{}", resized.width(), resized.height()));
            }
        }
        ToolResult::Handled
    }

    fn pointer_up(&mut self, ctx: &mut ToolContext<'_>, pos: Point, modifiers: Modifiers) -> ToolResult {
        let status = self.status;
        if status == Status::Idle {
            return ToolResult::Ignored;
        }
        self.pointer_drag(ctx, pos, modifiers);
        self.status = Status::Idle;

        match status {
            Status::Creating => {
                let (cw, ch) = Self::canvas(ctx);
                let anchor = ctx.state.clip.anchor.unwrap_or(pos);
                let window = clip_window_from_drag(anchor, pos, cw, ch);
                let clip = &mut ctx.state.clip;
                clip.window = Some(window);
                clip.setting = false;
                clip.anchor = None;
                clip.current = None;
                info!("Clip window set to {}", window);
                ctx.state.set_status(describe("Clip", window));
            }
            Status::Moving { .. } => {
                debug!("Clip window moved to {:?}", ctx.state.clip.window);
                ctx.state.set_status("Clip window moved");
            }
            Status::Resizing { .. } => {
                debug!("Clip window resized to {:?}", ctx.state.clip.window);
                ctx.state.set_status("Clip window resized");
            }
            Status::Idle => {}
        }
        ToolResult::Handled
    }

    fn key_down(&mut self, ctx: &mut ToolContext<'_>, key: Key, modifiers: Modifiers) -> ToolResult {
        if self.status != Status::Idle || ctx.state.clip.setting {
            return ToolResult::Ignored;
        }
        let Some(window) = ctx.state.clip.window else {
            return ToolResult::Ignored;
        };

        let cfg = ctx.state.config.clip_window;
        let step = if modifiers.shift { cfg.nudge_step_fast } else { cfg.nudge_step };
        let (dx, dy) = match key {
            Key::Delete | Key::Backspace => {
                ctx.state.clip.window = None;
                info!("Clip window cleared");
                ctx.state.set_status("Clip window cleared");
                return ToolResult::Handled;
            }
            Key::Left => (-step, 0),
            Key::Right => (step, 0),
            Key::Up => (0, -step),
            Key::Down => (0, step),
            _ => return ToolResult::Ignored,
        };

        let (cw, ch) = Self::canvas(ctx);
        let nudged = nudge_rect(window, dx, dy, cw, ch);
        ctx.state.clip.window = Some(nudged);
        ctx.state.set_status(describe("Nudge", nudged));
        ToolResult::Handled
    }
}

impl Tool for ClipWindowTool {
    fn mode(&self) -> Mode {
        Mode::ClipWindow
    }

    fn enter(&mut self, ctx: &mut ToolContext<'_>) {
        self.status = Status::Idle;
        ctx.state.set_status(PROMPT);
    }

    fn exit(&mut self, ctx: &mut ToolContext<'_>) {
        self.status = Status::Idle;
        clear_transient(ctx);
    }

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult {
        match *event {
            CanvasEvent::PointerDown { pos, .. } => self.pointer_down(ctx, pos),
            CanvasEvent::PointerMove { pos, modifiers } => self.pointer_drag(ctx, pos, modifiers),
            CanvasEvent::PointerUp { pos, modifiers } => self.pointer_up(ctx, pos, modifiers),
            CanvasEvent::KeyDown { key, modifiers } => self.key_down(ctx, key, modifiers),
        }
    }
}
