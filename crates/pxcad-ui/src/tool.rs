//! 工具系统
//!
//! 每个交互模式对应一个工具，采用状态机处理画布事件。
//! 工具集合是封闭的，由 [`crate::tools::ActiveTool`] 枚举分发。

use crate::state::{AppState, Mode};
use pxcad_core::geometry::Point;
use pxcad_core::scene::Scene;

/// 修饰键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, alt: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, alt: false };
    pub const ALT: Modifiers = Modifiers { shift: false, alt: true };
}

/// 按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Char(char),
}

/// 画布事件，坐标为画布像素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    PointerDown { pos: Point, modifiers: Modifiers },
    PointerMove { pos: Point, modifiers: Modifiers },
    PointerUp { pos: Point, modifiers: Modifiers },
    KeyDown { key: Key, modifiers: Modifiers },
}

impl CanvasEvent {
    pub fn down(x: i32, y: i32) -> Self {
        CanvasEvent::PointerDown { pos: Point::new(x, y), modifiers: Modifiers::NONE }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        CanvasEvent::PointerMove { pos: Point::new(x, y), modifiers: Modifiers::NONE }
    }

    pub fn up(x: i32, y: i32) -> Self {
        CanvasEvent::PointerUp { pos: Point::new(x, y), modifiers: Modifiers::NONE }
    }

    pub fn key(key: Key) -> Self {
        CanvasEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    /// 替换修饰键
    pub fn with_modifiers(self, m: Modifiers) -> Self {
        match self {
            CanvasEvent::PointerDown { pos, .. } => CanvasEvent::PointerDown { pos, modifiers: m },
            CanvasEvent::PointerMove { pos, .. } => CanvasEvent::PointerMove { pos, modifiers: m },
            CanvasEvent::PointerUp { pos, .. } => CanvasEvent::PointerUp { pos, modifiers: m },
            CanvasEvent::KeyDown { key, .. } => CanvasEvent::KeyDown { key, modifiers: m },
        }
    }
}

/// 事件处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolResult {
    /// 工具不关心该事件
    Ignored,
    /// 状态或叠加层变化，场景未变
    Handled,
    /// 场景被修改，需要重绘
    SceneChanged,
}

impl ToolResult {
    pub fn scene_changed(&self) -> bool {
        *self == ToolResult::SceneChanged
    }
}

/// 工具上下文
pub struct ToolContext<'a> {
    pub state: &'a mut AppState,
    pub scene: &'a mut Scene,
}

impl<'a> ToolContext<'a> {
    pub fn new(state: &'a mut AppState, scene: &'a mut Scene) -> Self {
        Self { state, scene }
    }
}

/// 工具 trait
pub trait Tool {
    fn mode(&self) -> Mode;

    /// 工具被激活
    fn enter(&mut self, ctx: &mut ToolContext<'_>);

    /// 工具被停用，清理进行中的手势
    fn exit(&mut self, ctx: &mut ToolContext<'_>);

    fn handle_event(&mut self, ctx: &mut ToolContext<'_>, event: &CanvasEvent) -> ToolResult;
}
