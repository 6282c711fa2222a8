//! PXCAD 交互层
//!
//! 窗口和事件循环由外部协作者提供；这里把画布事件转换为场景修改。

pub mod dispatcher;
pub mod state;
pub mod tool;
pub mod tools;

pub use dispatcher::EventDispatcher;
pub use state::{AppState, ClipState, Gesture, Mode, SelectionState, TransformState};
pub use tool::{CanvasEvent, Key, Modifiers, Tool, ToolContext, ToolResult};
pub use tools::{create_tool, ActiveTool};
