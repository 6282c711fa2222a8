//! 事件分发
//!
//! [`EventDispatcher`] 持有场景、应用状态和当前工具。全局快捷键在工具之前处理：
//! - `V`：选择/变换模式
//! - `1` / `2`：进入裁剪窗口模式并开启 Cohen-Sutherland / Liang-Barsky 预览
//! - `Enter`：按预览算法裁剪选中线段（无选中时裁剪全部）
//! - `0`：关闭预览

use crate::state::{AppState, Mode};
use crate::tool::{CanvasEvent, Key, Tool, ToolContext, ToolResult};
use crate::tools::{create_tool, ActiveTool};
use pxcad_core::clip::ClipAlgorithm;
use pxcad_core::config::EditorConfig;
use pxcad_core::ops::{clip_selected_lines, ClipSummary};
use pxcad_core::scene::Scene;
use pxcad_core::selection::Selection;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    state: AppState,
    scene: Scene,
    tool: Option<ActiveTool>,
}

impl EventDispatcher {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            state: AppState::new(config),
            scene: Scene::new(),
            tool: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// 切换模式：旧工具 exit，新工具 enter
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.state.mode {
            return;
        }
        if let Some(tool) = self.tool.as_mut() {
            tool.exit(&mut ToolContext::new(&mut self.state, &mut self.scene));
        }
        info!("Mode: {} -> {}", self.state.mode.name(), mode.name());
        self.state.mode = mode;
        self.tool = create_tool(mode);
        if let Some(tool) = self.tool.as_mut() {
            tool.enter(&mut ToolContext::new(&mut self.state, &mut self.scene));
        }
    }

    /// 处理一个画布事件
    pub fn handle(&mut self, event: &CanvasEvent) -> ToolResult {
        if let CanvasEvent::KeyDown { key, .. } = *event {
            if let Some(result) = self.handle_shortcut(key) {
                return result;
            }
        }
        match self.tool.as_mut() {
            Some(tool) => tool.handle_event(&mut ToolContext::new(&mut self.state, &mut self.scene), event),
            None => ToolResult::Ignored,
        }
    }

    fn handle_shortcut(&mut self, key: Key) -> Option<ToolResult> {
        let result = match key {
            Key::Char('v') | Key::Char('V') => {
                self.set_mode(Mode::Select);
                self.state.set_status("Select / Transform");
                ToolResult::Handled
            }
            Key::Char('1') => self.start_preview(ClipAlgorithm::CohenSutherland),
            Key::Char('2') => self.start_preview(ClipAlgorithm::LiangBarsky),
            Key::Char('0') => {
                self.state.clip.preview = None;
                self.state.set_status("Preview off");
                ToolResult::Handled
            }
            Key::Enter => match self.apply_preview() {
                Some(_) => ToolResult::SceneChanged,
                None => ToolResult::Ignored,
            },
            _ => return None,
        };
        Some(result)
    }

    fn start_preview(&mut self, algorithm: ClipAlgorithm) -> ToolResult {
        self.set_mode(Mode::ClipWindow);
        self.state.clip.preview = Some(algorithm);
        self.state
            .set_status(format!("Preview: {} (Enter=apply, 0=off)", algorithm.name()));
        debug!("Clip preview {}", algorithm.id());
        ToolResult::Handled
    }

    /// 按预览算法破坏性裁剪；没有窗口或未开启预览时不做任何事
    pub fn apply_preview(&mut self) -> Option<ClipSummary> {
        let (window, algorithm) = match (self.state.clip.window, self.state.clip.preview) {
            (Some(w), Some(a)) => (w, a),
            _ => return None,
        };
        self.state.transform.reset();
        let summary = clip_selected_lines(
            &mut self.scene,
            &mut self.state.selection.selected,
            window,
            algorithm,
        );
        self.state.clip.preview = None;
        self.state.set_status(format!(
            "Applied preview ({}): kept {}, removed {}",
            algorithm.id(),
            summary.kept,
            summary.removed
        ));
        Some(summary)
    }

    /// 选中场景中全部图元
    pub fn select_all(&mut self) {
        self.state.selection.selected = Selection::select_all(&self.scene);
    }

    /// 清空场景并重置所有状态，回到空闲模式
    pub fn clear_all(&mut self) {
        self.set_mode(Mode::Idle);
        self.scene.clear();
        self.state.reset_all();
        self.state.set_status("Cleared");
        info!("Scene cleared");
    }
}
