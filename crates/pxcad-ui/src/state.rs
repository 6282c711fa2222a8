//! 应用状态
//!
//! 所有交互状态集中在 [`AppState`] 中，以 `&mut` 传入每个工具。

use pxcad_core::clip::ClipAlgorithm;
use pxcad_core::config::EditorConfig;
use pxcad_core::geometry::{Point, Rect};
use pxcad_core::gesture::{HandleScale, RotateGesture, TranslateGesture, UniformScaleGesture};
use pxcad_core::selection::Selection;
use pxcad_core::transform::{Transform, TransformSnapshot};

/// 交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Idle,
    Select,
    Translate,
    Rotate,
    ScaleUniform,
    LineDda,
    LineBresenham,
    CircleBresenham,
    ClipWindow,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::Select => "Select",
            Mode::Translate => "Translate",
            Mode::Rotate => "Rotate",
            Mode::ScaleUniform => "Scale",
            Mode::LineDda => "Line (DDA)",
            Mode::LineBresenham => "Line (Bresenham)",
            Mode::CircleBresenham => "Circle (Bresenham)",
            Mode::ClipWindow => "Clip Window",
        }
    }

    pub fn shortcut(&self) -> Option<&'static str> {
        match self {
            Mode::Select => Some("V"),
            _ => None,
        }
    }
}

/// 框选状态
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub selecting: bool,
    pub anchor: Option<Point>,
    pub current: Option<Point>,
    pub selected: Selection,
}

impl SelectionState {
    /// 当前框选矩形
    pub fn band(&self) -> Option<Rect> {
        match (self.selecting, self.anchor, self.current) {
            (true, Some(a), Some(b)) => Some(Rect::from_points(a, b)),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.selecting = false;
        self.anchor = None;
        self.current = None;
        self.selected.clear();
    }
}

/// 进行中的变换手势
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Move(TranslateGesture),
    Scale(HandleScale),
    Rotate(RotateGesture),
    UniformScale(UniformScaleGesture),
}

impl Gesture {
    /// 根据鼠标位置和修饰键求变换
    ///
    /// Shift 对缩放控制柄表示等比，对旋转表示按 `snap` 吸附。
    pub fn transform(&self, mouse: Point, shift: bool, snap: Option<f64>) -> Transform {
        match self {
            Gesture::Move(g) => g.transform(mouse),
            Gesture::Scale(g) => g.transform(mouse, shift),
            Gesture::Rotate(g) => g.transform(mouse, if shift { snap } else { None }),
            Gesture::UniformScale(g) => g.transform(mouse),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Move(_) => "move",
            Gesture::Scale(_) => "scale",
            Gesture::Rotate(_) => "rotate",
            Gesture::UniformScale(_) => "uniform scale",
        }
    }
}

/// 变换拖拽状态
#[derive(Debug, Clone, Default)]
pub struct TransformState {
    pub dragging: bool,
    pub anchor: Option<Point>,
    pub snapshot: TransformSnapshot,
    pub gesture: Option<Gesture>,
}

impl TransformState {
    pub fn begin(&mut self, anchor: Point, snapshot: TransformSnapshot, gesture: Gesture) {
        self.dragging = true;
        self.anchor = Some(anchor);
        self.snapshot = snapshot;
        self.gesture = Some(gesture);
    }

    pub fn reset(&mut self) {
        self.dragging = false;
        self.anchor = None;
        self.snapshot = TransformSnapshot::default();
        self.gesture = None;
    }
}

/// 裁剪窗口状态
#[derive(Debug, Clone, Default)]
pub struct ClipState {
    /// 正在拖拽创建窗口
    pub setting: bool,
    pub anchor: Option<Point>,
    pub current: Option<Point>,
    pub window: Option<Rect>,
    /// 持续预览所用的算法
    pub preview: Option<ClipAlgorithm>,
}

impl ClipState {
    pub fn reset(&mut self) {
        self.setting = false;
        self.anchor = None;
        self.current = None;
        self.window = None;
        self.preview = None;
    }
}

/// 顶层应用状态
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub mode: Mode,
    pub selection: SelectionState,
    pub transform: TransformState,
    pub clip: ClipState,

    /// 两次点击工具的待定点
    pub pending_line_start: Option<Point>,
    pub pending_circle_center: Option<Point>,

    /// 状态栏消息
    pub status: String,
    pub config: EditorConfig,
}

impl AppState {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// 重置选择、变换、裁剪和待定点，保留模式与配置
    pub fn reset_all(&mut self) {
        self.selection.reset();
        self.transform.reset();
        self.clip.reset();
        self.pending_line_start = None;
        self.pending_circle_center = None;
        self.status.clear();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// 变换的状态栏描述
pub fn describe_transform(transform: &Transform) -> String {
    match *transform {
        Transform::Translate { dx, dy } => format!("Move: ({}, {})", dx, dy),
        Transform::Rotate { theta, .. } => format!("Rotate: {:+.1}°", theta.to_degrees()),
        Transform::Scale { sx, sy, .. } => format!("Scale: sx={:.2} sy={:.2}", sx, sy),
    }
}
