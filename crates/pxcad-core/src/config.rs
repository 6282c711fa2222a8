//! 编辑器配置
//!
//! 画布尺寸、控制柄尺寸、旋转吸附角度与裁剪窗口限制。
//! 颜色与主题不在此处配置。

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 控制柄尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleMetrics {
    /// 方形控制柄边长
    pub size: i32,
    /// 命中测试时每边额外的容差
    pub hit_pad: i32,
    /// 旋转控制柄在包围盒顶边中点上方的距离
    pub rotation_offset: i32,
    /// 旋转控制柄的最小 y 坐标
    pub rotation_top_margin: i32,
    /// 旋转杆的可点击半宽
    pub stem_hit_radius: i32,
}

impl HandleMetrics {
    /// 方形命中区域的边长
    pub fn hit_square_size(&self) -> i32 {
        self.size + 2 * self.hit_pad
    }

    /// 旋转控制柄的圆形命中半径（比视觉尺寸略大）
    pub fn knob_hit_radius(&self) -> i32 {
        (self.size / 2 + self.hit_pad + 3).max(10)
    }
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            size: 10,
            hit_pad: 4,
            rotation_offset: 26,
            rotation_top_margin: 8,
            stem_hit_radius: 6,
        }
    }
}

/// 裁剪窗口编辑限制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipWindowConfig {
    pub min_width: i32,
    pub min_height: i32,
    /// 方向键微调步长
    pub nudge_step: i32,
    /// 按住 Shift 时的微调步长
    pub nudge_step_fast: i32,
}

impl Default for ClipWindowConfig {
    fn default() -> Self {
        Self {
            min_width: 8,
            min_height: 8,
            nudge_step: 1,
            nudge_step_fast: 10,
        }
    }
}

/// 编辑器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 画布宽度（像素）
    pub canvas_width: i32,
    /// 画布高度（像素）
    pub canvas_height: i32,
    pub handles: HandleMetrics,
    /// 旋转吸附增量（度），0 表示关闭吸附
    pub snap_angle_deg: f64,
    pub clip_window: ClipWindowConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 780,
            canvas_height: 650,
            handles: HandleMetrics::default(),
            snap_angle_deg: 15.0,
            clip_window: ClipWindowConfig::default(),
        }
    }
}

impl EditorConfig {
    /// 从 JSON 文本解析并校验
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(?config, "Parsed editor config");
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// 序列化为格式化的 JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 检查配置值的合法性
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(CoreError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        let h = &self.handles;
        if h.size < 0 || h.hit_pad < 0 || h.rotation_offset < 0 || h.stem_hit_radius < 0 {
            return Err(CoreError::InvalidConfig(
                "handle metrics must not be negative".to_string(),
            ));
        }
        if !self.snap_angle_deg.is_finite() || self.snap_angle_deg < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "snap angle must be a non-negative number, got {}",
                self.snap_angle_deg
            )));
        }
        let c = &self.clip_window;
        if c.min_width < 1 || c.min_height < 1 {
            return Err(CoreError::InvalidConfig(
                "clip window minimum size must be at least 1x1".to_string(),
            ));
        }
        if c.min_width > self.canvas_width || c.min_height > self.canvas_height {
            return Err(CoreError::InvalidConfig(
                "clip window minimum size exceeds the canvas".to_string(),
            ));
        }
        if c.nudge_step < 0 || c.nudge_step_fast < 0 {
            return Err(CoreError::InvalidConfig(
                "nudge steps must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// 旋转吸附增量（弧度），关闭时返回 None
    pub fn snap_angle_rad(&self) -> Option<f64> {
        (self.snap_angle_deg > 0.0).then(|| self.snap_angle_deg.to_radians())
    }
}
