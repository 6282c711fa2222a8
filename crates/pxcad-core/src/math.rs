//! 数学类型与舍入工具
//!
//! 像素坐标一律为 `i32`；枢轴与中间计算使用 nalgebra 的 `f64` 类型。

pub use nalgebra::{Point2, Vector2};

/// 缩放分母的最小有效值，小于此值视为零
pub const EPSILON: f64 = 1e-6;

/// 舍入到最近整数，恰好位于两整数中间时取偶数（银行家舍入）
///
/// 所有光栅输出都经过这里，保证 0.5 的处理与像素结果一致。
#[inline]
pub fn round_i32(v: f64) -> i32 {
    v.round_ties_even() as i32
}

/// 向零截断（用于控制柄中心）
#[inline]
pub fn trunc_i32(v: f64) -> i32 {
    v.trunc() as i32
}
