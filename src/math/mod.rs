//! 数学类型模块
//!
//! 基于 `nalgebra` 的向量类型别名，以及网格数据比较时用到的少量工具函数。

// 类型别名，固定为 f32 分量
pub type Vector2 = nalgebra::Vector2<f32>;
pub type Vector3 = nalgebra::Vector3<f32>;
pub type Vector4 = nalgebra::Vector4<f32>;

/// 常用数学工具函数
pub mod utils {
    use super::*;

    /// 近似相等比较
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 按分量对两个向量做近似相等比较
    pub fn approx_eq_vec3(a: &Vector3, b: &Vector3, epsilon: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, epsilon))
    }

    /// 逐分量最小值
    pub fn component_min(a: &Vector3, b: &Vector3) -> Vector3 {
        a.zip_map(b, f32::min)
    }

    /// 逐分量最大值
    pub fn component_max(a: &Vector3, b: &Vector3) -> Vector3 {
        a.zip_map(b, f32::max)
    }
}
