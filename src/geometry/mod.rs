/// 几何数据模块
///
/// 网格记录、UV 通道访问器以及 OBJ 文本格式的读写器。
///
/// # 模块结构
///
/// - `mesh`: 网格与子网格数据结构
/// - `uv`: 按维度提取 UV 通道的无状态函数
/// - `loaders`: 各种格式的读写器
///
/// # 数据流
///
/// ```text
/// OBJ 文件
///     ↓
/// ObjLoader
///     ↓
/// Mesh ──→ uv 访问器（管线各阶段，包括外部简化器）
///     ↓
/// ObjWriter
///     ↓
/// OBJ 文件
/// ```

pub mod mesh;
pub mod uv;
pub mod loaders;

// 重新导出常用类型
pub use mesh::{Mesh, SubMesh};
pub use uv::{UvDimension, UvList, UV_CHANNEL_COUNT};
