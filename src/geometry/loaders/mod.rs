/// 模型读写模块
///
/// 提供统一的读写接口和各种格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 文本格式的子集（`v` / `vn` / `vt` / `f` / `o`）
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_interchange::geometry::loaders::{load_mesh, save_mesh};
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"))?;
/// save_mesh(&mesh, Path::new("copy.obj"))?;
/// # Ok::<(), mesh_interchange::core::MeshError>(())
/// ```
use crate::core::error::{MeshError, Result};
use crate::geometry::mesh::Mesh;
use std::path::Path;

pub mod obj_loader;
pub mod obj_writer;

// 重新导出读写器
pub use obj_loader::{ObjLoader, ObjReadOptions};
pub use obj_writer::{ObjWriteOptions, ObjWriter};

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器应该是无状态的（使用关联函数）
/// - 返回 CPU 侧的 [`Mesh`]
/// - 文件句柄只在调用期间持有，任何退出路径都会释放
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件无法打开或读取时返回 [`MeshError::Io`]
    /// - 数值字段无法解析时返回 [`MeshError::MalformedInput`]
    fn load_from_file(path: &Path) -> Result<Mesh>;

    /// 从内存数据加载网格
    fn load_from_memory(data: &[u8]) -> Result<Mesh>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 网格写出器 trait
pub trait MeshSaver {
    /// 把网格写入文件，文件不存在时创建，存在时覆盖
    fn save_to_file(mesh: &Mesh, path: &Path) -> Result<()>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(path: &Path) -> Result<Mesh> {
    match extension_of(path)?.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        other => Err(unsupported(other)),
    }
}

/// 根据文件扩展名选择合适的写出器
pub fn save_mesh(mesh: &Mesh, path: &Path) -> Result<()> {
    match extension_of(path)?.as_str() {
        "obj" => ObjWriter::save_to_file(mesh, path),
        other => Err(unsupported(other)),
    }
}

fn extension_of(path: &Path) -> Result<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshError::UnsupportedFormat(format!(
                "cannot determine file extension of {}",
                path.display()
            ))
        })
}

fn unsupported(extension: &str) -> MeshError {
    MeshError::UnsupportedFormat(format!("unsupported file extension: .{}", extension))
}
