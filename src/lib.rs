//! mesh_interchange - 网格数据交换层
//!
//! 网格处理管线的几何数据交换层：内存中的网格表示、
//! 按需维度（2D/3D/4D）提取 UV 通道的访问器，以及可读的 OBJ 文本格式读写器。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `math`: 基于 nalgebra 的向量类型别名
//! - `geometry`: 网格数据、UV 通道访问器与 OBJ 编解码器
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_interchange::geometry::loaders::{MeshLoader, ObjLoader};
//! use mesh_interchange::geometry::uv;
//! use std::path::Path;
//!
//! let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
//! let channels = uv::all_mesh_uvs(&mesh);
//! println!("UV0 使用了 {} 个分量", uv::used_component_count(&channels[0]));
//! # Ok::<(), mesh_interchange::core::MeshError>(())
//! ```

pub mod core;
pub mod math;
pub mod geometry;
