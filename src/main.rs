//! mesh_interchange - 网格交换命令行工具
//!
//! 读取一个 OBJ 文件，输出网格统计信息，并可选地把网格重新写出。
//! 用于在管线各阶段之间检查和搬运网格数据。
//!
//! # 使用方法
//!
//! ```bash
//! # 只检查
//! cargo run -- model.obj
//!
//! # 读取后以 6 位小数重新写出
//! cargo run -- model.obj out.obj --precision 6
//!
//! # 拒绝带 UV/法线子索引的面记录
//! cargo run -- model.obj --strict
//! ```

use anyhow::{bail, Context};
use mesh_interchange::core::{log, Config};
use mesh_interchange::geometry::loaders::{ObjLoader, ObjReadOptions, ObjWriteOptions, ObjWriter};
use mesh_interchange::geometry::uv;
use std::path::PathBuf;
use tracing::{info, warn};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml），不存在时使用默认配置
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 读取、报告并可选写出网格
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = Config::from_file_or_default("config.toml");
    config.apply_args(&args);
    config.validate().context("invalid configuration")?;

    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "mesh_interchange starting");

    let (input, output) = positional_paths(&args);
    let Some(input) = input else {
        bail!("usage: mesh_interchange <input.obj> [output.obj] [--precision N] [--strict] [--log-level L] [--uv-components N]");
    };

    let mesh = ObjLoader::load_from_file_with(&input, &ObjReadOptions::from(&config.codec))
        .with_context(|| format!("failed to read {}", input.display()))?;

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        sub_meshes = mesh.sub_mesh_count(),
        has_normals = mesh.has_normals(),
        "Mesh loaded"
    );

    if let Some((min, max)) = mesh.bounds() {
        info!(min = ?min.as_slice(), max = ?max.as_slice(), "Bounds");
    }

    for (channel, uvs) in uv::all_mesh_uvs(&mesh).iter().enumerate() {
        if uvs.is_empty() {
            continue;
        }
        let components = uv::resolve_component_count(&config.simplification, uvs)?;
        info!(channel, entries = uvs.len(), components, "UV channel");
    }

    if let Err(e) = mesh.validate() {
        warn!("Mesh does not satisfy per-vertex invariants: {}", e);
    }

    if let Some(output) = output {
        ObjWriter::write_to_file_with(&mesh, &output, &ObjWriteOptions::from(&config.codec))
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!(path = %output.display(), "Mesh written");
    }

    Ok(())
}

/// 取出前两个位置参数（跳过程序名和带值的选项）
fn positional_paths(args: &[String]) -> (Option<PathBuf>, Option<PathBuf>) {
    const VALUE_FLAGS: [&str; 3] = ["--precision", "--log-level", "--uv-components"];

    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    (positional.next(), positional.next())
}
