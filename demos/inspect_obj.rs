/// OBJ 检查示例
///
/// 演示如何使用 mesh_interchange 的 geometry 模块读取 OBJ 文件并查看 UV 通道。
///
/// 运行方式：
/// ```
/// cargo run --example inspect_obj -- assets/sphere.obj
/// ```

use mesh_interchange::geometry::loaders::{MeshLoader, ObjLoader};
use mesh_interchange::geometry::uv;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let obj_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/sphere.obj"));

    println!("=== mesh_interchange OBJ 检查示例 ===\n");
    println!("正在加载: {}", obj_path.display());

    let mesh = match ObjLoader::load_from_file(&obj_path) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("\n✗ 加载失败: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n网格信息:");
    println!("  顶点数: {}", mesh.vertex_count());
    println!("  索引数: {}", mesh.index_count());
    println!("  三角形数: {}", mesh.triangle_count());
    println!("  子网格数: {}", mesh.sub_mesh_count());

    println!("\n顶点数据（前 {} 个）:", mesh.vertex_count().min(3));
    for (i, vertex) in mesh.vertices.iter().take(3).enumerate() {
        println!("  顶点 {}: [{:.3}, {:.3}, {:.3}]", i, vertex.x, vertex.y, vertex.z);
    }

    if mesh.sub_meshes.is_empty() {
        println!("\n没有子网格，所有三角形属于同一个隐式网格");
    } else {
        println!("\n子网格信息:");
        for (i, sub_mesh) in mesh.sub_meshes.iter().enumerate() {
            println!(
                "  子网格 {}: 起始索引 {}, 三角形数 {}",
                i,
                sub_mesh.start_index,
                sub_mesh.triangle_count()
            );
        }
    }

    println!("\nUV 通道:");
    for (channel, uvs) in uv::all_mesh_uvs(&mesh).iter().enumerate() {
        println!(
            "  通道 {}: {} 项, 使用 {} 个分量",
            channel,
            uvs.len(),
            uv::used_component_count(uvs)
        );
    }

    match mesh.validate() {
        Ok(()) => println!("\n✓ 数据验证通过"),
        Err(e) => println!("\n✗ 数据验证失败: {}", e),
    }
}
