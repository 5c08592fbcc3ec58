/// OBJ 文件写出器
///
/// 输出顺序：全部 `v`，存在法线时的 `vn`，第一个存储的 UV 通道的 `vt`，
/// 然后每个子网格一行 `o` 加上该区间的面记录。面记录只写裸顶点索引（1 基）。
///
/// 只写出 UV 通道 0：多通道网格经过写出再读取后只保留第一个通道。
use super::MeshSaver;
use crate::codec_debug;
use crate::core::config::CodecConfig;
use crate::core::error::Result;
use crate::geometry::mesh::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// OBJ 写出选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjWriteOptions {
    /// 固定小数位数；`None` 时使用最短的可往返表示
    pub float_precision: Option<usize>,
}

impl From<&CodecConfig> for ObjWriteOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            float_precision: config.float_precision,
        }
    }
}

/// OBJ 格式写出器
pub struct ObjWriter;

impl ObjWriter {
    /// 按指定选项写入文件
    ///
    /// 文件在函数返回前关闭；缓冲区显式刷新，刷新失败同样作为 IO 错误返回。
    pub fn write_to_file_with(mesh: &Mesh, path: &Path, options: &ObjWriteOptions) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(&mut writer, mesh, options)?;
        writer.flush()?;

        codec_debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            sub_meshes = mesh.sub_mesh_count(),
            "Wrote OBJ file"
        );
        Ok(())
    }

    /// 使用默认选项写入文件
    pub fn write_to_file(mesh: &Mesh, path: &Path) -> Result<()> {
        Self::write_to_file_with(mesh, path, &ObjWriteOptions::default())
    }

    /// 把网格写入任意输出
    ///
    /// 子网格区间通过 [`Mesh::get_triangles`] 读取，区间越界时返回错误而不是 panic。
    /// 没有子网格时不写 `o` 行，直接写出全部索引，读回后同样没有子网格。
    pub fn write_to<W: Write>(mut writer: W, mesh: &Mesh, options: &ObjWriteOptions) -> Result<()> {
        let precision = options.float_precision;

        for vertex in &mesh.vertices {
            write_record(&mut writer, "v", vertex.as_slice(), precision)?;
        }

        if let Some(normals) = &mesh.normals {
            for normal in normals {
                write_record(&mut writer, "vn", normal.as_slice(), precision)?;
            }
        }

        if let Some(Some(uvs)) = mesh.texture_coordinates.first() {
            for uv in uvs {
                write_record(&mut writer, "vt", uv.as_slice(), precision)?;
            }
        }

        if mesh.sub_meshes.is_empty() {
            write_faces(&mut writer, &mesh.triangles)?;
        } else {
            for i in 0..mesh.sub_mesh_count() {
                let indices = mesh.get_triangles(i)?;
                writeln!(writer, "o SubMesh{}", i)?;
                write_faces(&mut writer, &indices)?;
            }
        }

        Ok(())
    }
}

impl MeshSaver for ObjWriter {
    fn save_to_file(mesh: &Mesh, path: &Path) -> Result<()> {
        Self::write_to_file(mesh, path)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

fn write_record<W: Write>(
    writer: &mut W,
    tag: &str,
    values: &[f32],
    precision: Option<usize>,
) -> std::io::Result<()> {
    write!(writer, "{}", tag)?;
    for value in values {
        match precision {
            Some(digits) => write!(writer, " {:.*}", digits, value)?,
            None => write!(writer, " {}", value)?,
        }
    }
    writeln!(writer)
}

// 每行三个索引；末尾不足三个的索引写成一行较短的面记录，保证索引缓冲区原样往返
fn write_faces<W: Write>(writer: &mut W, indices: &[u32]) -> std::io::Result<()> {
    for face in indices.chunks(3) {
        write!(writer, "f")?;
        for &index in face {
            write!(writer, " {}", u64::from(index) + 1)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
