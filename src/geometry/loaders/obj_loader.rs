/// OBJ 文件加载器
///
/// 逐行解析 OBJ 文本，识别五种记录：`v`、`vn`、`vt`、`f`、`o`，其余行一律静默忽略。
///
/// - `v` / `vn` / `vt` 按文件顺序累积，文件中的 1 基索引在读取时转换为 0 基
/// - `f` 的每个角点只取第一个子字段（顶点索引），不做三角化，有几个角点就记录几个索引
/// - `vt` 记录整体作为唯一的 UV 通道按顶点顺序对齐，不使用面记录中的 UV/法线子索引
/// - `o` 关闭当前子网格并在索引缓冲区末尾开启新的子网格；从未出现 `o` 时没有子网格。
///   记录按首个空白分隔的字段识别，因此不带名称的单独 `o` 行同样开启子网格
///
/// 非 UTF-8 字节按替换字符解码，只有真正的 IO 失败才返回 [`MeshError::Io`]。
///
/// 数值解析使用 `str::parse`，与系统区域设置无关，小数点始终为 `.`。
use super::MeshLoader;
use crate::core::config::CodecConfig;
use crate::core::error::{MeshError, Result};
use crate::geometry::mesh::{Mesh, SubMesh};
use crate::math::{Vector2, Vector3};
use crate::{codec_debug, codec_warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// OBJ 读取选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjReadOptions {
    /// 面角点带有 UV/法线子索引（`1/2/3`）时返回 [`MeshError::Unsupported`]，
    /// 默认只忽略这些子索引并输出一条警告
    pub reject_corner_attributes: bool,
}

impl From<&CodecConfig> for ObjReadOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            reject_corner_attributes: config.reject_corner_attributes,
        }
    }
}

/// OBJ 格式加载器
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_interchange::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), mesh_interchange::core::MeshError>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    /// 按指定选项从文件加载
    pub fn load_from_file_with(path: &Path, options: &ObjReadOptions) -> Result<Mesh> {
        let file = File::open(path)?;
        let mesh = Self::read_from(BufReader::new(file), options)?;

        codec_debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            indices = mesh.index_count(),
            sub_meshes = mesh.sub_mesh_count(),
            "Loaded OBJ file"
        );
        Ok(mesh)
    }

    /// 从任意带缓冲的输入读取网格
    ///
    /// 遇到无法解析的数值字段时立即返回，不产生部分结果。
    pub fn read_from<R: BufRead>(mut reader: R, options: &ObjReadOptions) -> Result<Mesh> {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut sub_meshes = Vec::new();

        // 当前打开的子网格的起始索引
        let mut open_sub_mesh: Option<usize> = None;
        let mut ignored_corner_attributes = 0usize;

        // 按字节读行，非 UTF-8 内容（注释、材质名等）按替换字符解码；`\r` 作为空白被切分掉
        let mut buffer = Vec::new();
        let mut line_number = 0usize;

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            let line = String::from_utf8_lossy(&buffer);
            let mut fields = line.split_whitespace();

            match fields.next() {
                Some("v") => vertices.push(parse_vector3(&mut fields, line_number)?),
                Some("vn") => normals.push(parse_vector3(&mut fields, line_number)?),
                Some("vt") => {
                    let u = parse_float(fields.next(), line_number)?;
                    let v = parse_float(fields.next(), line_number)?;
                    uvs.push(Vector2::new(u, v));
                }
                Some("f") => {
                    for corner in fields {
                        let mut parts = corner.split('/');
                        let vertex = parts.next().unwrap_or_default();

                        if parts.next().is_some() {
                            if options.reject_corner_attributes {
                                return Err(MeshError::Unsupported(format!(
                                    "line {}: face corner '{}' carries UV/normal indices",
                                    line_number, corner
                                )));
                            }
                            ignored_corner_attributes += 1;
                        }

                        indices.push(parse_vertex_index(vertex, line_number)?);
                    }
                }
                Some("o") => {
                    if let Some(start) = open_sub_mesh.take() {
                        sub_meshes.push(SubMesh::new(start, indices.len() - start));
                    }
                    open_sub_mesh = Some(indices.len());
                }
                _ => {}
            }
        }

        if let Some(start) = open_sub_mesh {
            sub_meshes.push(SubMesh::new(start, indices.len() - start));
        }

        if ignored_corner_attributes > 0 {
            codec_warn!(
                corners = ignored_corner_attributes,
                "Face corners carry UV/normal indices; these are not supported and were ignored"
            );
        }

        Ok(Mesh {
            vertices,
            normals: if normals.is_empty() { None } else { Some(normals) },
            tangents: None,
            colors: None,
            texture_coordinates: vec![Some(uvs)],
            triangles: indices,
            sub_meshes,
        })
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Mesh> {
        Self::load_from_file_with(path, &ObjReadOptions::default())
    }

    fn load_from_memory(data: &[u8]) -> Result<Mesh> {
        Self::read_from(data, &ObjReadOptions::default())
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

fn parse_float(field: Option<&str>, line: usize) -> Result<f32> {
    let field = field.ok_or_else(|| MeshError::malformed(line, "missing numeric field"))?;
    field
        .parse::<f32>()
        .map_err(|_| MeshError::malformed(line, format!("expected a number, found '{}'", field)))
}

fn parse_vector3<'a, I>(fields: &mut I, line: usize) -> Result<Vector3>
where
    I: Iterator<Item = &'a str>,
{
    let x = parse_float(fields.next(), line)?;
    let y = parse_float(fields.next(), line)?;
    let z = parse_float(fields.next(), line)?;
    Ok(Vector3::new(x, y, z))
}

/// 解析 1 基顶点索引并转换为 0 基
fn parse_vertex_index(field: &str, line: usize) -> Result<u32> {
    match field.parse::<u32>() {
        Ok(index) if index >= 1 => Ok(index - 1),
        _ => Err(MeshError::malformed(
            line,
            format!("expected a positive vertex index, found '{}'", field),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Mesh> {
        ObjLoader::read_from(Cursor::new(text), &ObjReadOptions::default())
    }

    #[test]
    fn test_supported_extensions() {
        assert_eq!(<ObjLoader as MeshLoader>::supported_extensions(), &["obj"]);
    }

    #[test]
    fn test_single_triangle_without_marker() {
        let mesh = read("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangles, vec![0, 1, 2]);
        assert_eq!(mesh.sub_mesh_count(), 0);
        assert!(mesh.normals.is_none());
        assert_eq!(mesh.texture_coordinates, vec![Some(vec![])]);
    }

    #[test]
    fn test_object_markers_split_sub_meshes() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
                    o A\nf 1 2 3\n\
                    o B\nf 2 4 3\nf 1 2 4\n";
        let mesh = read(text).unwrap();

        assert_eq!(mesh.sub_meshes, vec![SubMesh::new(0, 3), SubMesh::new(3, 6)]);
        assert_eq!(mesh.get_triangles(1).unwrap(), vec![1, 3, 2, 0, 1, 3]);
    }

    #[test]
    fn test_marker_without_faces_gives_empty_sub_mesh() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\no A\no B\nf 1 2 3\nf 3 2 1\n";
        let mesh = read(text).unwrap();

        assert_eq!(mesh.sub_mesh_count(), 2);
        assert_eq!(mesh.sub_meshes[0], SubMesh::new(0, 0));
        assert_eq!(mesh.sub_meshes[1], SubMesh::new(0, 6));
    }

    #[test]
    fn test_attributes_in_file_order() {
        let text = "# comment\n\
                    v 0.5 -1.25 2\n\
                    vn 0 0 1\n\
                    vt 0.125 0.875\n\
                    vt 1 0\n\
                    usemtl stone\n\
                    g group\n\
                    s off\n";
        let mesh = read(text).unwrap();

        assert_eq!(mesh.vertices, vec![Vector3::new(0.5, -1.25, 2.0)]);
        assert_eq!(mesh.normals, Some(vec![Vector3::new(0.0, 0.0, 1.0)]));
        assert_eq!(
            mesh.texture_coordinates,
            vec![Some(vec![Vector2::new(0.125, 0.875), Vector2::new(1.0, 0.0)])]
        );
    }

    #[test]
    fn test_whitespace_runs_and_tabs() {
        let mesh = read("v\t1.5   2.5\t\t3.5\nf  1   1 1  \n").unwrap();

        assert_eq!(mesh.vertices, vec![Vector3::new(1.5, 2.5, 3.5)]);
        assert_eq!(mesh.triangles, vec![0, 0, 0]);
    }

    #[test]
    fn test_polygon_corners_are_recorded_as_is() {
        let mesh = read("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

        assert_eq!(mesh.triangles, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_corner_attributes_ignored_by_default() {
        let mesh = read("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1/1 2/1 3//1\n").unwrap();

        assert_eq!(mesh.triangles, vec![0, 1, 2]);
    }

    #[test]
    fn test_corner_attributes_rejected_in_strict_mode() {
        let options = ObjReadOptions {
            reject_corner_attributes: true,
        };
        let result = ObjLoader::read_from(Cursor::new("v 0 0 0\nf 1/1 1/1 1/1\n"), &options);

        assert!(matches!(result, Err(MeshError::Unsupported(_))));
    }

    #[test]
    fn test_malformed_float_reports_line() {
        let err = read("v 0 0 0\nv 1 x 0\n").unwrap_err();

        match err {
            MeshError::MalformedInput { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_locale_style_decimal_comma_is_rejected() {
        assert!(matches!(
            read("v 0,5 1 2\n"),
            Err(MeshError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        assert!(matches!(
            read("vt 0.5\n"),
            Err(MeshError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_vertex_index_is_malformed() {
        assert!(read("v 0 0 0\nf 0 1 1\n").is_err());
        assert!(read("v 0 0 0\nf -1 1 1\n").is_err());
        assert!(read("v 0 0 0\nf a 1 1\n").is_err());
    }

    #[test]
    fn test_bare_object_marker_opens_sub_mesh() {
        let mesh = read("v 0 0 0\nv 1 0 0\nv 0 1 0\no\nf 1 2 3\n").unwrap();

        assert_eq!(mesh.sub_meshes, vec![SubMesh::new(0, 3)]);
    }

    #[test]
    fn test_non_utf8_lines_are_tolerated() {
        let data = b"# caf\xe9\nusemtl pierre_\xe9\xe8\no \xff\xfe\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = ObjLoader::load_from_memory(data).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangles, vec![0, 1, 2]);
        assert_eq!(mesh.sub_meshes, vec![SubMesh::new(0, 3)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mesh = read("v 1 2 3\r\nvt 0.5 0.25\r\nf 1 1 1\r\n").unwrap();

        assert_eq!(mesh.vertices, vec![Vector3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.texture_coordinates, vec![Some(vec![Vector2::new(0.5, 0.25)])]);
        assert_eq!(mesh.triangles, vec![0, 0, 0]);
    }

    #[test]
    fn test_load_from_memory() {
        let mesh = ObjLoader::load_from_memory(b"v 1 2 3\n").unwrap();

        assert_eq!(mesh.vertices, vec![Vector3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjLoader::load_from_file(Path::new("nonexistent.obj"));

        assert!(matches!(result, Err(MeshError::Io(_))));
    }

    #[test]
    fn test_read_options_from_config() {
        let config = CodecConfig {
            float_precision: None,
            reject_corner_attributes: true,
        };

        assert!(ObjReadOptions::from(&config).reject_corner_attributes);
    }
}
