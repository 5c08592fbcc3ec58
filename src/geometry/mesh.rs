/// 网格数据结构模块
///
/// 定义管线各阶段之间传递的网格记录：顶点位置、可选的顶点属性、
/// 任意数量的 UV 通道、扁平的三角形索引缓冲区，以及把索引缓冲区划分为子网格的区间。

use crate::core::error::{MeshError, RangeError, Result};
use crate::math::{utils, Vector2, Vector3, Vector4};

use super::uv::UvList;

/// 子网格描述符
///
/// 描述三角形索引缓冲区中的一段连续区间，通常对应一个材质或一个独立的渲染批次。
/// 区间之间可以重叠或留有空隙，这里不做约束。
///
/// # 示例
///
/// ```rust
/// use mesh_interchange::geometry::mesh::SubMesh;
///
/// // 从索引 6 开始的两个三角形
/// let sub_mesh = SubMesh::new(6, 6);
/// assert_eq!(sub_mesh.end_index(), 12);
/// assert_eq!(sub_mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubMesh {
    /// 在索引缓冲区中的起始位置
    pub start_index: usize,

    /// 索引数量（应为 3 的倍数才能解码为完整三角形）
    pub index_count: usize,
}

impl SubMesh {
    /// 创建一个新的子网格描述符
    #[inline]
    pub fn new(start_index: usize, index_count: usize) -> Self {
        Self {
            start_index,
            index_count,
        }
    }

    /// 区间的结束位置（不含）
    #[inline]
    pub fn end_index(&self) -> usize {
        self.start_index.saturating_add(self.index_count)
    }

    /// 完整三角形的数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.index_count / 3
    }
}

/// 网格记录
///
/// `vertices` 决定了所有逐顶点数组的规范索引；可选属性存在时长度应等于顶点数，
/// 但这一点不会被强制检查，需要时可调用 [`Mesh::validate`]。
///
/// # 示例
///
/// ```rust
/// use mesh_interchange::geometry::mesh::{Mesh, SubMesh};
/// use mesh_interchange::math::Vector3;
///
/// let mut mesh = Mesh::new(
///     vec![
///         Vector3::new(0.0, 0.0, 0.0),
///         Vector3::new(1.0, 0.0, 0.0),
///         Vector3::new(0.0, 1.0, 0.0),
///     ],
///     vec![0, 1, 2],
/// );
/// mesh.sub_meshes.push(SubMesh::new(0, 3));
///
/// assert_eq!(mesh.get_triangles(0)?, vec![0, 1, 2]);
/// # Ok::<(), mesh_interchange::core::MeshError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// 顶点位置
    pub vertices: Vec<Vector3>,

    /// 顶点法线（可选）
    pub normals: Option<Vec<Vector3>>,

    /// 顶点切线（可选，w 分量为副切线方向）
    pub tangents: Option<Vec<Vector4>>,

    /// 顶点颜色（可选，RGBA）
    pub colors: Option<Vec<Vector4>>,

    /// UV 通道列表，`None` 表示该通道没有数据
    pub texture_coordinates: Vec<Option<Vec<Vector2>>>,

    /// 三角形顶点索引，每 3 个索引定义一个三角形
    pub triangles: Vec<u32>,

    /// 子网格列表
    ///
    /// 为空时表示所有三角形属于同一个未拆分的隐式网格。
    pub sub_meshes: Vec<SubMesh>,
}

impl Mesh {
    /// 由顶点和索引创建网格，其余属性为空
    pub fn new(vertices: Vec<Vector3>, triangles: Vec<u32>) -> Self {
        Self {
            vertices,
            triangles,
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// 获取子网格数量
    #[inline]
    pub fn sub_mesh_count(&self) -> usize {
        self.sub_meshes.len()
    }

    /// 获取存储的 UV 通道数量（包括没有数据的通道）
    #[inline]
    pub fn uv_channel_count(&self) -> usize {
        self.texture_coordinates.len()
    }

    /// 是否带有非空的法线数据
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.as_ref().is_some_and(|n| !n.is_empty())
    }

    /// 返回子网格的索引区间副本
    ///
    /// # 错误
    ///
    /// - `submesh_index` 不小于子网格数量时返回 [`RangeError::SubMesh`]
    /// - 子网格区间超出索引缓冲区时返回 [`RangeError::SubMeshIndices`]，不会静默截断
    pub fn get_triangles(&self, submesh_index: usize) -> Result<Vec<u32>> {
        let sub_mesh = self.sub_meshes.get(submesh_index).ok_or(RangeError::SubMesh {
            index: submesh_index,
            count: self.sub_meshes.len(),
        })?;

        let indices = sub_mesh
            .start_index
            .checked_add(sub_mesh.index_count)
            .and_then(|end| self.triangles.get(sub_mesh.start_index..end))
            .ok_or(RangeError::SubMeshIndices {
                start: sub_mesh.start_index,
                count: sub_mesh.index_count,
                len: self.triangles.len(),
            })?;

        Ok(indices.to_vec())
    }

    /// 把指定 UV 通道的数据追加到 `out` 中
    ///
    /// 输出维度由 `out` 的变体决定：2D 原样复制，3D/4D 的额外分量补 0。
    /// 不会先清空 `out`，需要精确结果时应传入空列表。
    ///
    /// # 错误
    ///
    /// - `channel` 不小于存储的通道数量时返回 [`RangeError::UvChannel`]
    /// - 通道没有数据时返回 [`MeshError::MissingData`]
    pub fn get_uvs(&self, channel: usize, out: &mut UvList) -> Result<()> {
        let slot = self
            .texture_coordinates
            .get(channel)
            .ok_or(RangeError::UvChannel {
                channel,
                count: self.texture_coordinates.len(),
            })?;

        let uvs = slot
            .as_deref()
            .ok_or(MeshError::MissingData { channel })?;

        out.extend_from_2d(uvs);
        Ok(())
    }

    /// 顶点位置的轴对齐包围盒，没有顶点时返回 `None`
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().skip(1).fold((*first, *first), |(min, max), v| {
            (utils::component_min(&min, v), utils::component_max(&max, v))
        }))
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 可选属性与 UV 通道的长度等于顶点数量
    /// - 所有索引都在顶点范围内
    /// - 子网格区间位于索引缓冲区内
    ///
    /// 读写器与访问器不会隐式调用此函数。
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();

        let attribute_lengths = [
            ("normals", self.normals.as_ref().map(Vec::len)),
            ("tangents", self.tangents.as_ref().map(Vec::len)),
            ("colors", self.colors.as_ref().map(Vec::len)),
        ];
        for (name, len) in attribute_lengths {
            if let Some(len) = len {
                if len != vertex_count {
                    return Err(MeshError::InvalidGeometry(format!(
                        "{} has {} entries but the mesh has {} vertices",
                        name, len, vertex_count
                    )));
                }
            }
        }

        for (channel, uvs) in self.texture_coordinates.iter().enumerate() {
            if let Some(uvs) = uvs {
                if uvs.len() != vertex_count {
                    return Err(MeshError::InvalidGeometry(format!(
                        "UV channel {} has {} entries but the mesh has {} vertices",
                        channel,
                        uvs.len(),
                        vertex_count
                    )));
                }
            }
        }

        if let Some((i, &index)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::InvalidGeometry(format!(
                "index {} at position {} is outside the vertex range (count {})",
                index, i, vertex_count
            )));
        }

        for (i, sub_mesh) in self.sub_meshes.iter().enumerate() {
            if sub_mesh.end_index() > self.triangles.len() {
                return Err(MeshError::InvalidGeometry(format!(
                    "submesh {} range {}..{} exceeds index buffer of length {}",
                    i,
                    sub_mesh.start_index,
                    sub_mesh.end_index(),
                    self.triangles.len()
                )));
            }
        }

        Ok(())
    }
}
