/// UV 通道访问器
///
/// 不论网格实际存储了多少个 UV 通道，访问器只识别通道 0..4，
/// 并按调用方请求的维度（2D/3D/4D）返回逐顶点数据。
/// 网格内部总是以 2D 存储，扩展到 3D/4D 时多出的分量补 0。
///
/// # 错误策略
///
/// 单通道接口（[`mesh_uvs`] 及其便捷版本）会把越界和缺失数据直接返回给调用方；
/// 整网格接口 [`all_mesh_uvs`] 则把每个通道的失败转换为空列表。

use crate::core::config::SimplificationOptions;
use crate::core::error::{RangeError, Result};
use crate::math::{Vector2, Vector3, Vector4};

use super::mesh::Mesh;

/// 访问器识别的 UV 通道数量
pub const UV_CHANNEL_COUNT: usize = 4;

/// 请求的 UV 维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UvDimension {
    Two,
    Three,
    Four,
}

impl UvDimension {
    /// 分量数
    #[inline]
    pub fn components(&self) -> usize {
        match self {
            UvDimension::Two => 2,
            UvDimension::Three => 3,
            UvDimension::Four => 4,
        }
    }
}

/// 带维度标记的 UV 列表
///
/// 变体即维度：向 [`Mesh::get_uvs`] 传入哪种变体，就得到哪种维度的数据。
#[derive(Debug, Clone, PartialEq)]
pub enum UvList {
    Uv2(Vec<Vector2>),
    Uv3(Vec<Vector3>),
    Uv4(Vec<Vector4>),
}

impl UvList {
    /// 创建指定维度的空列表
    pub fn new(dimension: UvDimension) -> Self {
        Self::with_capacity(dimension, 0)
    }

    /// 创建指定维度并预分配容量的空列表
    pub fn with_capacity(dimension: UvDimension, capacity: usize) -> Self {
        match dimension {
            UvDimension::Two => UvList::Uv2(Vec::with_capacity(capacity)),
            UvDimension::Three => UvList::Uv3(Vec::with_capacity(capacity)),
            UvDimension::Four => UvList::Uv4(Vec::with_capacity(capacity)),
        }
    }

    /// 列表的维度
    pub fn dimension(&self) -> UvDimension {
        match self {
            UvList::Uv2(_) => UvDimension::Two,
            UvList::Uv3(_) => UvDimension::Three,
            UvList::Uv4(_) => UvDimension::Four,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            UvList::Uv2(uvs) => uvs.len(),
            UvList::Uv3(uvs) => uvs.len(),
            UvList::Uv4(uvs) => uvs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 追加 2D 数据，按自身维度扩展，多出的分量补 0
    pub fn extend_from_2d(&mut self, uvs: &[Vector2]) {
        match self {
            UvList::Uv2(out) => out.extend_from_slice(uvs),
            UvList::Uv3(out) => out.extend(uvs.iter().map(|uv| Vector3::new(uv.x, uv.y, 0.0))),
            UvList::Uv4(out) => {
                out.extend(uvs.iter().map(|uv| Vector4::new(uv.x, uv.y, 0.0, 0.0)))
            }
        }
    }

    /// 转换为 2D 列表（截断多余分量）
    pub fn into_2d(self) -> Vec<Vector2> {
        match self {
            UvList::Uv2(uvs) => uvs,
            UvList::Uv3(uvs) => uvs.iter().map(|uv| Vector2::new(uv.x, uv.y)).collect(),
            UvList::Uv4(uvs) => uvs.iter().map(|uv| Vector2::new(uv.x, uv.y)).collect(),
        }
    }

    /// 转换为 3D 列表（按需截断或补 0）
    pub fn into_3d(self) -> Vec<Vector3> {
        match self {
            UvList::Uv2(uvs) => uvs.iter().map(|uv| Vector3::new(uv.x, uv.y, 0.0)).collect(),
            UvList::Uv3(uvs) => uvs,
            UvList::Uv4(uvs) => uvs.iter().map(|uv| Vector3::new(uv.x, uv.y, uv.z)).collect(),
        }
    }

    /// 转换为 4D 列表（补 0 扩展）
    pub fn into_4d(self) -> Vec<Vector4> {
        match self {
            UvList::Uv2(uvs) => uvs.iter().map(|uv| Vector4::new(uv.x, uv.y, 0.0, 0.0)).collect(),
            UvList::Uv3(uvs) => uvs.iter().map(|uv| Vector4::new(uv.x, uv.y, uv.z, 0.0)).collect(),
            UvList::Uv4(uvs) => uvs,
        }
    }
}

/// 访问器识别的通道数量，恒为 [`UV_CHANNEL_COUNT`]
#[inline]
pub fn channel_count() -> usize {
    UV_CHANNEL_COUNT
}

/// 按指定维度读取单个 UV 通道
///
/// # 错误
///
/// - `channel` 不在 `0..4` 内时返回 [`RangeError::UvChannel`]（不检查网格）
/// - 网格没有存储该通道时返回越界错误
/// - 通道没有数据时返回 [`crate::core::MeshError::MissingData`]
///
/// # 示例
///
/// ```rust
/// use mesh_interchange::geometry::mesh::Mesh;
/// use mesh_interchange::geometry::uv::{self, UvDimension, UvList};
/// use mesh_interchange::math::{Vector2, Vector3};
///
/// let mut mesh = Mesh::new(vec![Vector3::zeros()], vec![]);
/// mesh.texture_coordinates.push(Some(vec![Vector2::new(0.25, 0.75)]));
///
/// let uvs = uv::mesh_uvs(&mesh, 0, UvDimension::Three)?;
/// assert_eq!(uvs, UvList::Uv3(vec![Vector3::new(0.25, 0.75, 0.0)]));
/// # Ok::<(), mesh_interchange::core::MeshError>(())
/// ```
pub fn mesh_uvs(mesh: &Mesh, channel: usize, dimension: UvDimension) -> Result<UvList> {
    if channel >= UV_CHANNEL_COUNT {
        return Err(RangeError::UvChannel {
            channel,
            count: UV_CHANNEL_COUNT,
        }
        .into());
    }

    let mut uvs = UvList::with_capacity(dimension, mesh.vertex_count());
    mesh.get_uvs(channel, &mut uvs)?;
    Ok(uvs)
}

/// 读取 2D UV 通道
pub fn mesh_uvs_2d(mesh: &Mesh, channel: usize) -> Result<Vec<Vector2>> {
    Ok(mesh_uvs(mesh, channel, UvDimension::Two)?.into_2d())
}

/// 读取 3D UV 通道，z 分量为 0
pub fn mesh_uvs_3d(mesh: &Mesh, channel: usize) -> Result<Vec<Vector3>> {
    Ok(mesh_uvs(mesh, channel, UvDimension::Three)?.into_3d())
}

/// 读取 4D UV 通道，z 和 w 分量为 0
pub fn mesh_uvs_4d(mesh: &Mesh, channel: usize) -> Result<Vec<Vector4>> {
    Ok(mesh_uvs(mesh, channel, UvDimension::Four)?.into_4d())
}

/// 以 4D 形式读取全部识别的通道
///
/// 任何单个通道的失败（没有数据、网格未存储该通道）都会变成空列表，
/// 整体调用总是成功。
pub fn all_mesh_uvs(mesh: &Mesh) -> [Vec<Vector4>; UV_CHANNEL_COUNT] {
    std::array::from_fn(|channel| match mesh_uvs_4d(mesh, channel) {
        Ok(uvs) => uvs,
        Err(e) => {
            tracing::debug!(channel, error = %e, "UV channel unavailable, using empty list");
            Vec::new()
        }
    })
}

/// 统计 UV 列表实际使用的分量数
///
/// 空列表返回 0；否则依次检查 X、Y、Z、W，只要整个列表中任意一个值非零就提升宽度。
/// 只有在宽度达到 4 时才提前结束扫描。
pub fn used_component_count(uvs: &[Vector4]) -> usize {
    let mut used = 0;
    for uv in uvs {
        if used < 1 && uv.x != 0.0 {
            used = 1;
        }
        if used < 2 && uv.y != 0.0 {
            used = 2;
        }
        if used < 3 && uv.z != 0.0 {
            used = 3;
        }
        if used < 4 && uv.w != 0.0 {
            used = 4;
            break;
        }
    }
    used
}

/// 决定持久化 UV 时使用的分量数
///
/// 启用 `manual_uv_component_count` 时使用配置值（超过 4 视为越界），
/// 否则回退到 [`used_component_count`] 的自动检测。
pub fn resolve_component_count(options: &SimplificationOptions, uvs: &[Vector4]) -> Result<usize> {
    if !options.manual_uv_component_count {
        return Ok(used_component_count(uvs));
    }

    if options.uv_component_count > UV_CHANNEL_COUNT {
        return Err(RangeError::ComponentCount {
            count: options.uv_component_count,
        }
        .into());
    }
    Ok(options.uv_component_count)
}

/// 4D UV 转 2D，丢弃 z 和 w；输入为 `None` 时返回 `None`
pub fn convert_to_2d(uvs: Option<&[Vector4]>) -> Option<Vec<Vector2>> {
    uvs.map(|uvs| uvs.iter().map(|uv| Vector2::new(uv.x, uv.y)).collect())
}

/// 4D UV 转 3D，丢弃 w；输入为 `None` 时返回 `None`
pub fn convert_to_3d(uvs: Option<&[Vector4]>) -> Option<Vec<Vector3>> {
    uvs.map(|uvs| uvs.iter().map(|uv| Vector3::new(uv.x, uv.y, uv.z)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MeshError;

    fn mesh_with_channels(channels: Vec<Option<Vec<Vector2>>>) -> Mesh {
        let mut mesh = Mesh::new(
            vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)],
            vec![],
        );
        mesh.texture_coordinates = channels;
        mesh
    }

    fn two_uvs() -> Vec<Vector2> {
        vec![Vector2::new(0.5, 0.25), Vector2::new(1.0, 0.0)]
    }

    #[test]
    fn test_channel_count_is_fixed() {
        assert_eq!(channel_count(), 4);
    }

    #[test]
    fn test_widening() {
        let mesh = mesh_with_channels(vec![Some(two_uvs())]);

        assert_eq!(mesh_uvs_2d(&mesh, 0).unwrap(), two_uvs());
        assert_eq!(
            mesh_uvs_3d(&mesh, 0).unwrap(),
            vec![Vector3::new(0.5, 0.25, 0.0), Vector3::new(1.0, 0.0, 0.0)]
        );
        assert_eq!(
            mesh_uvs_4d(&mesh, 0).unwrap(),
            vec![Vector4::new(0.5, 0.25, 0.0, 0.0), Vector4::new(1.0, 0.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_channel_outside_recognized_range() {
        let channels = vec![Some(two_uvs()); 6];
        let mesh = mesh_with_channels(channels);

        let err = mesh_uvs(&mesh, 4, UvDimension::Two).unwrap_err();
        assert!(matches!(
            err,
            MeshError::OutOfRange(RangeError::UvChannel { channel: 4, count: 4 })
        ));
    }

    #[test]
    fn test_missing_channel_fails_single_but_not_whole() {
        let mesh = mesh_with_channels(vec![Some(two_uvs()), None]);

        assert!(mesh_uvs_2d(&mesh, 1).unwrap_err().is_missing_data());
        assert!(mesh_uvs_2d(&mesh, 2).unwrap_err().is_out_of_range());

        let all = all_mesh_uvs(&mesh);
        assert_eq!(all[0].len(), 2);
        assert!(all[1].is_empty());
        assert!(all[2].is_empty());
        assert!(all[3].is_empty());
    }

    #[test]
    fn test_used_component_count() {
        assert_eq!(used_component_count(&[]), 0);
        assert_eq!(used_component_count(&[Vector4::new(0.0, 0.0, 0.0, 0.0)]), 0);
        assert_eq!(used_component_count(&[Vector4::new(1.0, 0.0, 0.0, 0.0)]), 1);
        assert_eq!(used_component_count(&[Vector4::new(1.0, 2.0, 0.0, 0.0)]), 2);
        assert_eq!(used_component_count(&[Vector4::new(0.0, 0.0, 0.0, 1.0)]), 4);
    }

    #[test]
    fn test_used_component_count_spans_whole_list() {
        let uvs = [
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 3.0, 0.0),
            Vector4::new(0.0, 2.0, 0.0, 0.0),
        ];
        assert_eq!(used_component_count(&uvs), 3);
    }

    #[test]
    fn test_resolve_component_count() {
        let uvs = [Vector4::new(1.0, 2.0, 0.0, 0.0)];

        let mut options = SimplificationOptions::default();
        assert_eq!(resolve_component_count(&options, &uvs).unwrap(), 2);

        options.manual_uv_component_count = true;
        options.uv_component_count = 4;
        assert_eq!(resolve_component_count(&options, &uvs).unwrap(), 4);

        options.uv_component_count = 5;
        assert!(resolve_component_count(&options, &uvs).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_convert_none_propagates() {
        assert!(convert_to_2d(None).is_none());
        assert!(convert_to_3d(None).is_none());
    }

    #[test]
    fn test_convert_narrows() {
        let uvs = [Vector4::new(1.0, 2.0, 3.0, 4.0)];

        assert_eq!(convert_to_2d(Some(&uvs[..])), Some(vec![Vector2::new(1.0, 2.0)]));
        assert_eq!(convert_to_3d(Some(&uvs[..])), Some(vec![Vector3::new(1.0, 2.0, 3.0)]));
    }

    #[test]
    fn test_uv_list_shape() {
        let mut list = UvList::new(UvDimension::Four);
        assert!(list.is_empty());

        list.extend_from_2d(&two_uvs());
        assert_eq!(list.dimension().components(), 4);
        assert_eq!(list.len(), 2);

        let narrowed = list.clone().into_3d();
        assert_eq!(narrowed[0], Vector3::new(0.5, 0.25, 0.0));
        assert_eq!(list.into_2d(), two_uvs());
    }
}
