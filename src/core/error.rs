//! 错误处理模块
//!
//! 定义了网格数据交换层使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 手写 `Display` 与 `Error` 实现，不引入额外依赖
//! - 每种错误携带足够的上下文（索引、行号、通道号）
//! - 支持错误链（error source）
//! - 易于模式匹配：调用方可以区分越界、缺失数据与输入格式错误

use std::fmt;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, MeshError>;

/// 网格交换层的错误类型
#[derive(Debug)]
pub enum MeshError {
    /// 索引或通道号超出有效范围
    OutOfRange(RangeError),

    /// 请求的 UV 通道没有数据
    MissingData {
        /// 通道号
        channel: usize,
    },

    /// 文本输入中的字段无法解析
    MalformedInput {
        /// 出错的行号（从 1 开始）
        line: usize,
        /// 错误描述
        message: String,
    },

    /// 格式中明确不支持的特性
    Unsupported(String),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 几何数据不满足不变量
    InvalidGeometry(String),

    /// 配置错误
    Config(ConfigError),

    /// IO 错误
    Io(std::io::Error),
}

/// 越界错误的具体种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// 子网格序号越界
    SubMesh { index: usize, count: usize },

    /// 子网格的索引区间超出三角形索引缓冲区
    SubMeshIndices { start: usize, count: usize, len: usize },

    /// UV 通道号越界
    UvChannel { channel: usize, count: usize },

    /// UV 分量数不在 0..=4 之间
    ComponentCount { count: usize },
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

impl MeshError {
    /// 构造一个带行号的输入格式错误
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        MeshError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// 是否为越界错误
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, MeshError::OutOfRange(_))
    }

    /// 是否为缺失数据错误
    pub fn is_missing_data(&self) -> bool {
        matches!(self, MeshError::MissingData { .. })
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::OutOfRange(e) => write!(f, "Out of range: {}", e),
            MeshError::MissingData { channel } => {
                write!(f, "UV channel {} holds no data", channel)
            }
            MeshError::MalformedInput { line, message } => {
                write!(f, "Malformed input at line {}: {}", line, message)
            }
            MeshError::Unsupported(msg) => write!(f, "Unsupported feature: {}", msg),
            MeshError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
            MeshError::Config(e) => write!(f, "Configuration error: {}", e),
            MeshError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::SubMesh { index, count } => {
                write!(f, "submesh index {} (submesh count {})", index, count)
            }
            RangeError::SubMeshIndices { start, count, len } => write!(
                f,
                "submesh range {}..{}+{} exceeds index buffer of length {}",
                start, start, count, len
            ),
            RangeError::UvChannel { channel, count } => {
                write!(f, "UV channel {} (channel count {})", channel, count)
            }
            RangeError::ComponentCount { count } => {
                write!(f, "UV component count {} (expected 0..=4)", count)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(e) => Some(e),
            MeshError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for RangeError {}
impl std::error::Error for ConfigError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err)
    }
}

impl From<RangeError> for MeshError {
    fn from(err: RangeError) -> Self {
        MeshError::OutOfRange(err)
    }
}

impl From<ConfigError> for MeshError {
    fn from(err: ConfigError) -> Self {
        MeshError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = MeshError::malformed(7, "expected float, found 'abc'");
        assert_eq!(
            err.to_string(),
            "Malformed input at line 7: expected float, found 'abc'"
        );

        let err: MeshError = RangeError::SubMesh { index: 2, count: 2 }.into();
        assert!(err.is_out_of_range());
        assert!(err.to_string().contains("submesh index 2"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: MeshError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(!err.is_missing_data());
    }
}
