//! 配置管理模块
//!
//! 提供交换层配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//!
//! [codec]
//! float_precision = 6             # 省略时使用最短可往返表示
//! reject_corner_attributes = false
//!
//! [simplification]
//! manual_uv_component_count = false
//! uv_component_count = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 写出浮点数时允许的最大小数位数
pub const MAX_FLOAT_PRECISION: usize = 9;

/// 交换层配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,

    /// 文本编解码配置
    #[serde(default)]
    pub codec: CodecConfig,

    /// 简化阶段的选项（由外部简化器消费）
    #[serde(default)]
    pub simplification: SimplificationOptions,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// OBJ 编解码配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// 写出时的小数位数，`None` 表示最短可往返表示
    #[serde(default)]
    pub float_precision: Option<usize>,

    /// 面记录带有 UV/法线子索引时直接报错，而不是忽略并告警
    #[serde(default)]
    pub reject_corner_attributes: bool,
}

/// 网格简化选项
///
/// 简化算法本身不在本 crate 中，这里只承载其输入参数，
/// 其中 UV 分量数相关的两项由 [`crate::geometry::uv::resolve_component_count`] 使用。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplificationOptions {
    /// 是否保留边界边
    #[serde(default)]
    pub preserve_border_edges: bool,

    /// 是否保留 UV 接缝边
    #[serde(default)]
    pub preserve_uv_seam_edges: bool,

    /// 是否保留 UV 折叠边
    #[serde(default)]
    pub preserve_uv_foldover_edges: bool,

    /// 是否考虑表面离散曲率
    #[serde(default)]
    pub preserve_surface_curvature: bool,

    /// 是否把同一位置的顶点视为同一顶点（属性分离保存）
    #[serde(default = "default_enable_smart_link")]
    pub enable_smart_link: bool,

    /// 顶点链接的最大距离，仅在 `enable_smart_link` 时生效
    #[serde(default = "default_vertex_link_distance")]
    pub vertex_link_distance: f64,

    /// 最大迭代次数
    #[serde(default = "default_max_iteration_count")]
    pub max_iteration_count: u32,

    /// 简化的激进程度
    #[serde(default = "default_aggressiveness")]
    pub aggressiveness: f64,

    /// 使用手动指定的 UV 分量数，而不是自动检测
    #[serde(default)]
    pub manual_uv_component_count: bool,

    /// 手动指定的 UV 分量数（所有通道共用）
    #[serde(default = "default_uv_component_count")]
    pub uv_component_count: usize,
}

// 默认值函数
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_interchange.log".to_string() }
fn default_enable_smart_link() -> bool { true }
fn default_vertex_link_distance() -> f64 { f64::EPSILON }
fn default_max_iteration_count() -> u32 { 100 }
fn default_aggressiveness() -> f64 { 7.0 }
fn default_uv_component_count() -> usize { 2 }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Default for SimplificationOptions {
    fn default() -> Self {
        Self {
            preserve_border_edges: false,
            preserve_uv_seam_edges: false,
            preserve_uv_foldover_edges: false,
            preserve_surface_curvature: false,
            enable_smart_link: default_enable_smart_link(),
            vertex_link_distance: default_vertex_link_distance(),
            max_iteration_count: default_max_iteration_count(),
            aggressiveness: default_aggressiveness(),
            manual_uv_component_count: false,
            uv_component_count: default_uv_component_count(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use mesh_interchange::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), mesh_interchange::core::MeshError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--precision <n>`: 写出浮点数的小数位数
    /// - `--strict`: 拒绝带 UV/法线子索引的面记录
    /// - `--log-level <level>`: 日志级别
    /// - `--uv-components <n>`: 手动指定 UV 分量数
    ///
    /// 无法解析的值会被忽略，保留原配置。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--strict") {
            self.codec.reject_corner_attributes = true;
        }

        if let Some(precision) = value_after(&args, "--precision").and_then(|v| v.parse().ok()) {
            self.codec.float_precision = Some(precision);
        }

        if let Some(level) = value_after(&args, "--log-level").and_then(LogLevel::parse) {
            self.logging.level = level;
        }

        if let Some(count) = value_after(&args, "--uv-components").and_then(|v| v.parse().ok()) {
            self.simplification.manual_uv_component_count = true;
            self.simplification.uv_component_count = count;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if let Some(precision) = self.codec.float_precision {
            if precision > MAX_FLOAT_PRECISION {
                return Err(invalid(
                    "codec.float_precision",
                    format!("must be at most {}", MAX_FLOAT_PRECISION),
                ));
            }
        }

        let options = &self.simplification;
        if options.uv_component_count > 4 {
            return Err(invalid(
                "simplification.uv_component_count",
                "must be between 0 and 4".to_string(),
            ));
        }
        if options.max_iteration_count == 0 {
            return Err(invalid(
                "simplification.max_iteration_count",
                "must be greater than 0".to_string(),
            ));
        }
        if options.aggressiveness.is_nan() || options.aggressiveness <= 0.0 {
            return Err(invalid(
                "simplification.aggressiveness",
                "must be greater than 0".to_string(),
            ));
        }
        if options.vertex_link_distance.is_nan() || options.vertex_link_distance < 0.0 {
            return Err(invalid(
                "simplification.vertex_link_distance",
                "must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

impl LogLevel {
    /// 从字符串解析日志级别（不区分大小写）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}

fn invalid(field: &str, reason: String) -> super::error::MeshError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.codec.float_precision, None);
        assert!(!config.codec.reject_corner_attributes);
        assert!(config.simplification.enable_smart_link);
        assert_eq!(config.simplification.max_iteration_count, 100);
        assert_eq!(config.simplification.uv_component_count, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            "[codec]\nfloat_precision = 4\n\n[simplification]\naggressiveness = 3.5\n",
        )
        .unwrap();

        assert_eq!(config.codec.float_precision, Some(4));
        assert_eq!(config.simplification.aggressiveness, 3.5);
        assert_eq!(config.simplification.max_iteration_count, 100);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = Config::from_toml_str("[codec\nfloat_precision = ");
        assert!(matches!(
            result,
            Err(crate::core::MeshError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.simplification.uv_component_count = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.codec.float_precision = Some(12);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simplification.aggressiveness = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "mesh_interchange",
            "in.obj",
            "--precision",
            "5",
            "--strict",
            "--log-level",
            "DEBUG",
            "--uv-components",
            "3",
        ]);

        assert_eq!(config.codec.float_precision, Some(5));
        assert!(config.codec.reject_corner_attributes);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.simplification.manual_uv_component_count);
        assert_eq!(config.simplification.uv_component_count, 3);
    }

    #[test]
    fn test_apply_args_ignores_bad_values() {
        let mut config = Config::default();
        config.apply_args(["--precision", "many", "--log-level"]);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.codec.float_precision = Some(3);
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
