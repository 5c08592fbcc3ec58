//! 核心功能模块
//!
//! 本模块提供交换层的基础设施，包括日志系统、配置管理和错误处理。
//! 这些模块与具体的几何格式无关，可以被任何管线阶段复用。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 tracing 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件加载编解码与简化选项
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use crate::math::{Vector2, Vector3, Vector4};
pub use error::{Result, MeshError, RangeError, ConfigError};
pub use config::{Config, CodecConfig, LogLevel, SimplificationOptions};
