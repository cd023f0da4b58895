// ==========================================
// 高级分析接口配置校验器 - 核心库
// ==========================================
// 职责: 配置文档（YAML / JSON）的结构校验、默认值补齐、类型化加载
// 特性: 校验为纯函数，违规作为数据返回，一次列出全部问题
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 类型、配置模型、校验报告
pub mod domain;

// 模式层 - 规则表、默认值、JSON-Schema
pub mod schema;

// 校验层 - 结构检查
pub mod validator;

// 加载层 - YAML / JSON 解析
pub mod loader;

// 配置层 - 已校验配置
pub mod config;

// 日志系统
pub mod logging;

// 命令行接口
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{AnalysisSettings, SettingsError, SettingsResult};
pub use domain::{
    AnalysisConfig, FieldPath, FilterType, LogLevel, ObservationFilter, SkyFrame,
    ValidationReport, Violation, ViolationKind,
};
pub use loader::{validate_file, validate_source, LoadError};
pub use validator::{validate, ConfigValidator};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "高级分析接口配置校验器";
