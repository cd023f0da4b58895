// ==========================================
// 分析配置校验器 - 配置模式层
// ==========================================
// 职责: 静态规则表、默认值、JSON-Schema 文档
// 约束: 全部为进程级只读常量
// ==========================================

pub mod defaults;
pub mod document;
pub mod rules;

pub use defaults::{default_document, fill_defaults, DEFAULT_LOG_LEVEL, DEFAULT_OUT_FOLDER};
pub use document::{schema_document, SCHEMA_DIALECT, SCHEMA_TITLE};
pub use rules::{FieldRule, Literal, ObjectRule, ROOT};
