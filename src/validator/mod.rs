// ==========================================
// 分析配置校验器 - 校验层
// ==========================================
// 职责: 规则驱动的递归结构检查
// 输出: ValidationReport（违规作为数据返回，不抛出错误）
// ==========================================

pub mod checker;
pub mod config_validator;

pub use checker::{json_type_name, Checker};
pub use config_validator::{validate, ConfigValidator};
