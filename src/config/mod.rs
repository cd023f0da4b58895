// ==========================================
// 分析配置校验器 - 配置层
// ==========================================
// 职责: 已校验配置的构造、覆写、导出与进程级持有
// ==========================================

pub mod error;
pub mod global;
pub mod merge;
pub mod settings;

// 重导出核心类型
pub use error::{SettingsError, SettingsResult};
pub use merge::deep_merge;
pub use settings::AnalysisSettings;
