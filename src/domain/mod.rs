// ==========================================
// 分析配置校验器 - 领域模型层
// ==========================================
// 职责: 定义枚举类型、类型化配置模型、校验报告
// 红线: 不含文件读写，不含校验逻辑
// ==========================================

pub mod config;
pub mod report;
pub mod types;

// 重导出核心类型
pub use config::{
    AnalysisConfig, FilterParams, GeneralSettings, LoggingSettings, ObservationFilter,
    ObservationsSettings, ScalarValue,
};
pub use report::{FieldPath, PathSegment, ValidationReport, Violation, ViolationCounts};
pub use types::{FilterType, LogLevel, SkyFrame, ViolationKind};
