// ==========================================
// 分析配置校验器 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::report::ValidationReport;
use crate::loader::error::LoadError;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    /// 配置文档未通过校验（携带完整报告）
    #[error("配置校验失败（{} 条违规）", .0.len())]
    Invalid(ValidationReport),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("配置转换失败: {0}")]
    ConversionError(String),

    #[error("配置序列化失败: {0}")]
    SerializeError(String),

    // ===== 进程级配置 =====
    #[error("进程级配置已安装，不允许重复安装")]
    AlreadyInstalled,

    #[error("进程级配置尚未安装")]
    NotInstalled,
}

impl SettingsError {
    /// 校验报告（仅 Invalid 时存在）
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            SettingsError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type SettingsResult<T> = Result<T, SettingsError>;
