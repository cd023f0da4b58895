// ==========================================
// 分析配置校验器 - 进程级只读配置
// ==========================================
// 约束: 一次分析运行中只安装一次，安装后只读，无需显式释放
// ==========================================

use crate::config::error::{SettingsError, SettingsResult};
use crate::config::settings::AnalysisSettings;
use std::sync::OnceLock;

static CURRENT: OnceLock<AnalysisSettings> = OnceLock::new();

/// 安装进程级配置
///
/// # 返回
/// - Ok(&'static AnalysisSettings): 安装成功
/// - Err(SettingsError::AlreadyInstalled): 已安装过
pub fn install(settings: AnalysisSettings) -> SettingsResult<&'static AnalysisSettings> {
    CURRENT
        .set(settings)
        .map_err(|_| SettingsError::AlreadyInstalled)?;
    tracing::debug!("进程级配置已安装");
    CURRENT.get().ok_or(SettingsError::NotInstalled)
}

/// 当前进程级配置
pub fn current() -> Option<&'static AnalysisSettings> {
    CURRENT.get()
}

/// 当前进程级配置（未安装时返回错误）
pub fn require() -> SettingsResult<&'static AnalysisSettings> {
    current().ok_or(SettingsError::NotInstalled)
}
