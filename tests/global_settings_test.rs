// ==========================================
// 进程级配置测试
// ==========================================
// 说明: 进程级配置只能安装一次，本文件仅含一个测试函数
// ==========================================

use analysis_config::config::{global, SettingsError};
use analysis_config::{AnalysisSettings, LogLevel};

#[test]
fn test_install_once_then_read_only() {
    assert!(global::current().is_none());
    assert!(matches!(global::require(), Err(SettingsError::NotInstalled)));

    let settings = AnalysisSettings::from_yaml_str("general:\n  logging:\n    level: ERROR\n")
        .expect("配置应通过校验");
    let installed = global::install(settings).expect("首次安装应成功");
    assert_eq!(installed.logging().level, LogLevel::Error);

    let again = global::install(AnalysisSettings::template());
    assert!(matches!(again, Err(SettingsError::AlreadyInstalled)));

    let current = global::require().expect("应已安装");
    assert_eq!(current.logging().level, LogLevel::Error);
}
