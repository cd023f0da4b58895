// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// 支持按配置文件 general.logging 初始化
// ==========================================

use crate::domain::config::LoggingSettings;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("不支持的文件模式: {0}（仅支持 w / a / w+ / a+）")]
    InvalidFileMode(String),

    #[error("日志文件打开失败 ({path}): {message}")]
    FileOpenError { path: String, message: String },

    #[error("日志系统初始化失败: {0}")]
    InitError(String),
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=analysis_config=trace
///
/// # 示例
/// ```no_run
/// use analysis_config::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_level("info");
}

/// 以指定的默认级别初始化（RUST_LOG 优先）
pub fn init_with_level(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init();
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

// ==========================================
// 按 general.logging 初始化
// ==========================================

/// 日志文件写入模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Truncate,
    Append,
}

impl FileMode {
    pub fn parse(mode: &str) -> Result<Self, LoggingError> {
        match mode {
            "w" | "w+" => Ok(FileMode::Truncate),
            "a" | "a+" => Ok(FileMode::Append),
            other => Err(LoggingError::InvalidFileMode(other.to_string())),
        }
    }
}

/// 由 general.logging 推导出的订阅器参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSetup {
    pub directive: String,
    pub file: Option<(PathBuf, FileMode)>,
    pub show_time: bool,
    pub show_level: bool,
    pub show_target: bool,
    pub datefmt: Option<String>,
}

impl LogSetup {
    /// 从日志参数推导
    ///
    /// format 使用 `%(asctime)s` / `%(levelname)s` / `%(name)s` 占位符控制对应字段是否输出；
    /// 未给出 format 时全部输出
    pub fn from_settings(settings: &LoggingSettings) -> Result<Self, LoggingError> {
        let file = match &settings.filename {
            Some(filename) => {
                let mode = match &settings.filemode {
                    Some(mode) => FileMode::parse(mode)?,
                    None => FileMode::Append,
                };
                Some((PathBuf::from(filename), mode))
            }
            None => None,
        };

        let (show_time, show_level, show_target) = match &settings.format {
            Some(format) => (
                format.contains("%(asctime)s"),
                format.contains("%(levelname)s"),
                format.contains("%(name)s"),
            ),
            None => (true, true, true),
        };

        Ok(Self {
            directive: settings.level.as_filter_directive().to_string(),
            file,
            show_time,
            show_level,
            show_target,
            datefmt: settings.datefmt.clone(),
        })
    }
}

/// 按配置文件中的日志参数初始化日志系统
///
/// RUST_LOG 设置时优先于配置中的 level
pub fn init_from_settings(settings: &LoggingSettings) -> Result<(), LoggingError> {
    let setup = LogSetup::from_settings(settings)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&setup.directive));

    let (writer, to_file) = match &setup.file {
        Some((path, mode)) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(*mode == FileMode::Append)
                .truncate(*mode == FileMode::Truncate)
                .open(path)
                .map_err(|e| LoggingError::FileOpenError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), true)
        }
        None => (BoxMakeWriter::new(std::io::stderr), false),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(!to_file)
        .with_level(setup.show_level)
        .with_target(setup.show_target);

    let result = if !setup.show_time {
        builder.without_time().try_init()
    } else if let Some(datefmt) = &setup.datefmt {
        builder.with_timer(ChronoLocal::new(datefmt.clone())).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| LoggingError::InitError(e.to_string()))?;

    tracing::debug!(
        level = %settings.level,
        file = ?setup.file.as_ref().map(|(p, _)| p.display().to_string()),
        "日志系统已按配置初始化"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LogLevel;

    fn logging(level: LogLevel) -> LoggingSettings {
        LoggingSettings {
            level,
            ..LoggingSettings::default()
        }
    }

    #[test]
    fn test_level_directive_mapping() {
        let cases = [
            (LogLevel::Critical, "error"),
            (LogLevel::Error, "error"),
            (LogLevel::Warning, "warn"),
            (LogLevel::Info, "info"),
            (LogLevel::Debug, "debug"),
            (LogLevel::NotSet, "trace"),
        ];
        for (level, directive) in cases {
            let setup = LogSetup::from_settings(&logging(level)).unwrap();
            assert_eq!(setup.directive, directive);
        }
    }

    #[test]
    fn test_defaults_without_format() {
        let setup = LogSetup::from_settings(&logging(LogLevel::Info)).unwrap();
        assert!(setup.file.is_none());
        assert!(setup.show_time && setup.show_level && setup.show_target);
    }

    #[test]
    fn test_file_mode() {
        let mut settings = logging(LogLevel::Debug);
        settings.filename = Some("run.log".to_string());
        let setup = LogSetup::from_settings(&settings).unwrap();
        assert_eq!(setup.file, Some((PathBuf::from("run.log"), FileMode::Append)));

        settings.filemode = Some("w".to_string());
        let setup = LogSetup::from_settings(&settings).unwrap();
        assert_eq!(setup.file, Some((PathBuf::from("run.log"), FileMode::Truncate)));

        settings.filemode = Some("r".to_string());
        assert!(matches!(
            LogSetup::from_settings(&settings),
            Err(LoggingError::InvalidFileMode(mode)) if mode == "r"
        ));
    }

    #[test]
    fn test_format_toggles() {
        let mut settings = logging(LogLevel::Info);
        settings.format = Some("%(levelname)s: %(message)s".to_string());
        settings.datefmt = Some("%Y-%m-%d %H:%M:%S".to_string());
        let setup = LogSetup::from_settings(&settings).unwrap();
        assert!(!setup.show_time);
        assert!(setup.show_level);
        assert!(!setup.show_target);
        assert_eq!(setup.datefmt.as_deref(), Some("%Y-%m-%d %H:%M:%S"));
    }
}
