// ==========================================
// 分析配置校验器 - 命令行接口
// ==========================================
// 用法:
//   analysis-config validate config.yaml [--format json]
//   analysis-config show config.yaml
//   analysis-config template
//   analysis-config schema
// ==========================================

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// ==========================================
// 退出码
// ==========================================

/// 成功 / 配置合法
pub const EXIT_SUCCESS: u8 = 0;
/// 配置不合法（存在违规）
pub const EXIT_INVALID: u8 = 1;
/// 文件无法访问或格式不支持
pub const EXIT_IO: u8 = 2;

/// 高级分析接口配置校验工具
#[derive(Parser, Debug)]
#[command(name = "analysis-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 工具自身的日志级别（trace, debug, info, warn, error），RUST_LOG 优先
    #[arg(long, global = true, default_value = "warn", env = "ANALYSIS_CONFIG_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 校验配置文件，列出全部违规
    Validate {
        /// 配置文件路径（.yaml / .yml / .json）
        file: PathBuf,
        /// 输出格式
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 输出补齐默认值后的有效配置
    Show {
        /// 配置文件路径
        file: PathBuf,
        /// 输出格式
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// 输出默认配置
    Template,
    /// 输出 JSON-Schema 文档
    Schema,
}

/// 输出格式（text 对 show 命令表示 YAML）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
