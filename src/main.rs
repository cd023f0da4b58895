// ==========================================
// 分析配置校验器 - 命令行主入口
// ==========================================

use analysis_config::cli::commands::run_command;
use analysis_config::cli::{Cli, EXIT_INVALID};
use analysis_config::logging;
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 初始化日志系统（工具自身的日志，输出到 stderr）
    logging::init_with_level(&cli.log_level);

    tracing::debug!("{} {}", analysis_config::APP_NAME, analysis_config::VERSION);

    let stdout = io::stdout();
    let stderr = io::stderr();
    match run_command(&cli.command, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!(error = %err, "命令执行失败");
            eprintln!("错误: {:#}", err);
            ExitCode::from(EXIT_INVALID)
        }
    }
}
