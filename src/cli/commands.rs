// ==========================================
// 分析配置校验器 - 子命令实现
// ==========================================
// 约定: 违规与文件访问失败通过退出码区分；输出写入调用方给定的 writer
// ==========================================

use crate::cli::{Commands, OutputFormat, EXIT_INVALID, EXIT_IO, EXIT_SUCCESS};
use crate::config::{AnalysisSettings, SettingsError};
use crate::loader;
use crate::schema::schema_document;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// 执行子命令，返回退出码
pub fn run_command(command: &Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
    match command {
        Commands::Validate { file, format } => run_validate(file, *format, out, err),
        Commands::Show { file, format } => run_show(file, *format, out, err),
        Commands::Template => run_template(out),
        Commands::Schema => run_schema(out),
    }
}

fn run_validate(
    file: &Path,
    format: OutputFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u8> {
    let report = match loader::validate_file(file) {
        Ok(report) => report,
        Err(load_err) => {
            tracing::error!(path = %file.display(), error = %load_err, "配置文件无法读取");
            writeln!(err, "{}: {}", file.display(), load_err)?;
            return Ok(EXIT_IO);
        }
    };

    match format {
        OutputFormat::Text => writeln!(out, "{}: {}", file.display(), report.summary())?,
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report.with_source(file.display().to_string()))
                .context("校验报告序列化失败")?;
            writeln!(out, "{}", rendered)?;
        }
    }

    Ok(if report.is_valid() {
        EXIT_SUCCESS
    } else {
        EXIT_INVALID
    })
}

fn run_show(
    file: &Path,
    format: OutputFormat,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u8> {
    let settings = match AnalysisSettings::from_path(file) {
        Ok(settings) => settings,
        Err(SettingsError::Invalid(report)) => {
            writeln!(err, "{}: {}", file.display(), report.summary())?;
            return Ok(EXIT_INVALID);
        }
        Err(SettingsError::Load(load_err)) => {
            writeln!(err, "{}: {}", file.display(), load_err)?;
            return Ok(EXIT_IO);
        }
        Err(other) => return Err(other.into()),
    };

    let rendered = match format {
        OutputFormat::Text => settings.to_yaml()?,
        OutputFormat::Json => settings.snapshot_json()?,
    };
    write_block(out, &rendered)?;
    Ok(EXIT_SUCCESS)
}

fn run_template(out: &mut dyn Write) -> Result<u8> {
    let rendered = AnalysisSettings::template().to_yaml()?;
    write_block(out, &rendered)?;
    Ok(EXIT_SUCCESS)
}

fn run_schema(out: &mut dyn Write) -> Result<u8> {
    let rendered =
        serde_json::to_string_pretty(schema_document()).context("JSON-Schema 序列化失败")?;
    write_block(out, &rendered)?;
    Ok(EXIT_SUCCESS)
}

// 保证输出以换行结尾
fn write_block(out: &mut dyn Write, text: &str) -> Result<()> {
    if text.ends_with('\n') {
        write!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", text)?;
    }
    Ok(())
}
