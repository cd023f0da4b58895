// ==========================================
// 分析配置校验器 - 加载层
// ==========================================
// 职责: 读取配置文件，解析为文档树，交由校验层检查
// 支持: YAML, JSON
// 约定: 文档无法解析时返回单条根路径违规，而非错误
// ==========================================

pub mod error;
pub mod file_parser;
pub mod parser_trait;

pub use error::{LoadError, LoadResult};
pub use file_parser::{JsonParser, UniversalParser, YamlParser};
pub use parser_trait::DocumentParser;

use crate::domain::report::ValidationReport;
use crate::validator::ConfigValidator;
use std::path::Path;

/// 解析并校验文本
pub fn validate_source(text: &str, parser: &dyn DocumentParser) -> ValidationReport {
    match parser.parse_str(text) {
        Ok(document) => ConfigValidator::new().validate(&document),
        Err(err) => {
            tracing::warn!(error = %err, "配置文档无法解析");
            ValidationReport::unparsable(err)
        }
    }
}

/// 读取、解析并校验文件
///
/// # 返回
/// - Ok(ValidationReport): 文件可读（内容无法解析时报告中含一条根路径违规）
/// - Err(LoadError): 文件不存在、格式不支持或读取失败
pub fn validate_file(path: &Path) -> LoadResult<ValidationReport> {
    match UniversalParser.parse_file(path) {
        Ok(document) => Ok(ConfigValidator::new().validate(&document)),
        Err(err) if err.is_parse_error() => {
            tracing::warn!(path = %path.display(), error = %err, "配置文件无法解析");
            Ok(ValidationReport::unparsable(err))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_source_valid() {
        let report = validate_source("general:\n  logging:\n    level: INFO\n", &YamlParser);
        assert!(report.is_valid());
    }

    #[test]
    fn test_validate_source_unparsable() {
        let report = validate_source("general: [unclosed", &YamlParser);
        assert_eq!(report.len(), 1);
        assert!(report.violations[0].path.is_root());
        assert!(report.violations[0]
            .message
            .starts_with("document could not be parsed"));
    }

    #[test]
    fn test_validate_source_scalar_document() {
        let report = validate_source("just a string", &YamlParser);
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations[0].message, "expected object, found string");
    }
}
