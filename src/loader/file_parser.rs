// ==========================================
// 分析配置校验器 - 文件解析器实现
// ==========================================
// 支持: YAML (.yaml/.yml) / JSON (.json)
// ==========================================

use crate::loader::error::{LoadError, LoadResult};
use crate::loader::parser_trait::DocumentParser;
use serde_json::Value;
use std::path::Path;

// ==========================================
// YAML Parser 实现
// ==========================================
pub struct YamlParser;

impl DocumentParser for YamlParser {
    fn parse_str(&self, text: &str) -> LoadResult<Value> {
        // 空文档视为 null，交由校验器报告
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_yaml::from_str::<Value>(text)?)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl DocumentParser for JsonParser {
    fn parse_str(&self, text: &str) -> LoadResult<Value> {
        Ok(serde_json::from_str::<Value>(text)?)
    }
}

// ==========================================
// Universal Parser - 按扩展名分发
// ==========================================
pub struct UniversalParser;

impl UniversalParser {
    fn parser_for(path: &Path) -> LoadResult<&'static dyn DocumentParser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Ok(&YamlParser),
            "json" => Ok(&JsonParser),
            "" => Err(LoadError::UnsupportedFormat(path.display().to_string())),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

impl DocumentParser for UniversalParser {
    /// 无扩展名可依据时按 YAML 解析（JSON 文本同样可被接受）
    fn parse_str(&self, text: &str) -> LoadResult<Value> {
        YamlParser.parse_str(text)
    }

    fn parse_file(&self, path: &Path) -> LoadResult<Value> {
        // 先检查存在性，不存在的文件优先报告 FileNotFound
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        Self::parser_for(path)?.parse_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_yaml_parser() {
        let value = YamlParser
            .parse_str("general:\n  logging:\n    level: 20\n")
            .unwrap();
        assert_eq!(value, json!({ "general": { "logging": { "level": 20 } } }));
    }

    #[test]
    fn test_yaml_parser_accepts_json_text() {
        let value = UniversalParser
            .parse_str(r#"{"general": {"out_folder": "."}}"#)
            .unwrap();
        assert_eq!(value["general"]["out_folder"], ".");
    }

    #[test]
    fn test_empty_yaml_is_null() {
        assert_eq!(YamlParser.parse_str("").unwrap(), Value::Null);
    }

    #[test]
    fn test_json_parser_error() {
        let err = JsonParser.parse_str("{ general: }").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_universal_parser_dispatch() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"general": {{}}}}"#).unwrap();
        let value = UniversalParser.parse_file(file.path()).unwrap();
        assert_eq!(value, json!({ "general": {} }));

        let mut file = Builder::new().suffix(".YML").tempfile().unwrap();
        writeln!(file, "general: {{}}").unwrap();
        let value = UniversalParser.parse_file(file.path()).unwrap();
        assert_eq!(value, json!({ "general": {} }));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".toml").tempfile().unwrap();
        let err = UniversalParser.parse_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "toml"));
    }

    #[test]
    fn test_missing_extension_names_the_file() {
        let file = Builder::new().prefix("analysis").tempfile().unwrap();
        let err = UniversalParser.parse_file(file.path()).unwrap_err();
        let expected = file.path().display().to_string();
        assert!(matches!(&err, LoadError::UnsupportedFormat(name) if *name == expected));
        assert!(err.to_string().contains(&expected));
    }

    #[test]
    fn test_non_utf8_file_is_parse_error() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"\xff\xfegeneral: {}\n").unwrap();
        let err = UniversalParser.parse_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::EncodingError(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_missing_file() {
        let err = UniversalParser
            .parse_file(Path::new("/nonexistent/config.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }
}
