// ==========================================
// 分析配置校验器 - 默认值
// ==========================================
// 规则:
// - general.out_folder 缺省为 "."
// - general.logging 缺省为 {level: "INFO"}；已给出的 logging 对象缺少 level 时补为 "INFO"
// - 只补齐缺失的键，不覆盖已有的值（包括非法值）
// ==========================================

use serde_json::{json, Value};

pub const DEFAULT_OUT_FOLDER: &str = ".";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// 默认配置文档（`template` 命令输出）
pub fn default_document() -> Value {
    json!({
        "general": {
            "out_folder": DEFAULT_OUT_FOLDER,
            "logging": { "level": DEFAULT_LOG_LEVEL },
        }
    })
}

/// 为文档补齐默认值
///
/// 缺少 `general`，或文档根、`general` 不是对象时保持原样（由校验器报告）
pub fn fill_defaults(document: &mut Value) {
    let Some(general) = document
        .as_object_mut()
        .and_then(|root| root.get_mut("general"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    general
        .entry("out_folder")
        .or_insert_with(|| Value::String(DEFAULT_OUT_FOLDER.to_string()));
    let logging = general
        .entry("logging")
        .or_insert_with(|| json!({ "level": DEFAULT_LOG_LEVEL }));
    if let Some(logging) = logging.as_object_mut() {
        logging
            .entry("level")
            .or_insert_with(|| Value::String(DEFAULT_LOG_LEVEL.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_defaults_on_empty_general() {
        let mut doc = json!({ "general": {} });
        fill_defaults(&mut doc);
        assert_eq!(doc, default_document());
    }

    #[test]
    fn test_fill_defaults_inside_empty_logging() {
        let mut doc = json!({ "general": { "logging": {} } });
        fill_defaults(&mut doc);
        assert_eq!(doc, default_document());

        let mut doc = json!({ "general": { "logging": { "filename": "run.log" } } });
        fill_defaults(&mut doc);
        assert_eq!(doc["general"]["logging"]["level"], "INFO");
        assert_eq!(doc["general"]["logging"]["filename"], "run.log");
    }

    #[test]
    fn test_defaults_match_rule_table() {
        use crate::schema::rules::{Literal, GENERAL, LOGGING};
        assert_eq!(GENERAL.default_for("out_folder"), Some(Literal::Str(DEFAULT_OUT_FOLDER)));
        assert_eq!(LOGGING.default_for("level"), Some(Literal::Str(DEFAULT_LOG_LEVEL)));
    }

    #[test]
    fn test_fill_defaults_keeps_existing_values() {
        let mut doc = json!({
            "general": {
                "out_folder": "results",
                "logging": { "level": "DEBUG", "filename": "run.log" }
            }
        });
        let before = doc.clone();
        fill_defaults(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_fill_defaults_ignores_non_object_root() {
        let mut doc = json!(["general"]);
        fill_defaults(&mut doc);
        assert_eq!(doc, json!(["general"]));

        let mut doc = json!({ "general": 3 });
        fill_defaults(&mut doc);
        assert_eq!(doc, json!({ "general": 3 }));

        let mut doc = json!({ "grid": {} });
        fill_defaults(&mut doc);
        assert_eq!(doc, json!({ "grid": {} }));
    }
}
