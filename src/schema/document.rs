// ==========================================
// 分析配置校验器 - JSON-Schema 文档
// ==========================================
// 职责: 将规则表渲染为 JSON-Schema (draft-07) 文档，供外部工具使用
// 说明: $schema / title 仅为元数据
// ==========================================

use crate::schema::defaults::DEFAULT_LOG_LEVEL;
use crate::schema::rules::{FieldRule, Literal, ObjectRule, ROOT};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-07/schema#";
pub const SCHEMA_TITLE: &str = "Schema for the config file of the high-level interface";

static SCHEMA_DOCUMENT: OnceLock<Value> = OnceLock::new();

/// 配置文档的 JSON-Schema（进程内只构建一次）
pub fn schema_document() -> &'static Value {
    SCHEMA_DOCUMENT.get_or_init(build_schema_document)
}

fn build_schema_document() -> Value {
    let mut definitions = Map::new();
    let mut root = render_object(&ROOT, &mut definitions);

    if let Some(obj) = root.as_object_mut() {
        let mut head = Map::new();
        head.insert("$schema".to_string(), json!(SCHEMA_DIALECT));
        head.insert("title".to_string(), json!(SCHEMA_TITLE));
        head.extend(std::mem::take(obj));
        head.insert("definitions".to_string(), Value::Object(definitions));
        *obj = head;
    }

    apply_documented_defaults(&mut root);
    root
}

/// 渲染对象规则；带定义名的对象登记到 definitions 并以 $ref 引用
fn render_object(rule: &ObjectRule, definitions: &mut Map<String, Value>) -> Value {
    let mut properties = Map::new();
    for (name, field) in rule.properties {
        let mut rendered = render_field(field, definitions);
        if let (Some(literal), Some(obj)) = (rule.default_for(name), rendered.as_object_mut()) {
            obj.insert("default".to_string(), literal_value(&literal));
        }
        properties.insert((*name).to_string(), rendered);
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert(
        "additionalProperties".to_string(),
        json!(rule.additional_properties),
    );
    schema.insert("properties".to_string(), Value::Object(properties));
    let required: Vec<&str> = rule.enforced_required().collect();
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    if !rule.dependencies.is_empty() {
        let deps: Map<String, Value> = rule
            .dependencies
            .iter()
            .map(|(key, needs)| ((*key).to_string(), json!(needs)))
            .collect();
        schema.insert("dependencies".to_string(), Value::Object(deps));
    }
    Value::Object(schema)
}

fn render_field(field: &FieldRule, definitions: &mut Map<String, Value>) -> Value {
    match field {
        FieldRule::AnyObject => json!({ "type": "object" }),
        FieldRule::String => json!({ "type": "string" }),
        FieldRule::Number => json!({ "type": "number" }),
        FieldRule::Integer => json!({
            "type": "integer",
            "minimum": i64::MIN,
            "maximum": i64::MAX,
        }),
        FieldRule::StringOrNumber => json!({ "type": ["string", "number"] }),
        FieldRule::Enum(literals) => {
            let values: Vec<Value> = literals.iter().map(literal_value).collect();
            json!({ "enum": values })
        }
        FieldRule::Array {
            items,
            min_items,
            max_items,
        } => {
            let mut schema = Map::new();
            schema.insert("type".to_string(), json!("array"));
            schema.insert("items".to_string(), render_field(items, definitions));
            if let Some(min) = min_items {
                schema.insert("minItems".to_string(), json!(min));
            }
            if let Some(max) = max_items {
                schema.insert("maxItems".to_string(), json!(max));
            }
            Value::Object(schema)
        }
        FieldRule::Object(rule) => match rule.definition {
            Some(name) => {
                if !definitions.contains_key(name) {
                    let rendered = render_object(rule, definitions);
                    definitions.insert(name.to_string(), rendered);
                }
                json!({ "$ref": format!("#/definitions/{}", name) })
            }
            None => render_object(rule, definitions),
        },
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Str(s) => json!(s),
        Literal::Int(i) => json!(i),
    }
}

/// general.logging 整体缺省时的 default（对象默认值无法写入规则表）
fn apply_documented_defaults(root: &mut Value) {
    root["properties"]["general"]["properties"]["logging"]["default"] =
        json!({ "level": DEFAULT_LOG_LEVEL });
}
