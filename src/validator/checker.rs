// ==========================================
// 分析配置校验器 - 结构检查器
// ==========================================
// 职责: 按规则表递归遍历文档，收集全部违规
// 约束: 单次遍历，无状态，不在首个违规处停止
// ==========================================

use crate::domain::config::integral_i64;
use crate::domain::report::{FieldPath, Violation};
use crate::schema::rules::{FieldRule, Literal, ObjectRule};
use serde_json::{Map, Value};

/// 文档值的 JSON 类型名
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if is_integer_number(n) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// draft-07: 小数部分为零的数即为整数
fn is_integer_number(n: &serde_json::Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
}

fn literal_matches(literal: &Literal, value: &Value) -> bool {
    match (literal, value) {
        (Literal::Str(expected), Value::String(actual)) => expected == actual,
        (Literal::Int(expected), Value::Number(actual)) => actual
            .as_f64()
            .map(|f| f == *expected as f64)
            .unwrap_or(false),
        _ => false,
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(_) | Value::Object(_) => json_type_name(value).to_string(),
        other => other.to_string(),
    }
}

fn describe_literals(literals: &[Literal]) -> String {
    let names: Vec<String> = literals.iter().map(|l| l.to_string()).collect();
    format!("[{}]", names.join(", "))
}

// ==========================================
// Checker - 结构检查器
// ==========================================
pub struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// 按对象规则检查文档根
    pub fn check_root(&mut self, document: &Value, rule: &ObjectRule) {
        self.check_object_value(document, rule, &FieldPath::root());
    }

    fn check_object_value(&mut self, value: &Value, rule: &ObjectRule, path: &FieldPath) {
        match value.as_object() {
            Some(map) => self.check_object(map, rule, path),
            None => self.type_mismatch(path, "object", value),
        }
    }

    fn check_object(&mut self, map: &Map<String, Value>, rule: &ObjectRule, path: &FieldPath) {
        // 必填键（带默认值的键缺省时由默认值补齐，不报告）
        for required in rule.enforced_required() {
            if !map.contains_key(required) {
                self.violations.push(Violation::structural(
                    path.clone(),
                    format!("missing required property: {}", required),
                ));
            }
        }

        // 按文档顺序检查每个键
        for (key, value) in map {
            match rule.property(key) {
                Some(field) => self.check_field(value, field, &path.key(key)),
                None if !rule.additional_properties => {
                    self.violations.push(Violation::structural(
                        path.clone(),
                        format!("additional property not allowed: {}", key),
                    ));
                }
                None => {}
            }
        }

        // 依赖约束
        for (key, needs) in rule.dependencies {
            if !map.contains_key(*key) {
                continue;
            }
            for needed in needs.iter() {
                if !map.contains_key(*needed) {
                    self.violations.push(Violation::dependency(
                        path.key(key),
                        format!("'{}' requires '{}' to be present", key, needed),
                    ));
                }
            }
        }
    }

    fn check_field(&mut self, value: &Value, field: &FieldRule, path: &FieldPath) {
        match field {
            FieldRule::AnyObject => {
                if !value.is_object() {
                    self.type_mismatch(path, "object", value);
                }
            }
            FieldRule::String => {
                if !value.is_string() {
                    self.type_mismatch(path, "string", value);
                }
            }
            FieldRule::Number => {
                if !value.is_number() {
                    self.type_mismatch(path, "number", value);
                }
            }
            FieldRule::Integer => match value {
                Value::Number(n) if is_integer_number(n) => {
                    if integral_i64(n).is_none() {
                        self.violations.push(Violation::value(
                            path.clone(),
                            format!("integer {} is out of range for a 64-bit signed integer", n),
                        ));
                    }
                }
                _ => self.type_mismatch(path, "integer", value),
            },
            FieldRule::StringOrNumber => {
                if !(value.is_string() || value.is_number()) {
                    self.type_mismatch(path, "string or number", value);
                }
            }
            FieldRule::Enum(literals) => {
                if !literals.iter().any(|l| literal_matches(l, value)) {
                    self.violations.push(Violation::value(
                        path.clone(),
                        format!(
                            "value {} is not one of {}",
                            describe_value(value),
                            describe_literals(literals)
                        ),
                    ));
                }
            }
            FieldRule::Array {
                items,
                min_items,
                max_items,
            } => self.check_array(value, items, *min_items, *max_items, path),
            FieldRule::Object(rule) => self.check_object_value(value, rule, path),
        }
    }

    fn check_array(
        &mut self,
        value: &Value,
        items: &FieldRule,
        min_items: Option<usize>,
        max_items: Option<usize>,
        path: &FieldPath,
    ) {
        let Some(elements) = value.as_array() else {
            self.type_mismatch(path, "array", value);
            return;
        };

        let len = elements.len();
        let length_message = match (min_items, max_items) {
            (Some(min), Some(max)) if min == max && len != min => Some(format!(
                "array length mismatch: expected exactly {} items, found {}",
                min, len
            )),
            (Some(min), _) if len < min => Some(format!(
                "array length mismatch: expected at least {} items, found {}",
                min, len
            )),
            (_, Some(max)) if len > max => Some(format!(
                "array length mismatch: expected at most {} items, found {}",
                max, len
            )),
            _ => None,
        };
        if let Some(message) = length_message {
            self.violations
                .push(Violation::structural(path.clone(), message));
        }

        for (index, element) in elements.iter().enumerate() {
            self.check_field(element, items, &path.index(index));
        }
    }

    fn type_mismatch(&mut self, path: &FieldPath, expected: &str, found: &Value) {
        self.violations.push(Violation::structural(
            path.clone(),
            format!("expected {}, found {}", expected, json_type_name(found)),
        ));
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}
