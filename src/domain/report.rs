// ==========================================
// 分析配置校验器 - 校验报告
// ==========================================
// 职责: 字段路径、违规明细、校验报告与人类可读汇总
// ==========================================

use crate::domain::types::ViolationKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

// ==========================================
// FieldPath - 字段路径
// ==========================================

/// 路径片段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// 违规字段在文档中的位置，例如 `observations.filter[1].value_range`
///
/// 空路径表示文档根
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub const ROOT_DISPLAY: &'static str = "<root>";

    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", Self::ROOT_DISPLAY);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// ==========================================
// Violation - 违规明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,        // 违规字段路径
    pub kind: ViolationKind,    // 违规类型
    pub message: String,        // 违规描述
}

impl Violation {
    pub fn structural(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            kind: ViolationKind::Structural,
            message: message.into(),
        }
    }

    pub fn value(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            kind: ViolationKind::Value,
            message: message.into(),
        }
    }

    pub fn dependency(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            kind: ViolationKind::Dependency,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
    }
}

// ==========================================
// ValidationReport - 校验报告
// ==========================================

/// 一次校验的完整结果
///
/// 违规按文档遍历顺序排列；`valid` 与 `violations.is_empty()` 一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// 文档无法解析时的报告：仅一条根路径违规
    pub fn unparsable(reason: impl fmt::Display) -> Self {
        Self::from_violations(vec![Violation::structural(
            FieldPath::root(),
            format!("document could not be parsed: {}", reason),
        )])
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// 查找指定路径上的违规
    pub fn violations_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations
            .iter()
            .filter(move |v| v.path.to_string() == path)
    }

    /// 人类可读汇总，列出全部违规
    pub fn summary(&self) -> String {
        if self.valid {
            return "configuration is valid".to_string();
        }
        let mut out = format!(
            "configuration is invalid ({} violation{}):",
            self.violations.len(),
            if self.violations.len() == 1 { "" } else { "s" }
        );
        for violation in &self.violations {
            out.push_str("\n  - ");
            out.push_str(&violation.to_string());
        }
        out
    }

    /// 附带来源与时间戳的报告封装（CLI JSON 输出）
    pub fn with_source(&self, source: impl Into<String>) -> SourcedReport<'_> {
        SourcedReport {
            source: source.into(),
            checked_at: Utc::now(),
            counts: self.counts(),
            report: self,
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// 带来源信息的报告
#[derive(Debug, Serialize)]
pub struct SourcedReport<'a> {
    pub source: String,
    pub checked_at: DateTime<Utc>,
    pub counts: ViolationCounts,
    #[serde(flatten)]
    pub report: &'a ValidationReport,
}

/// 违规统计（按类型）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViolationCounts {
    pub structural: usize,
    pub value: usize,
    pub dependency: usize,
}

impl ValidationReport {
    pub fn counts(&self) -> ViolationCounts {
        let mut counts = ViolationCounts::default();
        for v in &self.violations {
            match v.kind {
                ViolationKind::Structural => counts.structural += 1,
                ViolationKind::Value => counts.value += 1,
                ViolationKind::Dependency => counts.dependency += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        let root = FieldPath::root();
        assert_eq!(root.to_string(), "<root>");
        assert!(root.is_root());

        let path = root.key("observations").key("filter").index(1).key("value_range");
        assert_eq!(path.to_string(), "observations.filter[1].value_range");
        assert_eq!(path.segments().len(), 4);
    }

    #[test]
    fn test_report_summary_lists_every_violation() {
        let report = ValidationReport::from_violations(vec![
            Violation::structural(FieldPath::root(), "missing required property: general"),
            Violation::dependency(
                FieldPath::root().key("general").key("logging"),
                "'filemode' requires 'filename' to be present",
            ),
        ]);
        assert!(!report.is_valid());
        let summary = report.summary();
        assert!(summary.contains("2 violations"));
        assert!(summary.contains("missing required property: general"));
        assert!(summary.contains("general.logging"));

        let counts = report.counts();
        assert_eq!(counts.structural, 1);
        assert_eq!(counts.dependency, 1);

        let at_logging: Vec<_> = report.violations_at("general.logging").collect();
        assert_eq!(at_logging.len(), 1);
        assert_eq!(at_logging[0].kind, ViolationKind::Dependency);
        assert_eq!(report.violations_at("<root>").count(), 1);
    }

    #[test]
    fn test_unparsable_report_has_single_root_violation() {
        let report = ValidationReport::unparsable("unexpected end of stream");
        assert_eq!(report.len(), 1);
        assert!(report.violations[0].path.is_root());
        assert_eq!(report.violations[0].kind, ViolationKind::Structural);
    }

    #[test]
    fn test_report_serialization() {
        let report = ValidationReport::from_violations(vec![Violation::value(
            FieldPath::root().key("general").key("logging").key("level"),
            "value \"LOUD\" is not one of [...]",
        )]);
        let json = serde_json::to_value(report.with_source("config.yaml")).unwrap();
        assert_eq!(json["source"], "config.yaml");
        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["path"], "general.logging.level");
        assert_eq!(json["violations"][0]["kind"], "VALUE");
        assert_eq!(json["counts"], serde_json::json!({ "structural": 0, "value": 1, "dependency": 0 }));
    }
}
