// ==========================================
// 分析配置校验器 - 配置文档校验入口
// ==========================================
// 职责: 以根规则校验完整配置文档，生成校验报告
// 特性: 纯函数，不做 I/O，可重复、可并发调用
// ==========================================

use crate::domain::report::ValidationReport;
use crate::schema::rules::{ObjectRule, ROOT};
use crate::validator::checker::Checker;
use serde_json::Value;

/// 配置文档校验器
pub struct ConfigValidator {
    root: &'static ObjectRule,
}

impl ConfigValidator {
    /// 使用高级分析接口的配置规则创建校验器
    pub fn new() -> Self {
        Self { root: &ROOT }
    }

    /// 使用自定义根规则创建校验器
    pub fn with_rule(root: &'static ObjectRule) -> Self {
        Self { root }
    }

    /// 校验配置文档
    ///
    /// # 返回
    /// - ValidationReport: valid=true 时违规列表为空；否则每个被违反的约束至少一条
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut checker = Checker::new();
        checker.check_root(document, self.root);
        let report = ValidationReport::from_violations(checker.into_violations());

        if report.is_valid() {
            tracing::debug!("配置文档校验通过");
        } else {
            tracing::debug!(violations = report.len(), "配置文档校验未通过");
        }

        report
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认规则校验配置文档
pub fn validate(document: &Value) -> ValidationReport {
    ConfigValidator::new().validate(document)
}
