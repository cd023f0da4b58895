// ==========================================
// 分析配置校验器 - 分析配置
// ==========================================
// 职责: 校验 → 补齐默认值 → 转换为类型化模型
// 约束: 构造后只读；覆写生成新的实例并重新校验，原实例不变
// ==========================================

use crate::config::error::{SettingsError, SettingsResult};
use crate::config::merge::deep_merge;
use crate::domain::config::{
    AnalysisConfig, GeneralSettings, LoggingSettings, ObservationFilter,
};
use crate::domain::report::ValidationReport;
use crate::loader::{DocumentParser, UniversalParser, YamlParser};
use crate::schema::defaults::{default_document, fill_defaults, DEFAULT_OUT_FOLDER};
use crate::validator::ConfigValidator;
use serde_json::Value;
use std::path::Path;

// ==========================================
// AnalysisSettings - 已校验的分析配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    document: Value,        // 补齐默认值后的文档
    config: AnalysisConfig, // 类型化视图
}

impl AnalysisSettings {
    /// 从文档树构造
    ///
    /// # 返回
    /// - Ok(AnalysisSettings): 校验通过
    /// - Err(SettingsError::Invalid): 校验失败，携带全部违规
    pub fn from_value(document: Value) -> SettingsResult<Self> {
        let report = ConfigValidator::new().validate(&document);
        if !report.is_valid() {
            tracing::warn!(violations = report.len(), "配置未通过校验");
            return Err(SettingsError::Invalid(report));
        }

        let mut document = document;
        fill_defaults(&mut document);

        let config: AnalysisConfig = serde_json::from_value(document.clone())
            .map_err(|e| SettingsError::ConversionError(e.to_string()))?;

        warn_ignored_filter_fields(config.filters());

        tracing::info!(
            out_folder = %config.general.out_folder,
            level = %config.general.logging.level,
            filters = config.filters().len(),
            "配置加载完成"
        );

        Ok(Self { document, config })
    }

    /// 从 YAML（或 JSON）文本构造
    ///
    /// 文本无法解析时返回 Invalid，报告中仅含一条根路径违规
    pub fn from_yaml_str(text: &str) -> SettingsResult<Self> {
        match YamlParser.parse_str(text) {
            Ok(document) => Self::from_value(document),
            Err(err) => Err(SettingsError::Invalid(ValidationReport::unparsable(err))),
        }
    }

    /// 从文件构造（按扩展名选择解析器）
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        tracing::info!(path = %path.display(), "加载配置文件");
        match UniversalParser.parse_file(path) {
            Ok(document) => Self::from_value(document),
            Err(err) if err.is_parse_error() => {
                Err(SettingsError::Invalid(ValidationReport::unparsable(err)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// 默认配置
    pub fn template() -> Self {
        Self {
            document: default_document(),
            config: AnalysisConfig {
                general: GeneralSettings {
                    out_folder: DEFAULT_OUT_FOLDER.to_string(),
                    logging: LoggingSettings::default(),
                },
                observations: None,
                grid: None,
                model: None,
                analysis: None,
            },
        }
    }

    /// 以覆写文档更新配置
    ///
    /// # 返回
    /// - Ok(新配置): 合并后的文档通过校验
    /// - Err(SettingsError::Invalid): 合并后不合法，当前配置保持不变
    pub fn update(&self, overlay: &Value) -> SettingsResult<Self> {
        let mut merged = self.document.clone();
        deep_merge(&mut merged, overlay);
        tracing::debug!("应用配置覆写");
        Self::from_value(merged)
    }

    /// 以 YAML 覆写文本更新配置
    pub fn update_from_yaml(&self, text: &str) -> SettingsResult<Self> {
        let overlay = YamlParser
            .parse_str(text)
            .map_err(|err| SettingsError::Invalid(ValidationReport::unparsable(err)))?;
        self.update(&overlay)
    }

    // ===== 访问器 =====

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn general(&self) -> &GeneralSettings {
        &self.config.general
    }

    pub fn logging(&self) -> &LoggingSettings {
        &self.config.general.logging
    }

    pub fn out_folder(&self) -> &Path {
        Path::new(&self.config.general.out_folder)
    }

    pub fn filters(&self) -> &[ObservationFilter] {
        self.config.filters()
    }

    // ===== 导出 =====

    /// 有效配置的 YAML 文本
    pub fn to_yaml(&self) -> SettingsResult<String> {
        serde_yaml::to_string(&self.document)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))
    }

    /// 有效配置的 JSON 快照
    pub fn snapshot_json(&self) -> SettingsResult<String> {
        serde_json::to_string_pretty(&self.document)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::template()
    }
}

/// 对设置了与筛选类型无关字段的条件记录警告（不视为违规）
fn warn_ignored_filter_fields(filters: &[ObservationFilter]) {
    for (index, filter) in filters.iter().enumerate() {
        let ignored = filter.ignored_fields();
        if !ignored.is_empty() {
            tracing::warn!(
                index,
                filter_type = ?filter.filter_type(),
                fields = ?ignored,
                "筛选条件包含与其类型无关的字段，将被忽略"
            );
        }
    }
}
