// ==========================================
// 分析配置校验器 - 配置文档类型化模型
// ==========================================
// 职责: 通过校验并补齐默认值后的配置文档的强类型表示
// 约束: 仅由 settings 层在校验通过后构造，构造后只读
// ==========================================

use crate::domain::types::{FilterType, LogLevel, SkyFrame};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

// ==========================================
// AnalysisConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub general: GeneralSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<ObservationsSettings>,
    // grid / model / analysis 不做进一步解释，原样保留
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Map<String, Value>>,
}

impl AnalysisConfig {
    /// 观测筛选条件（未配置时为空）
    pub fn filters(&self) -> &[ObservationFilter] {
        self.observations
            .as_ref()
            .map(|o| o.filter.as_slice())
            .unwrap_or(&[])
    }
}

// ==========================================
// GeneralSettings - 通用设置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_out_folder")]
    pub out_folder: String,
    #[serde(default)]
    pub logging: LoggingSettings,
}

pub fn default_out_folder() -> String {
    ".".to_string()
}

/// 日志参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filemode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datefmt: Option<String>,
}

// ==========================================
// ObservationsSettings - 观测选择
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_store: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<ObservationFilter>,
}

// ==========================================
// ObservationFilter - 观测筛选条件
// ==========================================
// filter_type 为判别键，各类型共享同一参数记录；判别键可以缺省
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter_type: Option<FilterType>,
    #[serde(flatten)]
    params: FilterParams,
}

impl ObservationFilter {
    pub fn new(filter_type: FilterType, params: FilterParams) -> Self {
        Self {
            filter_type: Some(filter_type),
            params,
        }
    }

    /// 未声明 filter_type 的筛选条件
    pub fn untyped(params: FilterParams) -> Self {
        Self {
            filter_type: None,
            params,
        }
    }

    pub fn filter_type(&self) -> Option<FilterType> {
        self.filter_type
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// 已设置但对本筛选类型没有意义的字段
    ///
    /// 未声明类型时无从判断，返回空
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let Some(filter_type) = self.filter_type else {
            return Vec::new();
        };
        let meaningful = filter_type.meaningful_fields();
        self.params
            .present_fields()
            .into_iter()
            .filter(|f| !meaningful.contains(f))
            .collect()
    }
}

/// 筛选参数
///
/// lon/lat/radius/border 接受数值或带单位的字符串（如 `"83.63 deg"`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<SkyFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_range: Option<[f64; 2]>,
    #[serde(
        default,
        deserialize_with = "deserialize_obs_ids",
        skip_serializing_if = "Option::is_none"
    )]
    pub obs_ids: Option<Vec<i64>>,
}

/// 数值的 64 位有符号整数形式
///
/// 小数部分为零的浮点数（如 `23523.0`）同样视为整数；超出 i64 范围时返回 None
pub fn integral_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn deserialize_obs_ids<'de, D>(deserializer: D) -> Result<Option<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(numbers) = Option::<Vec<Number>>::deserialize(deserializer)? else {
        return Ok(None);
    };
    numbers
        .iter()
        .map(|n| {
            integral_i64(n).ok_or_else(|| {
                <D::Error as de::Error>::custom(format!("观测编号不是 64 位整数: {}", n))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

impl FilterParams {
    fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.frame.is_some() {
            fields.push("frame");
        }
        if self.lon.is_some() {
            fields.push("lon");
        }
        if self.lat.is_some() {
            fields.push("lat");
        }
        if self.radius.is_some() {
            fields.push("radius");
        }
        if self.border.is_some() {
            fields.push("border");
        }
        if self.variable.is_some() {
            fields.push("variable");
        }
        if self.value_range.is_some() {
            fields.push("value_range");
        }
        if self.obs_ids.is_some() {
            fields.push("obs_ids");
        }
        fields
    }
}

/// 数值或文本标量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}
