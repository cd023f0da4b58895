// ==========================================
// 分析配置校验器 - 领域类型定义
// ==========================================
// 职责: 日志级别、筛选类型、坐标系等枚举
// 序列化格式: 与配置文件中的字面量一致
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ==========================================
// 日志级别 (Logging Level)
// ==========================================
// 字面量集合: CRITICAL, 50, ERROR, 40, WARNING, 30, INFO, 20, DEBUG, 10, NOTSET
// 名称只匹配字符串，数值只匹配数字；NOTSET 没有数值写法
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "String")]
pub enum LogLevel {
    NotSet,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// 全部允许的字面量（用于违规信息中的"允许集合"）
    pub const LITERALS: [&'static str; 11] = [
        "CRITICAL", "50", "ERROR", "40", "WARNING", "30", "INFO", "20", "DEBUG", "10", "NOTSET",
    ];

    /// 从配置文件中的字面量解析
    ///
    /// # 返回
    /// - Some(LogLevel): 字面量属于允许集合
    /// - None: 不属于（包括 "50" 这种字符串形式的数字）
    pub fn from_literal(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => match s.as_str() {
                "CRITICAL" => Some(LogLevel::Critical),
                "ERROR" => Some(LogLevel::Error),
                "WARNING" => Some(LogLevel::Warning),
                "INFO" => Some(LogLevel::Info),
                "DEBUG" => Some(LogLevel::Debug),
                "NOTSET" => Some(LogLevel::NotSet),
                _ => None,
            },
            Value::Number(n) => {
                // JSON-Schema 的 enum 比较中 50 与 50.0 视为相等
                let numeric = n.as_f64()?;
                if numeric.fract() != 0.0 {
                    return None;
                }
                match numeric as i64 {
                    50 => Some(LogLevel::Critical),
                    40 => Some(LogLevel::Error),
                    30 => Some(LogLevel::Warning),
                    20 => Some(LogLevel::Info),
                    10 => Some(LogLevel::Debug),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// 规范名称
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::NotSet => "NOTSET",
        }
    }

    /// 映射到 tracing 的级别过滤指令
    ///
    /// tracing 没有 CRITICAL，归并到 error；NOTSET 表示不过滤，对应 trace
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Critical | LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::NotSet => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<Value> for LogLevel {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, String> {
        LogLevel::from_literal(&value).ok_or_else(|| format!("无效的日志级别: {}", value))
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

// ==========================================
// 观测筛选类型 (Filter Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    SkyCircle,
    AngleBox,
    QuantityBox,
    ParBox,
    Ids,
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        FilterType::SkyCircle,
        FilterType::AngleBox,
        FilterType::QuantityBox,
        FilterType::ParBox,
        FilterType::Ids,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::SkyCircle => "sky_circle",
            FilterType::AngleBox => "angle_box",
            FilterType::QuantityBox => "quantity_box",
            FilterType::ParBox => "par_box",
            FilterType::Ids => "ids",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// 对该筛选类型有意义的字段
    ///
    /// 这里只描述语义，不作为校验规则：其它字段出现时仅记录警告
    pub fn meaningful_fields(&self) -> &'static [&'static str] {
        match self {
            FilterType::SkyCircle => &["frame", "lon", "lat", "radius", "border"],
            FilterType::AngleBox | FilterType::QuantityBox | FilterType::ParBox => {
                &["variable", "value_range"]
            }
            FilterType::Ids => &["obs_ids"],
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 天球坐标系 (Sky Frame)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyFrame {
    Galactic,
    Equatorial,
    Icrs,
    Fk5,
}

impl SkyFrame {
    pub const ALL: [SkyFrame; 4] = [
        SkyFrame::Galactic,
        SkyFrame::Equatorial,
        SkyFrame::Icrs,
        SkyFrame::Fk5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkyFrame::Galactic => "galactic",
            SkyFrame::Equatorial => "equatorial",
            SkyFrame::Icrs => "icrs",
            SkyFrame::Fk5 => "fk5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for SkyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 违规类型 (Violation Kind)
// ==========================================
// 结构违规: 缺少必填键、出现未知键、类型或数组长度不符
// 取值违规: 标量不在枚举集合中
// 依赖违规: 跨字段约束（filemode 依赖 filename）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    Structural,
    Value,
    Dependency,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Structural => write!(f, "STRUCTURAL"),
            ViolationKind::Value => write!(f, "VALUE"),
            ViolationKind::Dependency => write!(f, "DEPENDENCY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_level_literals() {
        assert_eq!(LogLevel::from_literal(&json!("INFO")), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_literal(&json!(50)), Some(LogLevel::Critical));
        assert_eq!(LogLevel::from_literal(&json!(10.0)), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_literal(&json!("NOTSET")), Some(LogLevel::NotSet));

        // 字符串形式的数字不属于集合
        assert_eq!(LogLevel::from_literal(&json!("50")), None);
        // NOTSET 没有数值写法
        assert_eq!(LogLevel::from_literal(&json!(0)), None);
        assert_eq!(LogLevel::from_literal(&json!("info")), None);
        assert_eq!(LogLevel::from_literal(&json!(20.5)), None);
        assert_eq!(LogLevel::from_literal(&json!(true)), None);
    }

    #[test]
    fn test_log_level_serde() {
        let level: LogLevel = serde_json::from_value(json!(30)).unwrap();
        assert_eq!(level, LogLevel::Warning);
        assert_eq!(serde_json::to_value(level).unwrap(), json!("WARNING"));
        assert!(serde_json::from_value::<LogLevel>(json!("VERBOSE")).is_err());
    }

    #[test]
    fn test_filter_type_roundtrip_names() {
        for t in FilterType::ALL {
            assert_eq!(FilterType::parse(t.as_str()), Some(t));
        }
        assert_eq!(FilterType::parse("cone"), None);
        assert!(FilterType::SkyCircle.meaningful_fields().contains(&"radius"));
        assert_eq!(FilterType::Ids.meaningful_fields(), &["obs_ids"]);
    }

    #[test]
    fn test_sky_frame_parse() {
        assert_eq!(SkyFrame::parse("icrs"), Some(SkyFrame::Icrs));
        assert_eq!(SkyFrame::parse("ICRS"), None);
    }
}
