// ==========================================
// 分析配置校验器 - 加载层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 加载层错误类型
#[derive(Error, Debug)]
pub enum LoadError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .yaml/.yml/.json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 解析错误 =====
    #[error("文件编码错误（需要 UTF-8）: {0}")]
    EncodingError(String),

    #[error("YAML 解析失败: {0}")]
    YamlParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),
}

impl LoadError {
    /// 是否为文档内容解析失败（而非文件访问失败）
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            LoadError::EncodingError(_)
                | LoadError::YamlParseError(_)
                | LoadError::JsonParseError(_)
        )
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::FileReadError(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for LoadError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        LoadError::EncodingError(err.to_string())
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(err: serde_yaml::Error) -> Self {
        LoadError::YamlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;
