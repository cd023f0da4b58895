// ==========================================
// 分析配置校验器 - 文档解析器接口
// ==========================================
// 职责: 将 YAML / JSON 文本解析为内存中的文档树
// 文档树: serde_json::Value（映射、序列、标量）
// ==========================================

use crate::loader::error::{LoadError, LoadResult};
use serde_json::Value;
use std::path::Path;

/// 文档解析器
pub trait DocumentParser {
    /// 解析文本
    fn parse_str(&self, text: &str) -> LoadResult<Value>;

    /// 读取并解析文件
    ///
    /// # 返回
    /// - Err(LoadError::FileNotFound): 文件不存在
    /// - Err(LoadError::FileReadError): 读取失败
    /// - Err(LoadError::EncodingError): 内容不是 UTF-8（按解析失败处理）
    /// - Err(解析错误): 内容无法解析
    fn parse_file(&self, path: &Path) -> LoadResult<Value> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "读取配置文件");
        let text = String::from_utf8(bytes)?;
        self.parse_str(&text)
    }
}
