// ==========================================
// 分析配置校验器 - 配置覆写合并
// ==========================================
// 规则: 对象逐键递归合并；序列与标量整体替换
// ==========================================

use serde_json::Value;

/// 将 overlay 深度合并到 base
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let nested = overlay_value.is_object()
                    && base_map.get(key).map(Value::is_object).unwrap_or(false);
                if nested {
                    if let Some(existing) = base_map.get_mut(key) {
                        deep_merge(existing, overlay_value);
                    }
                } else {
                    base_map.insert(key.clone(), overlay_value.clone());
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
