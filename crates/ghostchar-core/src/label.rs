//! 码位展示标签（"U+XXXX"）

/// 生成码位的展示标签：`U+` + 大写十六进制，至少补齐 4 位
/// - 超过 4 位时原样输出，不截断（例如 U+1F600）
pub fn label(cp: u32) -> String {
    format!("U+{:04X}", cp)
}
