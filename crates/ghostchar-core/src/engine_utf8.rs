//! UTF-8 字符串扫描引擎
use crate::findings::ReportBuilder;

/// 按 Unicode 标量值遍历 `&str`
/// - Rust 字符串不含孤立代理项，这是该入口的前提
pub(crate) fn scan_str(builder: ReportBuilder, text: &str) -> ReportBuilder {
    builder.extend(text.chars().map(u32::from))
}
