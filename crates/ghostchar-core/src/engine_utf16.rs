//! UTF-16 码元扫描引擎（兼容孤立代理项）
use crate::findings::ReportBuilder;

/// 按码位遍历 UTF-16 码元序列
/// - 合法代理对解码为一个码位，只占一个位置
/// - 孤立代理项按其自身数值（0xD800..=0xDFFF）参与分类，同样占一个位置
pub(crate) fn scan_units(builder: ReportBuilder, units: &[u16]) -> ReportBuilder {
    let cps = char::decode_utf16(units.iter().copied()).map(|r| match r {
        Ok(ch) => u32::from(ch),
        Err(e) => u32::from(e.unpaired_surrogate()),
    });
    builder.extend(cps)
}

/// 将小端字节流按 UTF-16LE 解释；末尾多出的单字节按 U+FFFD 计
pub(crate) fn scan_le_bytes(builder: ReportBuilder, bytes: &[u8]) -> ReportBuilder {
    let chunks = bytes.chunks_exact(2);
    let odd_tail = !chunks.remainder().is_empty();
    let units: Vec<u16> = chunks.map(|c| u16::from_le_bytes([c[0], c[1]])).collect();

    let builder = scan_units(builder, &units);
    if odd_tail {
        builder.extend([u32::from(char::REPLACEMENT_CHARACTER)])
    } else {
        builder
    }
}
