//! 字节级扫描引擎（容忍非法 UTF-8）
use crate::engine_utf8::scan_str;
use crate::findings::ReportBuilder;

const REPLACEMENT: u32 = 0xFFFD;

/// 扫描原始字节
/// - 合法 UTF-8 片段正常解码
/// - 每段最长非法字节序列按一个 U+FFFD 计（与 `String::from_utf8_lossy` 一致），占一个位置
pub(crate) fn scan_raw(mut builder: ReportBuilder, bytes: &[u8]) -> ReportBuilder {
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => return scan_str(builder, text),
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // valid 段已由 from_utf8 校验过
                builder = scan_str(builder, std::str::from_utf8(valid).unwrap_or_default());
                builder.push(REPLACEMENT);
                match e.error_len() {
                    Some(n) => rest = &after[n..],
                    // 末尾截断的多字节序列
                    None => return builder,
                }
            }
        }
    }
}
