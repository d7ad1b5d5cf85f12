//! 扫描入口
//!
//! 所有入口都是纯函数：单遍遍历、每个码位 O(1)，每次调用生成新的 Report，
//! 不读取任何外部状态，可在多个线程中并发调用。
use crate::engine_bytes::scan_raw;
use crate::engine_utf16::{scan_le_bytes, scan_units};
use crate::engine_utf8::scan_str;
use crate::findings::ReportBuilder;
use crate::options::{DecodeError, ScanEngine};
use crate::types::Report;

/// 扫描 UTF-8 文本，空字符串返回空报告
pub fn scan(text: &str) -> Report {
    scan_str(ReportBuilder::new(), text).finish()
}

/// 扫描可能缺省的文本；`None` 视为空文本
pub fn scan_opt(text: Option<&str>) -> Report {
    scan(text.unwrap_or_default())
}

/// 扫描 UTF-16 码元序列（允许孤立代理项）
pub fn scan_utf16(units: &[u16]) -> Report {
    scan_units(ReportBuilder::new(), units).finish()
}

/// 扫描原始字节（非法 UTF-8 按 U+FFFD 计）
pub fn scan_bytes(bytes: &[u8]) -> Report {
    scan_raw(ReportBuilder::new(), bytes).finish()
}

/// 按指定引擎解释字节后扫描
/// - Utf8 为严格模式：含非法序列时返回 `DecodeError`，不产生报告
/// - Bytes 与 Utf16Le 总能成功（非法部分按 U+FFFD 或代理项自身数值计）
pub fn scan_with(engine: ScanEngine, bytes: &[u8]) -> Result<Report, DecodeError> {
    let builder = ReportBuilder::new();
    let builder = match engine {
        ScanEngine::Utf8 => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| DecodeError::InvalidUtf8 { valid_up_to: e.valid_up_to() })?;
            scan_str(builder, text)
        }
        ScanEngine::Bytes => scan_raw(builder, bytes),
        ScanEngine::Utf16Le => scan_le_bytes(builder, bytes),
    };
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_surrogate_takes_one_position() {
        // 'a', 孤立高代理, ZWSP
        let report = scan_utf16(&[0x61, 0xD800, 0x200B]);
        assert_eq!(report.total(), 1);
        assert_eq!(report.matches()[0].position, 2);
    }

    #[test]
    fn surrogate_pair_is_one_codepoint() {
        // 😀 = D83D DE00
        let report = scan_utf16(&[0xD83D, 0xDE00, 0xFEFF]);
        assert_eq!(report.total(), 1);
        assert_eq!(report.matches()[0].position, 1);
        assert_eq!(report.matches()[0].label, "U+FEFF");
    }

    #[test]
    fn invalid_utf8_becomes_one_replacement_position() {
        let report = scan_bytes(b"a\xff\xfe\xe2\x80\x8b");
        // a, FFFD, FFFD, ZWSP
        assert_eq!(report.total(), 1);
        assert_eq!(report.matches()[0].position, 3);
    }

    #[test]
    fn truncated_tail_is_tolerated() {
        let report = scan_bytes(b"\xe2\x80\x8bx\xe2\x80");
        assert_eq!(report.total(), 1);
        assert_eq!(report.matches()[0].position, 0);
    }

    #[test]
    fn utf16le_bytes_engine() {
        let bytes: Vec<u8> = "a\u{200B}b".encode_utf16().flat_map(u16::to_le_bytes).collect();
        let report = scan_with(ScanEngine::Utf16Le, &bytes).unwrap();
        assert_eq!(report.total(), 1);
        assert_eq!(report.matches()[0].position, 1);

        let mut odd = bytes.clone();
        odd.push(0x00);
        assert_eq!(scan_with(ScanEngine::Utf16Le, &odd), Ok(report));
    }

    #[test]
    fn utf8_engine_rejects_invalid_input() {
        let bytes = b"ok\xff\xe2\x80\x8b";
        assert_eq!(
            scan_with(ScanEngine::Utf8, bytes),
            Err(DecodeError::InvalidUtf8 { valid_up_to: 2 })
        );
        let lossy = scan_with(ScanEngine::Bytes, bytes).unwrap();
        assert_eq!(lossy.total(), 1);
        assert_eq!(lossy.matches()[0].position, 3);
    }

    #[test]
    fn utf8_engine_matches_scan_on_valid_input() {
        let text = "café\u{00A0}latte\n\u{200B}";
        assert_eq!(scan_with(ScanEngine::Utf8, text.as_bytes()), Ok(scan(text)));
        assert_eq!(scan_with(ScanEngine::Bytes, text.as_bytes()), Ok(scan(text)));
    }

    #[test]
    fn none_is_empty_text() {
        assert_eq!(scan_opt(None), Report::empty());
        assert_eq!(scan_opt(Some("\u{00A0}")).total(), 1);
    }
}
