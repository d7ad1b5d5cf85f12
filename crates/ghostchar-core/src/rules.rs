//! 可疑码位规则表（固定、只读）
//!
//! 规则由若干互不相交的闭区间组成，按起点升序排列，查询走二分查找。
//! 规则本身是纯函数：对 0..=0x10FFFF 以及孤立代理项（0xD800..=0xDFFF）均有定义。
use std::cmp::Ordering;

/// 换行符：虽落在 C0 区间内，但扫描时作为换行信号处理，不计入结果
pub const NEWLINE_EXCEPTION: u32 = 0x0A;

/// 单条闭区间规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointRange {
    pub start: u32,
    pub end: u32,
    pub name: &'static str,
}

impl CodepointRange {
    const fn new(start: u32, end: u32, name: &'static str) -> Self {
        Self { start, end, name }
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.end
    }
}

/// 可疑码位区间（闭区间，升序，互不相交）
pub const SUSPICIOUS_RANGES: &[CodepointRange] = &[
    CodepointRange::new(0x0000, 0x001F, "C0 controls"),
    CodepointRange::new(0x007F, 0x009F, "DEL + C1 controls"),
    CodepointRange::new(0x00A0, 0x00A0, "no-break space"),
    CodepointRange::new(0x00AD, 0x00AD, "soft hyphen"),
    CodepointRange::new(0x061C, 0x061C, "Arabic letter mark"),
    CodepointRange::new(0x180E, 0x180E, "Mongolian vowel separator"),
    CodepointRange::new(0x2000, 0x200F, "spaces, zero-width, direction marks"),
    CodepointRange::new(0x2028, 0x202F, "line/paragraph separators, bidi embedding"),
    CodepointRange::new(0x205F, 0x205F, "medium mathematical space"),
    CodepointRange::new(0x2060, 0x206F, "word joiner, invisible operators"),
    CodepointRange::new(0x3000, 0x3000, "ideographic space"),
    CodepointRange::new(0xFE0F, 0xFE0F, "variation selector-16"),
    CodepointRange::new(0xFEFF, 0xFEFF, "zero-width no-break space / BOM"),
];

/// 查找码位所在的规则区间
pub fn find_range(cp: u32) -> Option<&'static CodepointRange> {
    SUSPICIOUS_RANGES
        .binary_search_by(|r| {
            if r.end < cp {
                Ordering::Less
            } else if r.start > cp {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .ok()
        .map(|idx| &SUSPICIOUS_RANGES[idx])
}

/// 纯区间判定（不含换行例外）
pub fn in_suspicious_range(cp: u32) -> bool {
    find_range(cp).is_some()
}

/// 是否为需要报告的可疑码位
/// - 区间命中且不是换行例外（U+000A）
pub fn is_suspicious(cp: u32) -> bool {
    cp != NEWLINE_EXCEPTION && in_suspicious_range(cp)
}
