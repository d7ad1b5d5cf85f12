//! 隐藏字符检测核心库
//!
//! 设计要点：
//! - 规则为固定的码位闭区间表（见 `rules`），换行符 U+000A 是唯一的具名例外。
//! - 按 Unicode 标量值遍历输入，位置以码位计数，代理对不会被拆分或重复计数。
//! - 扫描是全函数：任何输入（含空串）都返回 Report，不存在错误通道；
//!   只有严格 UTF-8 解码（`scan_with` + `ScanEngine::Utf8`）会拒绝非法字节。
//! - Report 是单一事实来源，汇总视图与高亮视图都由它推导。

mod options;
mod types;
mod findings;
mod label;
mod rules;
mod engine_bytes;
mod engine_utf8;
mod engine_utf16;
mod scan;

pub use options::{DecodeError, ParseEngineError, ScanEngine};
pub use types::{LabelCount, Match, Report, Segment};
pub use label::label;
pub use rules::{find_range, in_suspicious_range, is_suspicious, CodepointRange, NEWLINE_EXCEPTION, SUSPICIOUS_RANGES};
pub use scan::{scan, scan_bytes, scan_opt, scan_utf16, scan_with};
