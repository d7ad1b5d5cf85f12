//! 扫描引擎选择（模块）
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 输入解码方式
/// - Utf8：严格 UTF-8，遇到非法序列时拒绝整个输入
/// - Utf16Le：输入为 UTF-16LE 字节流，孤立代理项按自身数值分类
/// - Bytes：任意字节，非法 UTF-8 序列按 U+FFFD 计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanEngine {
    Utf8,
    Utf16Le,
    #[default]
    Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scan engine `{0}` (expected utf8, utf16le or bytes)")]
pub struct ParseEngineError(pub String);

/// 严格解码失败（仅 Utf8 引擎会产生）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 at byte offset {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
}

impl ScanEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanEngine::Utf8 => "utf8",
            ScanEngine::Utf16Le => "utf16le",
            ScanEngine::Bytes => "bytes",
        }
    }
}

impl FromStr for ScanEngine {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(ScanEngine::Utf8),
            "utf16le" | "utf-16le" => Ok(ScanEngine::Utf16Le),
            "bytes" => Ok(ScanEngine::Bytes),
            _ => Err(ParseEngineError(s.to_string())),
        }
    }
}

impl fmt::Display for ScanEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
