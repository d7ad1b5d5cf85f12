//! 输入收集与读取（标准输入 / 文件 / 目录）
use anyhow::{Context, Result};
use ghostchar_core::ScanEngine;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 单个待扫描输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Source {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// 展开命令行路径
/// - 无路径或 "-" 表示标准输入
/// - 目录递归遍历，仅收集普通文件，并按路径排序保证输出顺序稳定
pub(crate) fn collect_sources(paths: &[PathBuf]) -> Result<Vec<Source>> {
    if paths.is_empty() {
        return Ok(vec![Source::Stdin]);
    }

    let mut sources = Vec::new();
    for path in paths {
        if path.as_os_str() == "-" {
            sources.push(Source::Stdin);
            continue;
        }
        let md = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
        if md.is_dir() {
            sources.extend(walk_dir(path).into_iter().map(Source::File));
        } else {
            sources.push(Source::File(path.clone()));
        }
    }
    Ok(sources)
}

fn walk_dir(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    debug!(root = %root.display(), files = files.len(), "walked directory");
    files
}

/// 读取输入的原始字节；超过大小上限返回 None
pub(crate) fn read_source(source: &Source, max_size: Option<u64>) -> Result<Option<Vec<u8>>> {
    match source {
        Source::Stdin => read_bounded(std::io::stdin().lock(), max_size),
        Source::File(path) => {
            if let Some(max) = max_size {
                let md = std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
                if md.len() > max {
                    warn!(path = %path.display(), size = md.len(), max, "file exceeds max file size, skipped");
                    return Ok(None);
                }
            }
            let buf = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
            Ok(Some(buf))
        }
    }
}

/// 从流中最多读取 max + 1 字节；多出的那一个字节说明超限，直接跳过
pub(crate) fn read_bounded<R: Read>(reader: R, max_size: Option<u64>) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    match max_size {
        Some(max) => {
            reader
                .take(max.saturating_add(1))
                .read_to_end(&mut buf)
                .context("read stdin")?;
            if buf.len() as u64 > max {
                warn!(max, "stdin exceeds max file size, skipped");
                return Ok(None);
            }
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut buf).context("read stdin")?;
        }
    }
    Ok(Some(buf))
}

/// 将原始字节按引擎解码为可渲染文本
/// - 与核心扫描的码位序列一一对应：非法序列与孤立代理项均替换为 U+FFFD，位置数不变
/// - Utf8 引擎只会对已通过严格校验的字节调用，此时与原文完全一致
pub(crate) fn decode_text(engine: ScanEngine, bytes: &[u8]) -> String {
    match engine {
        ScanEngine::Utf8 | ScanEngine::Bytes => String::from_utf8_lossy(bytes).into_owned(),
        ScanEngine::Utf16Le => {
            let chunks = bytes.chunks_exact(2);
            let odd_tail = !chunks.remainder().is_empty();
            let units = chunks.map(|c| u16::from_le_bytes([c[0], c[1]]));
            let mut text: String = char::decode_utf16(units)
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            if odd_tail {
                text.push(char::REPLACEMENT_CHARACTER);
            }
            text
        }
    }
}
