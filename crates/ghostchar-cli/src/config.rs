//! 配置文件加载（TOML）与命令行参数合并
use anyhow::{Context, Result};
use clap::ValueEnum;
use ghostchar_core::ScanEngine;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 未指定 --config 时尝试读取的默认路径
pub(crate) const DEFAULT_CONFIG_PATH: &str = "./ghostchar.toml";

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// 线程数配置：整数或 "auto"
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ThreadsSetting {
    Count(usize),
    Named(String),
}

/// 配置文件结构（所有键均可省略，未知键报错）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub threads: Option<ThreadsSetting>,
    #[serde(default)]
    pub max_file_size: Option<u64>,
    #[serde(default)]
    pub fail_on_found: Option<bool>,
}

/// 命令行上显式给出的覆盖项
#[derive(Debug, Clone, Default)]
pub(crate) struct Overrides {
    pub format: Option<OutputFormat>,
    pub engine: Option<String>,
    pub threads: Option<String>,
    pub max_file_size: Option<u64>,
    /// Some(true)=--fail-on-found，Some(false)=--no-fail-on-found
    pub fail_on_found: Option<bool>,
}

/// 合并后的最终设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub format: OutputFormat,
    pub engine: ScanEngine,
    /// None 表示自动（等于 CPU 核数）
    pub threads: Option<usize>,
    pub max_file_size: Option<u64>,
    pub fail_on_found: bool,
}

/// 读取配置文件
/// - 显式路径必须存在
/// - 未指定时读取默认路径，不存在则使用空配置
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !p.is_file() {
                return Ok(FileConfig::default());
            }
            p
        }
    };
    let txt = std::fs::read_to_string(&path)
        .with_context(|| format!("read config file {}", path.display()))?;
    parse_config(&txt).with_context(|| format!("parse config file {}", path.display()))
}

pub(crate) fn parse_config(txt: &str) -> Result<FileConfig> {
    Ok(toml::from_str(txt)?)
}

impl Settings {
    /// 命令行优先，其次配置文件，最后默认值
    pub(crate) fn resolve(file: FileConfig, cli: Overrides) -> Result<Self> {
        let engine = match cli.engine.or(file.engine) {
            Some(s) => s.parse::<ScanEngine>()?,
            None => ScanEngine::default(),
        };
        let threads = match (cli.threads, file.threads) {
            (Some(s), _) => parse_threads(&s),
            (None, Some(ThreadsSetting::Count(n))) => (n >= 1).then_some(n),
            (None, Some(ThreadsSetting::Named(s))) => parse_threads(&s),
            (None, None) => None,
        };

        Ok(Self {
            format: cli.format.or(file.format).unwrap_or_default(),
            engine,
            threads,
            max_file_size: cli.max_file_size.or(file.max_file_size),
            fail_on_found: cli.fail_on_found.or(file.fail_on_found).unwrap_or(false),
        })
    }
}

/// 解析线程参数："auto" 或非法值表示自动
pub(crate) fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}
