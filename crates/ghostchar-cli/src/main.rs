use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

mod config;
mod inputs;
mod render;
mod scan;

use config::{load_config, OutputFormat, Overrides, Settings};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "ghostchar", version, about = "Detect hidden, invisible and control Unicode characters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描文件、目录或标准输入中的隐藏字符
    Scan {
        /// 输入路径（文件或目录）；省略或 "-" 表示标准输入
        paths: Vec<PathBuf>,

        /// 输出格式
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// 解码方式：bytes、utf8 或 utf16le（默认 bytes）
        #[arg(long, value_parser = ["bytes", "utf8", "utf16le"])]
        engine: Option<String>,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long)]
        threads: Option<String>,

        /// 最大扫描文件大小（单位字节），超过则跳过
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 配置文件路径（TOML），默认 ./ghostchar.toml
        #[arg(long)]
        config: Option<PathBuf>,

        /// 发现隐藏字符时以状态码 1 退出
        #[arg(long, overrides_with = "no_fail_on_found")]
        fail_on_found: bool,

        /// 关闭配置文件中的 fail_on_found
        #[arg(long, overrides_with = "fail_on_found")]
        no_fail_on_found: bool,
    },
}

fn main() -> Result<ExitCode> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            paths,
            format,
            engine,
            threads,
            max_file_size,
            config,
            fail_on_found,
            no_fail_on_found,
        } => {
            let file = load_config(config.as_deref())?;
            let fail_on_found = flag_pair(fail_on_found, no_fail_on_found);
            let overrides = Overrides { format, engine, threads, max_file_size, fail_on_found };
            let settings = Settings::resolve(file, overrides).context("resolve settings")?;
            let sources = inputs::collect_sources(&paths)?;
            info!(inputs = sources.len(), engine = %settings.engine, "starting scan");

            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let stats = scan::scan_and_render(&sources, &mut out, &settings).context("scan and render failed")?;
            out.flush().context("flush output")?;

            info!(
                inputs_scanned = stats.inputs_scanned,
                inputs_skipped = stats.inputs_skipped,
                inputs_flagged = stats.inputs_flagged,
                hidden_total = stats.hidden_total,
                "scan finished"
            );

            if settings.fail_on_found && stats.inputs_flagged > 0 {
                return Ok(ExitCode::from(1));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// 成对开关：只有显式给出其中一个时才覆盖配置文件
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 只输出报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
