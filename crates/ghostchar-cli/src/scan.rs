//! 扫描主流程与并行调度
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::inputs::{decode_text, read_source, Source};
use crate::render::{Renderer, ScannedInput};

/// 运行统计（便于日志打印与退出码判断）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RunStats {
    pub inputs_scanned: usize,
    pub inputs_skipped: usize,
    pub inputs_flagged: usize,
    pub hidden_total: usize,
}

impl RunStats {
    fn record(&mut self, scanned: Option<&ScannedInput>) {
        match scanned {
            Some(s) => {
                self.inputs_scanned += 1;
                self.hidden_total += s.report.total();
                if !s.report.is_clean() { self.inputs_flagged += 1; }
            }
            None => self.inputs_skipped += 1,
        }
    }
}

/// 读取并扫描单个输入；读取失败、超限或严格解码失败时返回 None（记录日志后跳过）
fn scan_source(source: &Source, settings: &Settings) -> Option<ScannedInput> {
    let bytes = match read_source(source, settings.max_file_size) {
        Ok(Some(b)) => b,
        Ok(None) => return None,
        Err(err) => {
            warn!(source = %source, error = %format!("{err:#}"), "skipping input");
            return None;
        }
    };
    let report = match ghostchar_core::scan_with(settings.engine, &bytes) {
        Ok(r) => r,
        Err(err) => {
            warn!(source = %source, engine = %settings.engine, %err, "skipping undecodable input");
            return None;
        }
    };
    let text = decode_text(settings.engine, &bytes);
    debug!(source = %source, total = report.total(), "scanned");
    Some(ScannedInput::new(source.to_string(), text, report))
}

/// 扫描全部输入并按输入顺序渲染到 `out`
/// - 多个文件且线程数 > 1 时走并行调度；标准输入始终在当前线程读取
pub(crate) fn scan_and_render(sources: &[Source], out: &mut dyn Write, settings: &Settings) -> Result<RunStats> {
    let threads = settings.threads.unwrap_or_else(num_cpus::get);
    let has_stdin = sources.iter().any(|s| matches!(s, Source::Stdin));
    let use_parallel = threads > 1 && sources.len() > 1 && !has_stdin;

    let mut renderer = Renderer::new(settings.format);
    let mut stats = RunStats::default();
    renderer.begin(out)?;

    if use_parallel {
        scan_parallel(sources, out, settings, &mut renderer, &mut stats, threads)?;
    } else {
        for source in sources {
            let scanned = scan_source(source, settings);
            stats.record(scanned.as_ref());
            if let Some(s) = scanned { renderer.item(out, &s)?; }
        }
    }

    renderer.end(out)?;
    Ok(stats)
}

/// 并行调度：
/// - 后台线程内创建 Rayon 线程池并行扫描
/// - 当前线程作为 Writer，按 idx 重排后流式输出，保证稳定顺序
fn scan_parallel(
    sources: &[Source],
    out: &mut dyn Write,
    settings: &Settings,
    renderer: &mut Renderer,
    stats: &mut RunStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    type Msg = (usize, Option<ScannedInput>);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let indexed: Vec<(usize, Source)> = sources.iter().cloned().enumerate().collect();
    let worker_settings = settings.clone();

    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            indexed.par_iter().for_each(|(idx, source)| {
                let _ = tx.send((*idx, scan_source(source, &worker_settings)));
            });
        });
        // tx 在此处被丢弃，Receiver 随后收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, Option<ScannedInput>> = BTreeMap::new();
    let mut write_result = Ok(());

    while let Ok((idx, scanned)) = rx.recv() {
        buffer.insert(idx, scanned);
        while let Some(scanned) = buffer.remove(&next_idx) {
            stats.record(scanned.as_ref());
            // 写出失败后继续排空通道，避免阻塞扫描线程
            if let Some(s) = &scanned {
                if write_result.is_ok() { write_result = renderer.item(out, s); }
            }
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() {
        anyhow::bail!("scan worker panicked");
    }
    write_result
}
