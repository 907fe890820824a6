//! 目录批处理与并行调度
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::engine::autolink;
use crate::options::{BatchOptions, BatchStats};
use crate::types::ReportItem;

/// 单文件处理结果（内部使用）
#[derive(Debug, Clone)]
struct FileReport {
    file: String,
    links: usize,
    bytes_in: usize,
    bytes_out: usize,
}

/// 对 `input_dir` 下的每个文件做自动链接，结果写入 `output_dir` 下的同名文件，
/// 并将处理报告以 JSON 数组流式写入 `report`。
///
/// 稳定性保证：文件按文件名排序，无论是否并行，报告顺序都与排序一致。
pub fn link_dir_and_write(
    input_dir: &Path,
    output_dir: &Path,
    report: &mut dyn Write,
    opts: &BatchOptions,
) -> Result<BatchStats> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let mut files: Vec<PathBuf> = vec![];
    // 只处理单层目录
    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "skip unreadable dir entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(files = files.len(), "collected input files");

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    let mut stats = BatchStats::default();

    if threads > 1 {
        link_and_write_parallel(files, output_dir, report, opts, &mut stats, threads)?;
        return Ok(stats);
    }

    // 串行路径
    write!(report, "[")?;
    let mut first = true;
    for path in files {
        let res = link_file(&path, output_dir, opts);
        record(&path, res, report, &mut first, &mut stats)?;
    }
    write!(report, "]")?;
    Ok(stats)
}

/// 处理单个文件；返回 `Ok(None)` 表示按大小限制跳过
fn link_file(path: &Path, output_dir: &Path, opts: &BatchOptions) -> Result<Option<FileReport>> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .with_context(|| format!("non UTF-8 file name {}", path.display()))?;

    if let Some(max) = opts.max_file_size {
        let md = std::fs::metadata(path)?;
        if md.len() > max {
            debug!(file = file_name, size = md.len(), "skip oversized file");
            return Ok(None);
        }
    }

    let text = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let linked = autolink(&text, &opts.autolink)?;
    let target = output_dir.join(file_name);
    std::fs::write(&target, &linked.output).with_context(|| format!("write {}", target.display()))?;

    debug!(file = file_name, links = linked.link_count, "linked file");
    Ok(Some(FileReport {
        file: file_name.to_string(),
        links: linked.link_count,
        bytes_in: text.len(),
        bytes_out: linked.output.len(),
    }))
}

/// 汇总单个文件的结果：成功则写出报告项，否则计入跳过
fn record(
    path: &Path,
    res: Result<Option<FileReport>>,
    report: &mut dyn Write,
    first: &mut bool,
    stats: &mut BatchStats,
) -> Result<()> {
    match res {
        Ok(Some(r)) => {
            stats.files_linked += 1;
            stats.links_total += r.links;
            if !*first {
                write!(report, ",")?;
            } else {
                *first = false;
            }
            let item = ReportItem { file: &r.file, links: r.links, bytes_in: r.bytes_in, bytes_out: r.bytes_out };
            serde_json::to_writer(&mut *report, &item)?;
        }
        Ok(None) => stats.files_skipped += 1,
        Err(err) => {
            warn!(path = %path.display(), error = %format!("{err:#}"), "skip file");
            stats.files_skipped += 1;
        }
    }
    Ok(())
}

/// 并行调度：
/// - Rayon 线程池并行处理文件（引擎无共享可变状态，可直接并发调用）
/// - 单线程 Writer 按 idx 重排并流式写 JSON，保证稳定顺序
fn link_and_write_parallel(
    files: Vec<PathBuf>,
    output_dir: &Path,
    report: &mut dyn Write,
    opts: &BatchOptions,
    stats: &mut BatchStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    write!(report, "[")?;
    let mut first = true;

    type Msg = (usize /*idx*/, Result<Option<FileReport>>);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("build rayon pool")?;

    // Writer 留在当前线程，扫描放到后台线程的线程池里
    let opts = Arc::new(opts.clone());
    let output_dir = output_dir.to_path_buf();
    let paths = files.clone();

    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            paths.par_iter().enumerate().for_each_with(tx, |tx, (idx, path)| {
                let res = link_file(path, &output_dir, &opts);
                let _ = tx.send((idx, res));
            });
        });
        // Sender 全部被丢弃后 Receiver 收到关闭信号
    });

    // Writer：维护 next_idx 与缓存，按序输出
    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, Result<Option<FileReport>>> = BTreeMap::new();

    while let Ok((idx, res)) = rx.recv() {
        buffer.insert(idx, res);
        while let Some(res) = buffer.remove(&next_idx) {
            record(&files[next_idx], res, report, &mut first, stats)?;
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() {
        anyhow::bail!("batch worker thread panicked");
    }

    write!(report, "]")?;
    Ok(())
}
