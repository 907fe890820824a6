use anyhow::{Context, Result};
use autolinker_core::{
    autolink, link_dir_and_write, load_options, tag_options, AttrValue, AutolinkOptions, BatchOptions,
    LinkMode, LinkTextStyle,
};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "autolinker", version, about = "Turn URLs and email addresses in text or HTML into links")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 链接单个文件（默认 stdin → stdout）
    Link {
        /// 输入文件；缺省读取 stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// 输出文件；缺省写到 stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        link: LinkArgs,
    },
    /// 链接目录下的所有文件并生成 report.json
    Batch {
        /// 输入目录（只处理第一层文件）
        #[arg(long)]
        input: PathBuf,

        /// 输出目录（同名文件）
        #[arg(long)]
        output_dir: PathBuf,

        /// 报告文件（JSON 数组）
        #[arg(long, default_value = "./report.json")]
        report: PathBuf,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大处理文件大小（单位字节）
        #[arg(long)]
        max_file_size: Option<u64>,

        #[command(flatten)]
        link: LinkArgs,
    },
}

/// 两个子命令共用的链接参数；命令行参数覆盖配置文件
#[derive(Args, Debug)]
struct LinkArgs {
    /// 配置文件路径（TOML）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 链接模式
    #[arg(long, value_parser = ["all", "urls", "email_addresses"])]
    mode: Option<String>,

    /// 允许不含点的短域名（仅 URL）
    #[arg(long)]
    short_domains: bool,

    /// 跳过标签，逗号分隔
    #[arg(long, value_delimiter = ',')]
    skip_tags: Option<Vec<String>>,

    /// 链接属性 KEY=VALUE；只写 KEY 表示布尔属性
    #[arg(long = "attr")]
    attrs: Vec<String>,

    /// 显示文本原样输出，不做 HTML 转义
    #[arg(long)]
    verbatim: bool,
}

impl LinkArgs {
    fn into_options(self) -> Result<AutolinkOptions> {
        let mut opts = match &self.config {
            Some(path) => load_options(path)?,
            None => AutolinkOptions::default(),
        };
        if let Some(mode) = self.mode {
            opts.mode = mode.parse::<LinkMode>()?;
        }
        if self.short_domains {
            opts.short_domains = true;
        }
        if let Some(tags) = self.skip_tags {
            opts.skip_tags = tags.into_iter().filter(|t| !t.is_empty()).collect();
        }
        if !self.attrs.is_empty() {
            opts.link_attr = tag_options(&parse_attrs(&self.attrs));
        }
        if self.verbatim {
            opts.link_text = LinkTextStyle::Verbatim;
        }
        Ok(opts)
    }
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Link { input, output, link } => {
            let opts = link.into_options()?;

            let text = match &input {
                Some(path) => std::fs::read(path).with_context(|| format!("read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf).context("read stdin")?;
                    buf
                }
            };

            let linked = autolink(&text, &opts).context("autolink failed")?;

            match &output {
                Some(path) => {
                    let mut out = BufWriter::new(File::create(path).context("create output file")?);
                    out.write_all(&linked.output)?;
                    out.flush()?;
                }
                None => {
                    let mut out = io::stdout().lock();
                    out.write_all(&linked.output)?;
                    out.flush()?;
                }
            }

            info!(links = linked.link_count, bytes = text.len(), "link finished");
        }
        Commands::Batch { input, output_dir, report, threads, max_file_size, link } => {
            info!(?input, ?output_dir, "starting batch");

            let opts = BatchOptions { autolink: link.into_options()?, max_file_size, threads: parse_threads(&threads) };

            // 以缓冲方式打开报告文件，按 JSON 数组流式写入
            let mut out = BufWriter::new(File::create(&report).context("create report file")?);
            let stats = link_dir_and_write(&input, &output_dir, &mut out, &opts).context("batch link failed")?;
            out.flush()?;

            info!(
                files_linked = stats.files_linked,
                files_skipped = stats.files_skipped,
                links_total = stats.links_total,
                "batch finished"
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，stdout 留给链接结果
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") {
        return None;
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

/// 解析 `--attr` 参数：`KEY=VALUE` 为文本属性，单独的 `KEY` 为布尔属性
fn parse_attrs(items: &[String]) -> BTreeMap<String, AttrValue> {
    items
        .iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) => (key.to_string(), AttrValue::Text(value.to_string())),
            None => (item.to_string(), AttrValue::Flag(true)),
        })
        .collect()
}
