use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use uistrings_core::{convert_files, ConvertError, ConvertMode, ConvertOptions};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "ui-strings", version, about = "将 key,value CSV 转换为 #define 定义文件与纯文本字符串表")]
struct Cli {
    /// 输入 CSV（每行 key,value，无表头）
    #[arg(long)]
    input: PathBuf,

    /// 定义文件输出路径（#define KEY "VALUE"）
    #[arg(long)]
    output_defs: PathBuf,

    /// 文本文件输出路径（每行一个字符串）
    #[arg(long)]
    output_text: PathBuf,

    /// 将 value 视为十六进制 Unicode 码点
    #[arg(long)]
    unicode_hex: bool,

    /// 输出 debug 级别日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let mode = if self.unicode_hex { ConvertMode::UnicodeHex } else { ConvertMode::Literal };
        ConvertOptions::with_mode(mode)
    }
}

fn main() -> Result<()> {
    // 参数缺失时 clap 直接退出，不会触碰文件系统
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(input = ?cli.input, defs = ?cli.output_defs, text = ?cli.output_text, "starting conversion");

    let stats = convert_files(&cli.input, &cli.output_defs, &cli.output_text, &cli.options())
        .map_err(|e| {
            log_failure(&e);
            e
        })
        .with_context(|| format!("convert {}", cli.input.display()))?;

    info!(records = stats.records_read, "conversion finished");
    Ok(())
}

fn log_failure(err: &ConvertError) {
    error!(category = ?err.category(), "{err}");
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // RUST_LOG 优先；否则按 --verbose 选择 debug/info
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
