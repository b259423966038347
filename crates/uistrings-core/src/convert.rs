//! 转换主流程：单次顺序遍历，逐条写出两份输出
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::{ConvertError, Result};
use crate::options::{ConvertOptions, ConvertStats};
use crate::reader::read_entries;
use crate::render::render_entry;

/// 从 `input` 读取记录，分别写入定义输出与文本输出
/// - 输出第 i 行对应输入第 i 条记录，每行以 `\n` 结尾
/// - 遇到第一个错误立即返回；此前已写入的行不做回滚
/// - 输入先整体读入内存（空行检测需要原始字节）
pub fn convert<R: Read>(
    mut input: R,
    defs_out: &mut dyn Write,
    text_out: &mut dyn Write,
    opts: &ConvertOptions,
) -> Result<ConvertStats> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw).map_err(|e| ConvertError::io("<input>", e))?;
    convert_inner(raw, defs_out, text_out, opts, &SinkNames::default())
}

/// 以文件路径为参数的转换入口
/// 先读取输入；输入不可读时不会创建任何输出文件
pub fn convert_files(
    input_path: &Path,
    defs_path: &Path,
    text_path: &Path,
    opts: &ConvertOptions,
) -> Result<ConvertStats> {
    let input = fs::read(input_path).map_err(|e| ConvertError::io(input_path, e))?;
    let mut defs = BufWriter::new(File::create(defs_path).map_err(|e| ConvertError::io(defs_path, e))?);
    let mut text = BufWriter::new(File::create(text_path).map_err(|e| ConvertError::io(text_path, e))?);
    debug!(?input_path, ?defs_path, ?text_path, mode = ?opts.mode, "opened files");

    let names = SinkNames { defs: defs_path, text: text_path };
    let stats = convert_inner(input, &mut defs, &mut text, opts, &names)?;

    defs.flush().map_err(|e| ConvertError::io(defs_path, e))?;
    text.flush().map_err(|e| ConvertError::io(text_path, e))?;
    Ok(stats)
}

/// 写错误时用于报告的输出名
struct SinkNames<'a> {
    defs: &'a Path,
    text: &'a Path,
}

impl Default for SinkNames<'_> {
    fn default() -> Self {
        Self { defs: Path::new("<defs>"), text: Path::new("<text>") }
    }
}

fn convert_inner(
    input: Vec<u8>,
    defs_out: &mut dyn Write,
    text_out: &mut dyn Write,
    opts: &ConvertOptions,
    names: &SinkNames<'_>,
) -> Result<ConvertStats> {
    let mut stats = ConvertStats::default();

    for entry in read_entries(input) {
        let entry = entry?;
        stats.records_read += 1;

        let rendered = render_entry(&entry, opts.mode)?;
        trace!(line = entry.line, key = %entry.key, "rendered entry");

        writeln!(defs_out, "{}", rendered.define).map_err(|e| ConvertError::io(names.defs, e))?;
        stats.defs_written += 1;
        writeln!(text_out, "{}", rendered.text).map_err(|e| ConvertError::io(names.text, e))?;
        stats.text_written += 1;
    }

    debug!(records = stats.records_read, mode = ?opts.mode, "string table converted");
    Ok(stats)
}
