//! 单条记录的渲染：定义行 + 文本行
use crate::error::{ConvertError, Result};
use crate::options::ConvertMode;
use crate::types::{RenderedEntry, StringEntry};

/// 文本输出中需要去掉的两字符转义序列（反斜杠 + n）
const ESCAPED_NEWLINE: &str = "\\n";

/// 按模式渲染一条记录
pub fn render_entry(entry: &StringEntry, mode: ConvertMode) -> Result<RenderedEntry> {
    if entry.value.contains(['\n', '\r']) {
        return Err(ConvertError::EmbeddedLineBreak { line: entry.line, key: entry.key.clone() });
    }
    match mode {
        ConvertMode::Literal => Ok(render_literal(entry)),
        ConvertMode::UnicodeHex => render_unicode_hex(entry),
    }
}

fn render_literal(entry: &StringEntry) -> RenderedEntry {
    RenderedEntry {
        define: format!("#define {} \"{}\"", entry.key, entry.value),
        text: strip_literal(&entry.value),
    }
}

/// 定义行复用原始十六进制数字，不做重新编码
fn render_unicode_hex(entry: &StringEntry) -> Result<RenderedEntry> {
    let ch = decode_code_point(entry)?;
    Ok(RenderedEntry {
        define: format!("#define {} \"\\u{}\"", entry.key, entry.value),
        text: ch.to_string(),
    })
}

/// 文本输出用：去首尾空白，再删除所有 `\n` 转义
pub fn strip_literal(value: &str) -> String {
    value.trim().replace(ESCAPED_NEWLINE, "")
}

fn decode_code_point(entry: &StringEntry) -> Result<char> {
    let digits = entry.value.as_str();
    // from_str_radix 接受前导 '+'，这里只放行纯十六进制数字
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid_hex(entry));
    }
    let cp = u32::from_str_radix(digits, 16).map_err(|_| invalid_hex(entry))?;
    char::from_u32(cp).ok_or_else(|| ConvertError::InvalidCodePoint {
        line: entry.line,
        key: entry.key.clone(),
        value: entry.value.clone(),
    })
}

fn invalid_hex(entry: &StringEntry) -> ConvertError {
    ConvertError::InvalidHex { line: entry.line, key: entry.key.clone(), value: entry.value.clone() }
}
