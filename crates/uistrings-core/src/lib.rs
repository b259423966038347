//! UI 字符串表转换库
//!
//! 将 `key,value` 形式的 CSV 转换为两份生成文件：
//! - 定义文件：每条记录一行 `#define KEY "VALUE"`
//! - 文本文件：每条记录一行解码/清理后的字符串
//!
//! 两份输出的行数都等于输入记录数，且第 i 行对应第 i 条记录。

mod convert;
mod error;
mod options;
mod reader;
mod render;
mod types;

pub use convert::{convert, convert_files};
pub use error::{ConvertError, ErrorCategory, Result};
pub use options::{ConvertMode, ConvertOptions, ConvertStats};
pub use reader::{read_entries, EntryReader};
pub use render::{render_entry, strip_literal};
pub use types::{RenderedEntry, StringEntry};
