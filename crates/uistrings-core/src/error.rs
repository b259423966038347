//! 错误类型与分类
use std::path::PathBuf;
use thiserror::Error;

/// 转换过程中的全部错误；任何一个都会中止本次运行
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 2 fields (key,value), found {fields}")]
    MalformedRow { line: u64, fields: usize },

    #[error("line {line}: value {value:?} of {key} is not a hexadecimal code point (only bare hex digits 0-9, a-f, A-F are allowed; no sign, prefix or whitespace)")]
    InvalidHex { line: u64, key: String, value: String },

    #[error("line {line}: U+{value} of {key} is not a Unicode scalar value")]
    InvalidCodePoint { line: u64, key: String, value: String },

    #[error("line {line}: value of {key} contains a raw line break")]
    EmbeddedLineBreak { line: u64, key: String },
}

/// 错误大类（用于 CLI 诊断输出）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 输入不可读或输出不可写
    Io,
    /// 行字段数不对、十六进制无法解析等
    MalformedInput,
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } => ErrorCategory::Io,
            Self::Csv(e) if e.is_io_error() => ErrorCategory::Io,
            _ => ErrorCategory::MalformedInput,
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        self.category() == ErrorCategory::MalformedInput
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
