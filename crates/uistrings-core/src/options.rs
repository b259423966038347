//! 转换选项与统计信息（模块）

/// 值字段的解释方式
/// - Literal：值按原样作为字符串常量；文本输出去掉首尾空白与 `\n` 转义
/// - UnicodeHex：值为十六进制 Unicode 码点；定义输出写 `\u` 转义，文本输出写解码后的字符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvertMode {
    #[default]
    Literal,
    UnicodeHex,
}

/// 转换选项
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub mode: ConvertMode,
}

impl ConvertOptions {
    pub fn with_mode(mode: ConvertMode) -> Self {
        Self { mode }
    }
}

/// 转换统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    pub records_read: usize,
    pub defs_written: usize,
    pub text_written: usize,
}
