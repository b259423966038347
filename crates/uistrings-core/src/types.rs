//! 公共类型（对外暴露）
use serde::Deserialize;

/// 输入 CSV 的一条记录：`key,value`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StringEntry {
    pub key: String,
    pub value: String,
    /// 记录起始所在的物理行号（从 1 开始），仅用于诊断
    #[serde(skip)]
    pub line: u64,
}

impl StringEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), line: 0 }
    }
}

/// 单条记录渲染后的两行输出（不含行结束符）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    /// 定义文件中的一行：`#define KEY "..."`
    pub define: String,
    /// 文本文件中的一行
    pub text: String,
}
