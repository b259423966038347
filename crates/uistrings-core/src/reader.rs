//! CSV 记录读取
use std::io::Cursor;

use crate::error::{ConvertError, Result};
use crate::types::StringEntry;

/// 每条记录必须恰好包含的字段数
const FIELDS_PER_RECORD: usize = 2;

/// 以“无表头、逗号分隔”的方式读取 `key,value` 记录，保持输入顺序
/// - 允许不等长记录，由本模块给出带行号的 `MalformedRow`
/// - 空行视为 0 个字段的记录（csv 读取器会静默跳过，这里按原始字节检出）
/// - 输入末尾的单个行结束符不算空行
pub struct EntryReader {
    inner: csv::Reader<Cursor<Vec<u8>>>,
    record: csv::StringRecord,
    /// 已统计到的字节偏移与对应的行号（从 1 开始）
    scanned: usize,
    line: u64,
}

impl EntryReader {
    pub fn new(input: Vec<u8>) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(input));
        Self { inner, record: csv::StringRecord::new(), scanned: 0, line: 1 }
    }

    fn next_entry(&mut self) -> Result<Option<StringEntry>> {
        let prev_end = self.inner.position().byte() as usize;
        if !self.inner.read_record(&mut self.record)? {
            // 末尾除一个行结束符外再有换行，说明存在空行
            self.reject_blank_lines(prev_end)?;
            return Ok(None);
        }
        // 记录的起始位置在 csv 跳过空行之前
        let pos = self.record.position().map(|p| p.byte() as usize).unwrap_or(prev_end);
        let start = self.reject_blank_lines(pos)?;
        let line = self.line_at(start);

        if self.record.len() != FIELDS_PER_RECORD {
            return Err(ConvertError::MalformedRow { line, fields: self.record.len() });
        }
        let mut entry: StringEntry = self.record.deserialize(None)?;
        entry.line = line;
        Ok(Some(entry))
    }

    /// 从 `pos` 起跳过行结束符，得到记录内容的起始偏移
    /// 上一条记录内容与本条内容之间只允许一个换行（CRLF 算一个），多出的即空行
    fn reject_blank_lines(&mut self, pos: usize) -> Result<usize> {
        let raw = self.inner.get_ref().get_ref();
        let pos = pos.min(raw.len());
        let start = pos + raw[pos..].iter().take_while(|&&b| is_terminator(b)).count();
        let gap_from = raw[..start].iter().rposition(|&b| !is_terminator(b)).map_or(0, |i| i + 1);
        let (breaks, first_break_end) = count_line_breaks(&raw[gap_from..start]);

        // 文件开头没有上一条记录，不允许任何换行
        let allowed = if gap_from == 0 { 0 } else { 1 };
        if breaks > allowed {
            let blank_at = if gap_from == 0 { 0 } else { gap_from + first_break_end };
            return Err(ConvertError::MalformedRow { line: self.line_at(blank_at), fields: 0 });
        }
        Ok(start)
    }

    /// 字节偏移 `pos` 所在的物理行号；偏移单调递增，增量统计
    fn line_at(&mut self, pos: usize) -> u64 {
        let raw = self.inner.get_ref().get_ref();
        let end = pos.min(raw.len());
        if end > self.scanned {
            self.line += raw[self.scanned..end].iter().filter(|&&b| b == b'\n').count() as u64;
            self.scanned = end;
        }
        self.line
    }
}

fn is_terminator(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// 统计只含行结束符的片段中的换行数；返回 (换行数, 第一个换行之后的偏移)
fn count_line_breaks(gap: &[u8]) -> (usize, usize) {
    let mut breaks = 0;
    let mut first_end = 0;
    let mut i = 0;
    while i < gap.len() {
        i += if gap[i] == b'\r' && gap.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
        breaks += 1;
        if breaks == 1 {
            first_end = i;
        }
    }
    (breaks, first_end)
}

impl Iterator for EntryReader {
    type Item = Result<StringEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().transpose()
    }
}

/// 便捷入口：从已读入内存的输入构建记录迭代器
pub fn read_entries(input: impl Into<Vec<u8>>) -> EntryReader {
    EntryReader::new(input.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<StringEntry>> {
        read_entries(input).collect()
    }

    #[test]
    fn reads_pairs_in_order_with_line_numbers() {
        let entries = collect("A,alpha\nB,beta\nC,gamma\n").unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C"]);
        assert_eq!(entries[1].value, "beta");
        assert_eq!(entries[2].line, 3);
    }

    #[test]
    fn first_row_is_data_not_header() {
        let entries = collect("key,value\n").unwrap();
        assert_eq!(entries, vec![StringEntry { key: "key".into(), value: "value".into(), line: 1 }]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_backslashes() {
        let entries = collect("MSG,\"a, b\\nc\"\n").unwrap();
        assert_eq!(entries[0].value, "a, b\\nc");
    }

    #[test]
    fn single_field_row_is_malformed() {
        let err = collect("A,alpha\nBROKEN\n").unwrap_err();
        match err {
            ConvertError::MalformedRow { line, fields } => {
                assert_eq!(line, 2);
                assert_eq!(fields, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn three_field_row_is_malformed() {
        let err = collect("A,b,c\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { fields: 3, .. }));
    }

    #[test]
    fn interior_blank_line_is_a_row_without_fields() {
        let err = collect("A,a\n\nB,b\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 2, fields: 0 }), "{err:?}");
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_rejected() {
        let err = collect("\nA,a\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 1, fields: 0 }), "{err:?}");
        let err = collect("A,a\n\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 2, fields: 0 }), "{err:?}");
    }

    #[test]
    fn final_terminator_is_optional() {
        assert_eq!(collect("A,a\nB,b\n").unwrap().len(), 2);
        assert_eq!(collect("A,a\nB,b").unwrap().len(), 2);
    }

    #[test]
    fn crlf_input_is_accepted_and_blank_crlf_line_is_not() {
        let entries = collect("A,a\r\nB,b\r\n").unwrap();
        assert_eq!(entries[1].value, "b");
        assert_eq!(entries[1].line, 2);
        let err = collect("A,a\r\n\r\nB,b\r\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 2, fields: 0 }), "{err:?}");
    }

    #[test]
    fn line_numbers_account_for_quoted_newlines() {
        let err = collect("A,\"x\ny\"\nBROKEN\n").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedRow { line: 3, fields: 1 }), "{err:?}");
    }

    #[test]
    fn invalid_utf8_is_malformed_input() {
        let bytes: &[u8] = b"A,\xff\xfe\n";
        let err = read_entries(bytes).collect::<Result<Vec<_>>>().unwrap_err();
        assert!(err.is_malformed_input());
    }
}
