//! 最小化的 CSV 读写工具
//!
//! 写入遵循 RFC 4180：字段含分隔符、引号或换行时加引号，行尾为 `\r\n`

use std::io::{self, Write};
use std::mem::take;

/// 行终止符
pub const LINE_TERMINATOR: &str = "\r\n";

/// 可导出为 CSV 行的记录
///
/// 同一批记录的字段集合必须一致，表头取第一条记录的字段名
pub trait CsvRecord {
    /// 字段名（按定义顺序）
    fn field_names(&self) -> &'static [&'static str];

    /// 按字段顺序输出的单元格
    fn to_row(&self) -> Vec<String>;
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// 写入一行
pub fn write_row<W, S>(w: &mut W, row: &[S], sep: char) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "{}", LINE_TERMINATOR)
}

/// 写入表头和全部记录，空集合不写任何内容
pub fn write_records<W, R>(w: &mut W, records: &[R], sep: char) -> io::Result<usize>
where
    W: Write,
    R: CsvRecord,
{
    let Some(first) = records.first() else {
        return Ok(0);
    };

    write_row(w, first.field_names(), sep)?;
    for record in records {
        write_row(w, &record.to_row(), sep)?;
    }
    Ok(records.len())
}

/// 解析 CSV 文本（支持引号转义和 CRLF）
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // 文件末尾没有换行时补上最后一行
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
