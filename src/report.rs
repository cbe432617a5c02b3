use std::io::Write;

use anyhow::Result;

use crate::error::ReportError;
use crate::record::Record;

const SEPARATOR: &str = "-------------";

/// 打印查询结果表格，记录必须已经附加日期
pub fn write_report<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    let first = records
        .first()
        .ok_or(ReportError::EmptyRecords("report"))?;

    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Requested days reported for {}", first.display_name())?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "{:30}{:15}{:15}", "Date", "New Cases", "New Deaths")?;
    for record in records {
        writeln!(out, "{}", format_row(record)?)?;
    }
    Ok(())
}

/// 单行: 日期 30 列，病例与死亡各 15 列，左对齐
pub fn format_row(record: &Record) -> Result<String, ReportError> {
    let date = record.attached_date()?.format("%A, %B %d, %Y").to_string();
    Ok(format!(
        "{:30}{:<15}{:<15}",
        date,
        with_thousands(record.cases),
        with_thousands(record.deaths)
    ))
}

/// 千位分隔: 1234567 -> "1,234,567"
pub fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
