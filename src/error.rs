use thiserror::Error;

/// 查询与报表过程中的领域错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid calendar date: year {year}, month {month}, day {day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("no records to {0}")]
    EmptyRecords(&'static str),
    #[error("record for {country} ({year}-{month}-{day}) has no date attached")]
    MissingDate {
        country: String,
        year: i32,
        month: u32,
        day: u32,
    },
    #[error("unsupported data source '{0}', only http/https/file are supported")]
    UnsupportedSource(String),
}
