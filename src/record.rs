use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::ReportError;

/// ECDC 数据集的顶层结构
#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
}

/// 某个国家某一天的病例 / 死亡数据
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "geoId")]
    pub country_code: String,
    #[serde(rename = "countriesAndTerritories")]
    pub country_name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: i32,
    #[serde(deserialize_with = "string_or_number")]
    pub month: u32,
    #[serde(deserialize_with = "string_or_number")]
    pub day: u32,
    // 数据源中偶尔会出现负数修正值，原样保留
    #[serde(deserialize_with = "string_or_number")]
    pub cases: i64,
    #[serde(deserialize_with = "string_or_number")]
    pub deaths: i64,
    /// 由 `attach_dates` 填充
    #[serde(skip)]
    pub date: Option<NaiveDate>,
}

impl Record {
    pub fn new(
        country_code: impl Into<String>,
        country_name: impl Into<String>,
        (year, month, day): (i32, u32, u32),
        cases: i64,
        deaths: i64,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
            year,
            month,
            day,
            cases,
            deaths,
            date: None,
        }
    }

    /// 排序用的 (年, 月, 日) 组合键
    pub fn date_key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// 根据 year / month / day 计算日期，非法日期返回错误
    pub fn calendar_date(&self) -> Result<NaiveDate, ReportError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or(ReportError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }

    /// 已附加的日期，没有经过 `attach_dates` 时返回错误
    pub fn attached_date(&self) -> Result<NaiveDate, ReportError> {
        self.date.ok_or_else(|| ReportError::MissingDate {
            country: self.country_name.clone(),
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }

    /// 展示用的国家名，下划线替换为空格
    pub fn display_name(&self) -> String {
        self.country_name.replace('_', " ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

// 数据集里的数字字段有时是字符串 ("cases": "123")，有时是数字
fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    };
    raw.trim().parse::<T>().map_err(serde::de::Error::custom)
}
