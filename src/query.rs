use crate::error::ReportError;
use crate::record::Record;

/// 按两位国家代码 (geoId) 精确匹配，保持原有顺序
pub fn records_for_country(country_code: &str, records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.country_code == country_code)
        .cloned()
        .collect()
}

/// 按 (年, 月, 日) 升序排序后取最后 `num_days` 条
///
/// 排序是稳定的，日期相同的记录保持输入顺序。`num_days` 大于记录数时返回全部记录。
pub fn most_recent(num_days: usize, records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(Record::date_key);
    let start = sorted.len().saturating_sub(num_days);
    sorted.split_off(start)
}

/// 病例数最多的记录，并列时取第一条
pub fn max_cases(records: &[Record]) -> Result<&Record, ReportError> {
    first_max_by(records, |record| record.cases).ok_or(ReportError::EmptyRecords("find max cases"))
}

/// 死亡数最多的记录，并列时取第一条
pub fn max_deaths(records: &[Record]) -> Result<&Record, ReportError> {
    first_max_by(records, |record| record.deaths)
        .ok_or(ReportError::EmptyRecords("find max deaths"))
}

// Iterator::max_by_key 并列时返回最后一个，这里需要第一个
fn first_max_by(records: &[Record], key: impl Fn(&Record) -> i64) -> Option<&Record> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if key(current) >= key(record) => Some(current),
        _ => Some(record),
    })
}

/// 为每条记录附加日期，任何一条日期非法都会返回错误
pub fn attach_dates(records: &mut [Record]) -> Result<(), ReportError> {
    for record in records.iter_mut() {
        record.date = Some(record.calendar_date()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(code: &str, (year, month, day): (i32, u32, u32), cases: i64, deaths: i64) -> Record {
        Record::new(code, format!("{code}_land"), (year, month, day), cases, deaths)
    }

    fn sample() -> Vec<Record> {
        vec![
            record("US", (2020, 3, 2), 10, 1),
            record("MX", (2020, 3, 1), 5, 0),
            record("US", (2020, 2, 28), 3, 0),
            record("US", (2020, 3, 1), 7, 2),
            record("MX", (2020, 3, 2), 9, 4),
        ]
    }

    #[test]
    fn filters_by_exact_code_in_input_order() {
        let us = records_for_country("US", &sample());
        let keys: Vec<_> = us.iter().map(Record::date_key).collect();
        assert_eq!(keys, vec![(2020, 3, 2), (2020, 2, 28), (2020, 3, 1)]);
    }

    #[test]
    fn unknown_or_differently_cased_code_matches_nothing() {
        let records = sample();
        for code in ["XX", "us", "U", "USA", "", "exit"] {
            assert!(records_for_country(code, &records).is_empty(), "{code}");
        }
    }

    #[test]
    fn most_recent_returns_latest_ascending() {
        let us = records_for_country("US", &sample());
        let recent = most_recent(2, &us);
        let keys: Vec<_> = recent.iter().map(Record::date_key).collect();
        assert_eq!(keys, vec![(2020, 3, 1), (2020, 3, 2)]);
    }

    #[test]
    fn most_recent_sorts_across_months_and_years() {
        let records = vec![
            record("DE", (2021, 1, 1), 0, 0),
            record("DE", (2020, 12, 31), 0, 0),
            record("DE", (2020, 2, 10), 0, 0),
            record("DE", (2020, 10, 2), 0, 0),
        ];
        let keys: Vec<_> = most_recent(3, &records).iter().map(Record::date_key).collect();
        assert_eq!(keys, vec![(2020, 10, 2), (2020, 12, 31), (2021, 1, 1)]);
    }

    #[test]
    fn most_recent_with_oversized_window_returns_everything_sorted() {
        let us = records_for_country("US", &sample());
        for n in [3, 4, 100, usize::MAX] {
            let recent = most_recent(n, &us);
            assert_eq!(recent.len(), 3);
            assert!(recent.windows(2).all(|w| w[0].date_key() <= w[1].date_key()));
        }
    }

    #[test]
    fn most_recent_keeps_input_order_for_equal_dates() {
        let records = vec![
            record("IT", (2020, 5, 1), 1, 0),
            record("IT", (2020, 5, 2), 2, 0),
            record("IT", (2020, 5, 1), 3, 0),
        ];
        let cases: Vec<_> = most_recent(3, &records).iter().map(|r| r.cases).collect();
        assert_eq!(cases, vec![1, 3, 2]);
    }

    #[test]
    fn most_recent_zero_is_empty() {
        assert!(most_recent(0, &sample()).is_empty());
    }

    #[test]
    fn max_finders_pick_the_largest() {
        let records = sample();
        let top = max_cases(&records).unwrap();
        assert_eq!(top.cases, 10);
        assert!(records.iter().all(|r| top.cases >= r.cases));

        let top = max_deaths(&records).unwrap();
        assert_eq!(top.deaths, 4);
        assert_eq!(top.country_code, "MX");
    }

    #[test]
    fn max_finders_break_ties_on_first_occurrence() {
        let records = vec![
            record("BR", (2020, 6, 1), 50, 7),
            record("BR", (2020, 6, 2), 80, 7),
            record("BR", (2020, 6, 3), 80, 2),
        ];
        assert_eq!(max_cases(&records).unwrap().date_key(), (2020, 6, 2));
        assert_eq!(max_deaths(&records).unwrap().date_key(), (2020, 6, 1));
    }

    #[test]
    fn max_finders_reject_empty_input() {
        assert!(matches!(max_cases(&[]), Err(ReportError::EmptyRecords(_))));
        assert!(matches!(max_deaths(&[]), Err(ReportError::EmptyRecords(_))));
    }

    #[test]
    fn attach_dates_is_repeatable() {
        let mut records = records_for_country("US", &sample());
        attach_dates(&mut records).unwrap();
        let first: Vec<_> = records.iter().map(|r| r.date).collect();
        attach_dates(&mut records).unwrap();
        let second: Vec<_> = records.iter().map(|r| r.date).collect();

        assert_eq!(first, second);
        assert_eq!(first[1], NaiveDate::from_ymd_opt(2020, 2, 28));
    }

    #[test]
    fn attach_dates_propagates_invalid_dates() {
        let mut records = vec![
            record("JP", (2020, 6, 30), 0, 0),
            record("JP", (2020, 6, 31), 0, 0),
        ];
        assert_eq!(
            attach_dates(&mut records),
            Err(ReportError::InvalidDate {
                year: 2020,
                month: 6,
                day: 31
            })
        );
    }

    #[test]
    fn ten_days_of_us_data_keeps_latest_five_dates() {
        let mut records = Vec::new();
        for day in 1..=10 {
            records.push(record("US", (2020, 4, day), i64::from(day), 0));
            for other in ["MX", "CA", "BR"] {
                records.push(record(other, (2020, 4, day), 0, 0));
            }
        }
        records.reverse();

        let us = records_for_country("US", &records);
        assert_eq!(us.len(), 10);
        let days: Vec<_> = most_recent(5, &us).iter().map(|r| r.day).collect();
        assert_eq!(days, vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn forty_us_records_over_ten_days_yield_five_latest_records() {
        let mut records = Vec::new();
        for copy in 0..4 {
            for day in (1..=10).rev() {
                records.push(record("US", (2020, 4, day), copy, 0));
            }
        }
        let us = records_for_country("US", &records);
        assert_eq!(us.len(), 40);

        let recent = most_recent(5, &us);
        assert_eq!(recent.len(), 5);
        let keys: Vec<_> = recent.iter().map(|r| (r.day, r.cases)).collect();
        assert_eq!(keys, vec![(9, 3), (10, 0), (10, 1), (10, 2), (10, 3)]);
    }
}
