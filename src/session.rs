use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::plot::Charts;
use crate::query::{attach_dates, most_recent, records_for_country};
use crate::record::Record;
use crate::report::write_report;

pub const EXIT: &str = "exit";
pub const COUNTRY_PROMPT: &str = "Enter Country Code (2 Letters) or 'exit': ";
pub const DAYS_PROMPT: &str = "Enter Number of Days to retroactively report : ";
pub const DAYS_RETRY_PROMPT: &str = "Enter Number of Days: ";
pub const INVALID_COUNTRY: &str = "Hey that's not a valid country code >:(";
pub const INVALID_DAYS: &str = "Hey that's not a positive integer >:(";

/// 交互状态
#[derive(Debug, PartialEq, Eq)]
pub enum State {
    AwaitingCountry,
    /// 携带已经按国家过滤的记录
    AwaitingDayCount(Vec<Record>),
    Finished,
}

/// 交互式查询会话，输入输出和绘图都由调用方注入
pub struct Session<'a, R, W, C> {
    records: &'a [Record],
    input: R,
    output: W,
    charts: C,
}

impl<'a, R, W, C> Session<'a, R, W, C>
where
    R: BufRead,
    W: Write,
    C: Charts,
{
    pub fn new(records: &'a [Record], input: R, output: W, charts: C) -> Self {
        Self {
            records,
            input,
            output,
            charts,
        }
    }

    /// 循环直到输入 exit 或者输入结束
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::AwaitingCountry;
        while state != State::Finished {
            state = self.step(state)?;
        }
        info!("session finished");
        Ok(())
    }

    pub fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::AwaitingCountry => self.await_country(),
            State::AwaitingDayCount(country_records) => self.await_day_count(country_records),
            State::Finished => Ok(State::Finished),
        }
    }

    pub fn into_parts(self) -> (R, W, C) {
        (self.input, self.output, self.charts)
    }

    fn await_country(&mut self) -> Result<State> {
        let Some(code) = self.prompt(COUNTRY_PROMPT)? else {
            return Ok(State::Finished);
        };
        if code == EXIT {
            return Ok(State::Finished);
        }

        let country_records = records_for_country(&code, self.records);
        if country_records.is_empty() {
            debug!(code = %code, "no records for country code");
            writeln!(self.output, "{INVALID_COUNTRY}")?;
            return Ok(State::AwaitingCountry);
        }

        debug!(code = %code, records = country_records.len(), "country selected");
        Ok(State::AwaitingDayCount(country_records))
    }

    fn await_day_count(&mut self, country_records: Vec<Record>) -> Result<State> {
        let mut prompt = DAYS_PROMPT;
        let num_days = loop {
            let Some(answer) = self.prompt(prompt)? else {
                return Ok(State::Finished);
            };
            match parse_day_count(&answer) {
                Some(n) => break n,
                None => {
                    writeln!(self.output, "{INVALID_DAYS}")?;
                    prompt = DAYS_RETRY_PROMPT;
                }
            }
        };

        let mut recent = most_recent(num_days, &country_records);
        attach_dates(&mut recent)?;
        debug!(num_days, selected = recent.len(), "reporting recent records");

        write_report(&mut self.output, &recent)?;
        self.output.flush()?;

        if let Err(e) = self.charts.plot_cases(&recent) {
            warn!(error = %e, "failed to render cases chart");
        }
        if let Err(e) = self.charts.plot_deaths(&recent) {
            warn!(error = %e, "failed to render deaths chart");
        }

        Ok(State::AwaitingCountry)
    }

    // 输入结束时返回 None
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// 只接受纯数字且大于 0 的天数，超出 usize 的值按 usize::MAX 处理
pub fn parse_day_count(answer: &str) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match answer.parse::<usize>() {
        Ok(0) => None,
        Ok(n) => Some(n),
        Err(_) => Some(usize::MAX),
    }
}
