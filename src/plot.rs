use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotly::color::NamedColor;
use plotly::common::{DashType, Line, Marker, MarkerSymbol, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use tracing::{info, warn};

use crate::error::ReportError;
use crate::record::Record;

pub const CASES_FILE: &str = "scatter-cases.html";
pub const DEATHS_FILE: &str = "scatter-deaths.html";

/// 绘图协作者: 病例折线图与死亡折线图
pub trait Charts {
    fn plot_cases(&self, records: &[Record]) -> Result<()>;
    fn plot_deaths(&self, records: &[Record]) -> Result<()>;
}

impl<T: Charts + ?Sized> Charts for &T {
    fn plot_cases(&self, records: &[Record]) -> Result<()> {
        (**self).plot_cases(records)
    }

    fn plot_deaths(&self, records: &[Record]) -> Result<()> {
        (**self).plot_deaths(records)
    }
}

/// 生成 plotly HTML 图表，写入输出目录后可选地用浏览器打开
#[derive(Debug, Clone)]
pub struct HtmlCharts {
    output_dir: PathBuf,
    open_in_browser: bool,
}

impl HtmlCharts {
    pub fn new(output_dir: impl Into<PathBuf>, open_in_browser: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            open_in_browser,
        }
    }

    pub fn cases_path(&self) -> PathBuf {
        self.output_dir.join(CASES_FILE)
    }

    pub fn deaths_path(&self) -> PathBuf {
        self.output_dir.join(DEATHS_FILE)
    }

    fn render(&self, plot: &Plot, path: &Path) -> Result<()> {
        std::fs::write(path, plot.to_html())
            .with_context(|| format!("writing chart to {}", path.display()))?;
        info!(path = %path.display(), "chart written");

        if self.open_in_browser {
            if let Err(e) = open::that(path) {
                warn!(path = %path.display(), error = %e, "failed to open chart in browser");
            }
        }
        Ok(())
    }
}

impl Charts for HtmlCharts {
    fn plot_cases(&self, records: &[Record]) -> Result<()> {
        let plot = cases_plot(records)?;
        self.render(&plot, &self.cases_path())
    }

    fn plot_deaths(&self, records: &[Record]) -> Result<()> {
        let plot = deaths_plot(records)?;
        self.render(&plot, &self.deaths_path())
    }
}

/// 病例图: 海军蓝倒三角标记，浅天蓝连线
pub fn cases_plot(records: &[Record]) -> Result<Plot> {
    let (country, x_axis) = axis_labels(records, "plot cases")?;
    let y_axis: Vec<i64> = records.iter().map(|r| r.cases).collect();

    let trace = Scatter::new(x_axis, y_axis)
        .mode(Mode::LinesMarkers)
        .marker(
            Marker::new()
                .symbol(MarkerSymbol::TriangleDown)
                .size(17)
                .color(NamedColor::Navy),
        )
        .line(
            Line::new()
                .color(NamedColor::LightSkyBlue)
                .width(3.0)
                .dash(DashType::Solid),
        );

    Ok(line_chart(trace, &format!("Recent Cases in {country}"), "Cases"))
}

/// 死亡图: 暗红圆点标记，黑色连线
pub fn deaths_plot(records: &[Record]) -> Result<Plot> {
    let (country, x_axis) = axis_labels(records, "plot deaths")?;
    let y_axis: Vec<i64> = records.iter().map(|r| r.deaths).collect();

    let trace = Scatter::new(x_axis, y_axis)
        .mode(Mode::LinesMarkers)
        .marker(
            Marker::new()
                .symbol(MarkerSymbol::Circle)
                .size(21)
                .color(NamedColor::DarkRed),
        )
        .line(
            Line::new()
                .color(NamedColor::Black)
                .width(3.0)
                .dash(DashType::Solid),
        );

    Ok(line_chart(trace, &format!("Recent Deaths in {country}"), "Deaths"))
}

fn line_chart(trace: Box<Scatter<String, i64>>, title: &str, y_title: &str) -> Plot {
    let layout = Layout::new()
        .title(Title::new(title))
        .x_axis(Axis::new().title(Title::new("Date")))
        .y_axis(Axis::new().title(Title::new(y_title)));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

// 国家名取第一条记录，x 轴为 "%B %d" 格式的日期
fn axis_labels(records: &[Record], action: &'static str) -> Result<(String, Vec<String>)> {
    let first = records.first().ok_or(ReportError::EmptyRecords(action))?;
    let labels = records
        .iter()
        .map(|r| r.attached_date().map(|date| date.format("%B %d").to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((first.display_name(), labels))
}
