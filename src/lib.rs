use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod error;
pub mod fetcher;
pub mod plot;
pub mod query;
pub mod record;
pub mod report;
pub mod session;

pub use config::Config;
pub use error::ReportError;
pub use plot::{Charts, HtmlCharts};
pub use query::{attach_dates, max_cases, max_deaths, most_recent, records_for_country};
pub use record::{Dataset, Record};
pub use session::{Session, State};

/// 初始化日志，RUST_LOG 优先于配置中的级别；日志写到 stderr，避免和报表混在一起
pub fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .context("initializing tracing")?;
    Ok(())
}

/// 下载 (或者离线时直接读取) 数据集
pub async fn prepare_records(config: &Config) -> Result<Vec<Record>> {
    let path: &Path = &config.data_file;
    if config.offline {
        info!(path = %path.display(), "offline mode, using saved dataset");
    } else {
        fetcher::download(&config.url, path).await?;
    }
    fetcher::load_records(path).await
}
