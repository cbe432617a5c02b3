use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use covid_report::{init_tracing, prepare_records, Config, HtmlCharts, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_level)?;

    let records = prepare_records(&config).await?;

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let charts = HtmlCharts::new(&config.output_dir, !config.no_open);

    info!("starting interactive session");
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&records, stdin.lock(), stdout.lock(), charts).run()
}
