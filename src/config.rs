use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_URL: &str = "https://opendata.ecdc.europa.eu/covid19/casedistribution/json";
pub const DEFAULT_DATA_FILE: &str = "dailyCovid19Data.json";

/// Report recent COVID-19 cases and deaths per country from the ECDC dataset
#[derive(Debug, Clone, Parser)]
#[command(name = "covid-report")]
#[command(version, long_about = None)]
pub struct Config {
    /// Dataset URL
    #[arg(long, env = "COVID_DATA_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Local file the downloaded dataset is saved to and read back from
    #[arg(long, env = "COVID_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Directory the HTML charts are written to
    #[arg(long, env = "COVID_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip the download and use the previously saved data file
    #[arg(long, env = "COVID_OFFLINE")]
    pub offline: bool,

    /// Write charts without opening them in a browser
    #[arg(long, env = "COVID_NO_OPEN")]
    pub no_open: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
