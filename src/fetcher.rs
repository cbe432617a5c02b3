use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::error::ReportError;
use crate::record::{Dataset, Record};

// rust 的 async trait 还没有稳定，可以用async_trait 宏
#[async_trait]
pub trait Fetch {
    type Error;
    async fn fetch(&self) -> Result<String, Self::Error>;
}

/// 从文件源或者 http 源中获取原始文本
pub async fn retrieve_data(source: impl AsRef<str>) -> Result<String> {
    let name = source.as_ref();
    if name.starts_with("http://") || name.starts_with("https://") {
        UrlFetcher(name).fetch().await
    } else if let Some(path) = name.strip_prefix("file://") {
        FileFetcher(path).fetch().await
    } else {
        Err(ReportError::UnsupportedSource(name.to_string()).into())
    }
}

/// 下载数据集并保存到本地文件
pub async fn download(url: &str, path: &Path) -> Result<()> {
    info!(url, path = %path.display(), "downloading dataset");
    let body = retrieve_data(url).await?;
    fs::write(path, body.as_bytes())
        .await
        .with_context(|| format!("writing dataset to {}", path.display()))?;
    info!(bytes = body.len(), "dataset saved");
    Ok(())
}

/// 从本地文件读回数据集
pub async fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = retrieve_data(format!("file://{}", path.display())).await?;
    let records = parse_records(&text)
        .with_context(|| format!("parsing dataset in {}", path.display()))?;
    info!(records = records.len(), "dataset loaded");
    Ok(records)
}

pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let dataset: Dataset = serde_json::from_str(text)?;
    Ok(dataset.records)
}

pub struct UrlFetcher<'a>(pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for UrlFetcher<'a> {
    type Error = anyhow::Error;

    async fn fetch(&self) -> Result<String, Self::Error> {
        let resp = reqwest::get(self.0)
            .await
            .with_context(|| format!("requesting {}", self.0))?
            .error_for_status()?;
        Ok(resp.text().await?)
    }
}

pub struct FileFetcher<'a>(pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for FileFetcher<'a> {
    type Error = anyhow::Error;

    async fn fetch(&self) -> Result<String, Self::Error> {
        fs::read_to_string(self.0)
            .await
            .with_context(|| format!("reading {}", self.0))
    }
}
