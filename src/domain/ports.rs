use crate::domain::model::{LeadersByCountry, OutputFormat, RawLeadersByCountry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn root_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn format(&self) -> OutputFormat;
    fn min_intro_length(&self) -> usize;
    fn timeout(&self) -> Duration;
}

/// Source of introductory paragraphs for leader pages. Failures are absorbed
/// by the implementation; a miss is `None`, never an error.
#[async_trait]
pub trait IntroSource: Send + Sync {
    async fn extract_intro(&self, url: &str) -> Option<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawLeadersByCountry>;
    async fn transform(&self, data: RawLeadersByCountry) -> Result<LeadersByCountry>;
    async fn load(&self, result: LeadersByCountry) -> Result<String>;
}
