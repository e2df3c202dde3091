pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{
    etl::EtlEngine, extractor::IntroExtractor, fetcher::LeaderApi, pipeline::LeaderPipeline,
    session::Session,
};
pub use utils::error::{Result, ScraperError};
