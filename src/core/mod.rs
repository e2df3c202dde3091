pub mod etl;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod session;

pub use crate::domain::model::{
    Leader, LeadersByCountry, OutputFormat, RawLeader, RawLeadersByCountry,
};
pub use crate::domain::ports::{ConfigProvider, IntroSource, Pipeline, Storage};
pub use crate::utils::error::Result;
