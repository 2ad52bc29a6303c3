pub mod config;
pub mod error;
pub mod fetcher;
pub mod types;

pub use config::{ArchiveConfig, FetchConfig};
pub use error::Error;
pub use fetcher::ArticleFetcher;
pub use types::{ArchiveOutcome, ArchiveRecord, Article, FetchFailure, FetchResult};

pub type Result<T> = std::result::Result<T, Error>;
