pub mod manager;
pub mod metadata;
pub mod render;
pub mod slug;

pub use manager::ArchiveManager;
pub use metadata::{build_metadata, content_hash, ArchiveMetadata};
pub use slug::{slug, url_hash};

pub mod prelude {
    pub use super::manager::ArchiveManager;
    pub use wx_core::{ArchiveOutcome, ArchiveRecord, ArticleFetcher};
}
