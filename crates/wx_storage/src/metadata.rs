use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use wx_core::{Article, Result};

pub const METADATA_FILE: &str = "meta.json";

/// Contents of `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub title: String,
    pub author: String,
    pub publish_time: String,
    pub url: String,
    pub archived_at: String,
    pub word_count: usize,
    pub content_hash: String,
}

/// Lower-hex SHA-256 of the content bytes.
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Local ISO-8601 timestamp; the microsecond fraction is left out when zero.
pub(crate) fn iso_timestamp(now: &DateTime<Local>) -> String {
    let local = now.naive_local();
    let seconds = local.format("%Y-%m-%dT%H:%M:%S");
    match local.nanosecond() / 1_000 % 1_000_000 {
        0 => seconds.to_string(),
        micros => format!("{}.{:06}", seconds, micros),
    }
}

pub fn build_metadata(article: &Article, now: &DateTime<Local>) -> ArchiveMetadata {
    ArchiveMetadata {
        title: article.display_title().to_string(),
        author: article.display_author().to_string(),
        publish_time: article.display_publish_time().to_string(),
        url: article.url.clone(),
        archived_at: iso_timestamp(now),
        word_count: article.word_count(),
        content_hash: content_hash(&article.content),
    }
}

pub fn write_metadata(metadata: &ArchiveMetadata, folder: &Path) -> Result<PathBuf> {
    let path = folder.join(METADATA_FILE);
    fs::write(&path, serde_json::to_string_pretty(metadata)?)?;
    Ok(path)
}
