use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::info;
use wx_core::{
    ArchiveConfig, ArchiveOutcome, ArchiveRecord, Article, ArticleFetcher, FetchResult, Result,
};

use crate::metadata::{build_metadata, write_metadata};
use crate::render::{write_note, write_raw_copy};
use crate::slug::{slug, url_hash};

/// Fetches articles and lays them out as `<output_dir>/<slug>/` folders.
pub struct ArchiveManager {
    output_dir: PathBuf,
    fetcher: Arc<dyn ArticleFetcher>,
}

impl ArchiveManager {
    /// Creates the output directory (and parents) if it does not exist yet.
    pub fn new(config: ArchiveConfig, fetcher: Arc<dyn ArticleFetcher>) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)?;
        Ok(Self {
            output_dir: config.output_dir,
            fetcher,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetches `url` and archives it.
    ///
    /// A failed fetch comes back as [`ArchiveOutcome::Failed`] and leaves the
    /// filesystem untouched. Filesystem errors are returned as `Err`; files
    /// written before the error are left in place.
    pub async fn archive(&self, url: &str) -> Result<ArchiveOutcome> {
        info!("开始归档: {}", url);

        let article = match self.fetcher.fetch(url).await {
            FetchResult::Success(article) => article,
            FetchResult::Failed(failure) => return Ok(ArchiveOutcome::Failed(failure)),
        };

        let record = self.store_article(&article, Local::now())?;
        Ok(ArchiveOutcome::Success(record))
    }

    /// Writes the note, the raw copy and `meta.json`, in that order.
    ///
    /// An existing folder with the same slug is reused and its files are
    /// overwritten.
    pub fn store_article(&self, article: &Article, now: DateTime<Local>) -> Result<ArchiveRecord> {
        let slug = slug(
            article.display_title(),
            &url_hash(&article.url),
            now.date_naive(),
        );
        let folder = self.output_dir.join(&slug);
        fs::create_dir_all(&folder)?;

        info!("📝 正在保存文件...");
        write_note(article, &folder, &now)?;
        write_raw_copy(article, &folder)?;
        write_metadata(&build_metadata(article, &now), &folder)?;

        info!("✨ 归档完成!");
        info!("📁 文件位置: {}", folder.display());

        Ok(ArchiveRecord {
            title: article.display_title().to_string(),
            author: article.display_author().to_string(),
            publish_time: article.display_publish_time().to_string(),
            folder: folder.display().to_string(),
            slug,
            word_count: article.word_count(),
        })
    }
}
