use serde::{Deserialize, Serialize};

/// Rendered in place of a missing title.
pub const UNKNOWN_TITLE: &str = "未知标题";
/// Rendered in place of a missing publish time.
pub const UNKNOWN_TIME: &str = "未知时间";

/// Fields extracted from a single article page.
///
/// Missing fields stay `None` here; the placeholder text only appears through
/// the `display_*` accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub publish_time: Option<String>,
}

impl Article {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    pub fn display_publish_time(&self) -> &str {
        self.publish_time.as_deref().unwrap_or(UNKNOWN_TIME)
    }

    /// Number of whitespace-delimited tokens in the body.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchResult {
    Success(Article),
    Failed(FetchFailure),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success(_))
    }

    pub fn url(&self) -> &str {
        match self {
            FetchResult::Success(article) => &article.url,
            FetchResult::Failed(failure) => &failure.url,
        }
    }
}

/// Summary of a completed archive operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub title: String,
    pub author: String,
    pub publish_time: String,
    pub folder: String,
    pub slug: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ArchiveOutcome {
    Success(ArchiveRecord),
    Failed(FetchFailure),
}
