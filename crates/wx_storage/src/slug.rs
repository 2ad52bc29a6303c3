use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

const MAX_TITLE_CHARS: usize = 30;
const HASH_CHARS: usize = 6;

/// Lower-hex SHA-256 of the URL bytes.
pub fn url_hash(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

/// Folder name for an archived article: `<YYYYMMDD>-<title>-<hash prefix>`.
pub fn slug(title: &str, url_hash: &str, date: NaiveDate) -> String {
    let hash: String = url_hash.chars().take(HASH_CHARS).collect();
    format!("{}-{}-{}", date.format("%Y%m%d"), clean_title(title), hash)
}

lazy_static! {
    // Letters, numbers and `_` count as word characters; U+001C..U+001F count
    // as whitespace alongside the Unicode `White_Space` set.
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_\s\x1C-\x1F-]").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[\s\x1C-\x1F-]+").unwrap();
}

fn is_separator_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Keeps word characters, whitespace and hyphens, folds every run of
/// whitespace/hyphens into one `-`, and caps the result at 30 characters.
///
/// Combining and spacing marks are not word characters and are dropped.
pub fn clean_title(title: &str) -> String {
    let kept = NON_WORD.replace_all(title, "");
    let folded = SEPARATORS.replace_all(kept.trim_matches(is_separator_space), "-");
    folded.chars().take(MAX_TITLE_CHARS).collect()
}
