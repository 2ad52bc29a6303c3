//! Markdown renderers for the note and the raw article copy.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use wx_core::{Article, Result};

use crate::metadata::iso_timestamp;

pub const RAW_COPY_FILE: &str = "article.md";
pub const NOTE_TAGS: [&str; 2] = ["wechat", "article"];

/// Front matter block at the top of the note.
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    author: &'a str,
    date: &'a str,
    url: &'a str,
    tags: [&'a str; 2],
    archived: String,
}

pub fn render_note(article: &Article, now: &DateTime<Local>) -> Result<String> {
    let front_matter = FrontMatter {
        title: article.display_title(),
        author: article.display_author(),
        date: article.display_publish_time(),
        url: &article.url,
        tags: NOTE_TAGS,
        archived: iso_timestamp(now),
    };
    let front_matter = serde_json::to_string_pretty(&front_matter)?;

    Ok(format!(
        r#"---
{front_matter}
---

# {title}

## 📖 文章信息

- **作者**: {author}
- **发布时间**: {publish_time}
- **原文链接**: [🔗 点击阅读]({url})

## 🔍 内容摘要

> 核心摘要内容...

## 💡 核心观点

1.
2.
3.

## 📚 关键概念

1. **概念1**:
2. **概念2**:
3. **概念3**:

## 🤔 个人思考

-
-

## 📋 行动项

- [ ] 整理笔记
- [ ] 延伸阅读
- [ ] 实践应用

---
*归档于: {archived}*
"#,
        front_matter = front_matter,
        title = article.display_title(),
        author = article.display_author(),
        publish_time = article.display_publish_time(),
        url = article.url,
        archived = now.format("%Y年%m月%d日 %H:%M"),
    ))
}

/// Writes `<slug>.md`, where the slug is the folder's own name.
pub fn write_note(article: &Article, folder: &Path, now: &DateTime<Local>) -> Result<PathBuf> {
    let slug = folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = folder.join(format!("{}.md", slug));
    fs::write(&path, render_note(article, now)?)?;
    Ok(path)
}

pub fn render_raw_copy(article: &Article) -> String {
    let body = if article.content.starts_with('#') {
        article.content.clone()
    } else {
        format!("# {}\n\n{}", article.display_title(), article.content)
    };

    format!(
        "{}\n\n---\n*原文发布: {}*\n*原文链接: {}*\n",
        body,
        article.display_publish_time(),
        article.url
    )
}

pub fn write_raw_copy(article: &Article, folder: &Path) -> Result<PathBuf> {
    let path = folder.join(RAW_COPY_FILE);
    fs::write(&path, render_raw_copy(article))?;
    Ok(path)
}
