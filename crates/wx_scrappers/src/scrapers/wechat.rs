use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use rand::Rng;
use regex::Regex;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};
use scraper::{Html, Selector};
use wx_core::{Article, ArticleFetcher, Error, FetchConfig, FetchFailure, FetchResult, Result};

use super::utils::{self, first_attr, first_text, non_empty, stripped_text};
use crate::logging::Logger;

pub const HOST: &str = "mp.weixin.qq.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

const HEADING_TAGS: [&str; 4] = ["h1", "h2", "h3", "h4"];

/// Extracts an optional field from the parsed page.
type Strategy = fn(&ArticleParser, &Html) -> Option<String>;

const AUTHOR_STRATEGIES: &[Strategy] = &[ArticleParser::byline_author, ArticleParser::meta_author];

/// Tried only when the page source carries no `var ct` timestamp.
const PUBLISH_TIME_STRATEGIES: &[Strategy] = &[
    ArticleParser::og_published_time,
    ArticleParser::article_published_time,
    ArticleParser::inline_publish_time,
];

/// Compiled selectors for the WeChat article layout.
#[derive(Debug, Clone)]
pub struct ArticleParser {
    title: Selector,
    content: Selector,
    blocks: Selector,
    byline: Selector,
    meta_author: Selector,
    og_published: Selector,
    article_published: Selector,
    inline_published: Selector,
    timestamp: Regex,
}

impl ArticleParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: utils::parse_selector("h1.rich_media_title")?,
            content: utils::parse_selector("div.rich_media_content")?,
            blocks: utils::parse_selector("p, section, h1, h2, h3, h4")?,
            byline: utils::parse_selector("span.rich_media_meta.rich_media_meta_text")?,
            meta_author: utils::parse_selector(r#"meta[name="author"]"#)?,
            og_published: utils::parse_selector(r#"meta[property="og:article:published_time"]"#)?,
            article_published: utils::parse_selector(r#"meta[property="article:published_time"]"#)?,
            inline_published: utils::parse_selector("em#publish_time")?,
            timestamp: Regex::new(r#"var ct\s*=\s*"(\d+)""#)
                .map_err(|e| Error::Scraping(format!("Invalid timestamp pattern: {}", e)))?,
        })
    }

    /// Fails only when the embedded `var ct` timestamp cannot be converted.
    pub fn parse(&self, url: &str, html: &str) -> Result<Article> {
        let document = Html::parse_document(html);
        let publish_time = match self.script_timestamp(html)? {
            Some(time) => Some(time),
            None => self.first_match(PUBLISH_TIME_STRATEGIES, &document),
        };

        Ok(Article {
            url: url.to_string(),
            title: first_text(&document, &self.title),
            content: self.content(&document),
            author: self.first_match(AUTHOR_STRATEGIES, &document),
            publish_time,
        })
    }

    fn first_match(&self, strategies: &[Strategy], document: &Html) -> Option<String> {
        strategies
            .iter()
            .find_map(|strategy| non_empty(strategy(self, document)))
    }

    fn content(&self, document: &Html) -> String {
        let Some(container) = document.select(&self.content).next() else {
            return String::new();
        };

        let mut content = String::new();
        for block in container.select(&self.blocks) {
            let text = stripped_text(block);
            if text.is_empty() {
                continue;
            }
            if HEADING_TAGS.contains(&block.value().name()) {
                content.push_str(&format!("\n## {}\n\n", text));
            } else {
                content.push_str(&format!("{}\n\n", text));
            }
        }
        content.trim().to_string()
    }

    fn byline_author(&self, document: &Html) -> Option<String> {
        first_text(document, &self.byline)
    }

    fn meta_author(&self, document: &Html) -> Option<String> {
        first_attr(document, &self.meta_author, "content").map(|author| author.trim().to_string())
    }

    fn script_timestamp(&self, raw: &str) -> Result<Option<String>> {
        let Some(digits) = self.timestamp.captures(raw).and_then(|caps| caps.get(1)) else {
            return Ok(None);
        };
        let digits = digits.as_str();
        let time = digits
            .parse::<i64>()
            .ok()
            .and_then(|seconds| Local.timestamp_opt(seconds, 0).single())
            .ok_or_else(|| Error::Scraping(format!("Publish timestamp out of range: {}", digits)))?;
        Ok(Some(time.format("%Y-%m-%d %H:%M:%S").to_string()))
    }

    fn og_published_time(&self, document: &Html) -> Option<String> {
        first_attr(document, &self.og_published, "content")
    }

    fn article_published_time(&self, document: &Html) -> Option<String> {
        first_attr(document, &self.article_published, "content")
    }

    fn inline_publish_time(&self, document: &Html) -> Option<String> {
        first_text(document, &self.inline_published)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

#[derive(Debug, Clone)]
pub struct WeChatScraper {
    client: reqwest::Client,
    parser: ArticleParser,
    config: FetchConfig,
    logger: Logger,
}

impl WeChatScraper {
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            parser: ArticleParser::new()?,
            config,
            logger: Logger::new().with_prefix("[wechat]"),
        })
    }

    /// Returns true if the URL points at a WeChat official-account page.
    pub fn can_handle(&self, url: &str) -> bool {
        utils::parse_url(url)
            .map(|parsed| parsed.host_str() == Some(HOST))
            .unwrap_or(false)
    }

    fn pick_delay(&self) -> Duration {
        let (min, max) = self.config.delay_bounds();
        Duration::from_secs_f64(rand::thread_rng().gen_range(min..=max))
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        let delay = self.pick_delay();
        self.logger.debug(&format!("sleeping {:.2}s before request", delay.as_secs_f64()));
        tokio::time::sleep(delay).await;

        self.logger.info("🚀 正在抓取文章...");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let html = String::from_utf8_lossy(&body);

        let article = self.parser.parse(url, &html)?;
        self.logger.info(&format!("✅ 成功抓取: {}", article.display_title()));
        Ok(article)
    }
}

#[async_trait]
impl ArticleFetcher for WeChatScraper {
    async fn fetch(&self, url: &str) -> FetchResult {
        match self.scrape_article(url).await {
            Ok(article) => FetchResult::Success(article),
            Err(e) => {
                self.logger.warn(&format!("fetch failed for {}: {}", url, e));
                FetchResult::Failed(failure(url, e))
            }
        }
    }
}

fn failure(url: &str, error: Error) -> FetchFailure {
    FetchFailure {
        url: url.to_string(),
        error: format!("抓取失败: {}", error),
    }
}

/// One-shot fetch with the given delay range and timeout.
pub async fn fetch_wechat_article(url: &str, config: FetchConfig) -> FetchResult {
    match WeChatScraper::with_config(config) {
        Ok(scraper) => scraper.fetch(url).await,
        Err(e) => FetchResult::Failed(failure(url, e)),
    }
}
