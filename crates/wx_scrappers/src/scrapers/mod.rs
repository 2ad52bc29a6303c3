pub mod wechat;

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{ElementRef, Html, Selector};
    use url::Url;
    use wx_core::{Error, Result};

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {:?}: {}", selector, e)))
    }

    /// Text of every descendant text node, each trimmed, empty ones dropped,
    /// concatenated without separators.
    pub fn stripped_text(element: ElementRef<'_>) -> String {
        element
            .text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect()
    }

    pub fn first_text(document: &Html, selector: &Selector) -> Option<String> {
        document.select(selector).next().map(stripped_text)
    }

    pub fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string)
    }

    pub fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }
}
