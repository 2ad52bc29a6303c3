pub mod scrapers;
pub mod logging;

pub use scrapers::wechat::{fetch_wechat_article, ArticleParser, WeChatScraper};

pub mod prelude {
    pub use super::scrapers::wechat::WeChatScraper;
    pub use wx_core::{ArticleFetcher, Article, FetchResult, Result, Error};
}
