use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;
use wx_core::{ArchiveConfig, ArchiveOutcome, ArchiveRecord, FetchFailure};
use wx_scrappers::logging::init_logging;
use wx_scrappers::WeChatScraper;
use wx_storage::ArchiveManager;

/// Archive a WeChat official-account article into a local notes folder.
///
/// The archive root defaults to $WECHAT_ARCHIVE_OUTPUT_DIR, or
/// `outputs/20-阅读笔记` when that is unset.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Article URL, e.g. https://mp.weixin.qq.com/s/xxxxxx
    url: String,
    /// Archive root directory, overriding the environment
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn success_lines(record: &ArchiveRecord) -> [String; 5] {
    [
        format!("SUCCESS: {}", record.title),
        format!("AUTHOR: {}", record.author),
        format!("DATE: {}", record.publish_time),
        format!("FOLDER: {}", record.folder),
        format!("WORD_COUNT: {}", record.word_count),
    ]
}

fn failure_line(failure: &FetchFailure) -> String {
    format!("ERROR: {}", failure.error)
}

fn persistence_error_line(error: &dyn Display) -> String {
    format!("ERROR: 归档过程中发生错误: {}", error)
}

fn domain_error_lines() -> [&'static str; 2] {
    [
        "❌ 错误: URL 必须来自微信公众号",
        "   请提供类似 'https://mp.weixin.qq.com/s/xxx' 的格式",
    ]
}

fn usage_lines() -> [&'static str; 2] {
    [
        "❌ 用法: wxa <微信公众号文章URL>",
        "示例: wxa https://mp.weixin.qq.com/s/xxxxxx",
    ]
}

/// Stdout lines for a finished run and whether the process should exit 0.
fn report(result: anyhow::Result<ArchiveOutcome>) -> (Vec<String>, bool) {
    match result {
        Ok(ArchiveOutcome::Success(record)) => (success_lines(&record).to_vec(), true),
        Ok(ArchiveOutcome::Failed(failure)) => (vec![failure_line(&failure)], false),
        Err(e) => (vec![persistence_error_line(&e)], false),
    }
}

fn print_lines<S: Display>(lines: impl IntoIterator<Item = S>) {
    for line in lines {
        println!("{}", line);
    }
}

async fn run(url: &str, config: ArchiveConfig, scraper: WeChatScraper) -> anyhow::Result<ArchiveOutcome> {
    debug!("archive root: {}", config.output_dir.display());
    let manager = ArchiveManager::new(config, Arc::new(scraper))?;
    Ok(manager.archive(url).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            print_lines(usage_lines());
            return ExitCode::FAILURE;
        }
    };

    let scraper = match WeChatScraper::new() {
        Ok(scraper) => scraper,
        Err(e) => {
            println!("{}", persistence_error_line(&e));
            return ExitCode::FAILURE;
        }
    };

    if !scraper.can_handle(&cli.url) {
        print_lines(domain_error_lines());
        return ExitCode::FAILURE;
    }

    let config = cli
        .output_dir
        .map(ArchiveConfig::new)
        .unwrap_or_else(ArchiveConfig::from_env);

    let (lines, success) = report(run(&cli.url, config, scraper).await);
    print_lines(lines);
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_lines_order_and_wording() {
        let record = ArchiveRecord {
            title: "Test Article".to_string(),
            author: "Jane".to_string(),
            publish_time: "未知时间".to_string(),
            folder: "outputs/20-阅读笔记/20240309-Test-Article-c23ca9".to_string(),
            slug: "20240309-Test-Article-c23ca9".to_string(),
            word_count: 2,
        };

        assert_eq!(
            success_lines(&record),
            [
                "SUCCESS: Test Article",
                "AUTHOR: Jane",
                "DATE: 未知时间",
                "FOLDER: outputs/20-阅读笔记/20240309-Test-Article-c23ca9",
                "WORD_COUNT: 2",
            ]
        );
    }

    #[test]
    fn test_fetch_failure_is_one_error_line() {
        let failure = FetchFailure {
            url: "https://mp.weixin.qq.com/s/gone".to_string(),
            error: "抓取失败: HTTP error: 404 Not Found".to_string(),
        };
        let (lines, success) = report(Ok(ArchiveOutcome::Failed(failure)));
        assert!(!success);
        assert_eq!(lines, vec!["ERROR: 抓取失败: HTTP error: 404 Not Found"]);
    }

    #[test]
    fn test_persistence_error_line() {
        let io = wx_core::Error::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        let (lines, success) = report(Err(io.into()));
        assert!(!success);
        assert_eq!(lines, vec!["ERROR: 归档过程中发生错误: IO error: denied"]);
    }

    #[test]
    fn test_success_report_exits_zero() {
        let record = ArchiveRecord {
            title: "T".to_string(),
            author: String::new(),
            publish_time: "未知时间".to_string(),
            folder: "out/20240309-T-c23ca9".to_string(),
            slug: "20240309-T-c23ca9".to_string(),
            word_count: 0,
        };
        let (lines, success) = report(Ok(ArchiveOutcome::Success(record)));
        assert!(success);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "AUTHOR: ");
    }

    #[test]
    fn test_domain_and_usage_lines() {
        assert_eq!(
            domain_error_lines(),
            [
                "❌ 错误: URL 必须来自微信公众号",
                "   请提供类似 'https://mp.weixin.qq.com/s/xxx' 的格式",
            ]
        );
        assert!(usage_lines()[0].starts_with("❌ 用法: "));
    }

    #[test]
    fn test_cli_takes_one_url() {
        let cli = Cli::try_parse_from(["wxa", "https://mp.weixin.qq.com/s/abc"]).unwrap();
        assert_eq!(cli.url, "https://mp.weixin.qq.com/s/abc");
        assert_eq!(cli.output_dir, None);

        let cli = Cli::try_parse_from(["wxa", "--output-dir", "/tmp/vault", "https://mp.weixin.qq.com/s/abc"]).unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/vault")));

        assert!(Cli::try_parse_from(["wxa"]).is_err());
        assert!(Cli::try_parse_from(["wxa", "a", "b"]).is_err());
    }
}
