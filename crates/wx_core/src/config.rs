use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the archive root directory.
pub const OUTPUT_DIR_ENV: &str = "WECHAT_ARCHIVE_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs/20-阅读笔记";

#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Bounds, in seconds, of the random pause taken before each request.
    pub delay_range: (f64, f64),
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            delay_range: (1.0, 3.0),
            timeout: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    pub fn with_delay_range(mut self, min: f64, max: f64) -> Self {
        self.delay_range = (min, max);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay bounds ordered low to high and clamped at zero.
    pub fn delay_bounds(&self) -> (f64, f64) {
        let (a, b) = self.delay_range;
        let (a, b) = (a.max(0.0), b.max(0.0));
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    pub output_dir: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ArchiveConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::resolve(std::env::var(OUTPUT_DIR_ENV).ok())
    }

    fn resolve(value: Option<String>) -> Self {
        match value {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.delay_range, (1.0, 3.0));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_delay_bounds_are_ordered() {
        let config = FetchConfig::default().with_delay_range(3.0, -1.0);
        assert_eq!(config.delay_bounds(), (0.0, 3.0));
    }

    #[test]
    fn test_output_dir_resolution() {
        assert_eq!(ArchiveConfig::resolve(None).output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(ArchiveConfig::resolve(Some(String::new())), ArchiveConfig::default());
        assert_eq!(
            ArchiveConfig::resolve(Some("/tmp/vault".to_string())).output_dir,
            PathBuf::from("/tmp/vault")
        );
    }
}
