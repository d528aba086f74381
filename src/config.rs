use std::env;
use std::time::Duration;

/// Number of listing pages walked per run. The site paginates from index 0.
pub const LISTING_PAGES: u32 = 20;

/// Run configuration. Defaults reproduce the site and pacing the scraper was
/// written for; each value can be overridden through a `JOB_SCRAPER_*`
/// environment variable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing URL part before the page index.
    pub listing_prefix: String,
    /// Listing URL part after the page index (category/tag filters,
    /// already percent-encoded).
    pub listing_suffix: String,
    /// SQLite database the records land in.
    pub database_url: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Courtesy pause before each outbound request, in milliseconds.
    pub fetch_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listing_prefix: "https://it.pracuj.pl/praca?pn=".to_string(),
            listing_suffix: "&its=big-data-science%2Cai-ml".to_string(),
            database_url: "sqlite://jobs.db?mode=rwc".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            fetch_delay_ms: 200,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            listing_prefix: env::var("JOB_SCRAPER_LISTING_PREFIX")
                .unwrap_or(defaults.listing_prefix),
            listing_suffix: env::var("JOB_SCRAPER_LISTING_SUFFIX")
                .unwrap_or(defaults.listing_suffix),
            database_url: env::var("JOB_SCRAPER_DATABASE_URL").unwrap_or(defaults.database_url),
            user_agent: env::var("JOB_SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
            fetch_delay_ms: env::var("JOB_SCRAPER_FETCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_delay_ms),
        }
    }

    /// URL of the search-results page with the given index.
    pub fn listing_url(&self, page: u32) -> String {
        format!("{}{}{}", self.listing_prefix, page, self.listing_suffix)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}
