use log::debug;
use reqwest::Client;

use crate::config::Config;
use crate::error::ScrapeError;

/// Thin wrapper around one shared HTTP client. Every page the run touches
/// goes through [`Fetcher::get`], so the user agent is set once.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .expect("Failed to build HTTP client");

        Fetcher { client }
    }

    /// Fetches one page and returns its body. Transport failures and
    /// non-success statuses both surface as errors; callers decide whether
    /// that ends the run.
    pub async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::FetchTransport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|source| ScrapeError::FetchTransport {
                url: url.to_string(),
                source,
            })
    }
}
