//! Single-page fetch of the newsletter HTML.

use std::time::Duration;

use campusevents_shared::{CampusEventsError, Result, SourceConfig};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Maximum response size we accept (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Options for the page fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&SourceConfig::default())
    }
}

impl From<&SourceConfig> for FetchOptions {
    fn from(source: &SourceConfig) -> Self {
        Self {
            timeout: Duration::from_secs(source.timeout_secs),
            user_agent: source.user_agent.clone(),
        }
    }
}

/// Fetch the page body at `url`.
///
/// Any transport failure or non-2xx status is a [`CampusEventsError::Network`]
/// error; the caller treats it as fatal for the run.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_page(url: &Url, opts: &FetchOptions) -> Result<String> {
    let client = build_client(opts)?;

    debug!(timeout_ms = opts.timeout.as_millis(), "fetching page");

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| CampusEventsError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CampusEventsError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(CampusEventsError::validation(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| CampusEventsError::Network(format!("{url}: failed to read body: {e}")))?;

    info!(bytes = body.len(), "page fetched");
    Ok(body)
}

/// Build a reqwest client with the configured timeout and User-Agent.
fn build_client(opts: &FetchOptions) -> Result<Client> {
    Client::builder()
        .user_agent(opts.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(opts.timeout)
        .build()
        .map_err(|e| CampusEventsError::Network(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_body() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/connections"))
            .and(wiremock::matchers::header_exists("user-agent"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string("<main>ENGAGE</main>"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/connections", server.uri())).unwrap();
        let body = fetch_page(&url, &FetchOptions::default()).await.unwrap();
        assert!(body.contains("ENGAGE"));
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let err = fetch_page(&url, &FetchOptions::default()).await.unwrap_err();
        assert!(matches!(err, CampusEventsError::Network(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn fetch_times_out() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let opts = FetchOptions {
            timeout: Duration::from_millis(50),
            ..FetchOptions::default()
        };
        let err = fetch_page(&url, &opts).await.unwrap_err();
        assert!(matches!(err, CampusEventsError::Network(_)));
    }

    #[test]
    fn options_follow_source_config() {
        let source = SourceConfig {
            timeout_secs: 7,
            ..SourceConfig::default()
        };
        let opts = FetchOptions::from(&source);
        assert_eq!(opts.timeout, Duration::from_secs(7));
        assert!(opts.user_agent.contains("Scraper"));
    }
}
