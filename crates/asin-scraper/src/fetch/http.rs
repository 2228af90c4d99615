//! Tier 1: a single plain request through a freshly drawn identity.

use std::time::Duration;

use reqwest::Client;

use super::{FetchOutcome, PageFetcher};
use crate::error::ScraperError;
use crate::identity::{Identity, IdentityPool};

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Plain HTTP fetcher. Builds one `reqwest::Client` per attempt because the
/// proxy is part of the client and changes on every draw.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    pool: IdentityPool,
    timeout: Duration,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(pool: IdentityPool, timeout_secs: u64) -> Self {
        Self {
            pool,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn build_client(&self, identity: &Identity) -> Result<Client, ScraperError> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(identity.user_agent.as_str());
        builder = match &identity.proxy {
            Some(endpoint) => builder.proxy(endpoint.to_reqwest()?),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }

    /// Fetches `url` once.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network failure, timeout, or client construction.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::UnusableBody`]: empty body or a bot-check interstitial.
    /// - [`ScraperError::InvalidProxy`]: the drawn proxy endpoint is malformed.
    pub async fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        let identity = self.pool.draw_random();
        let client = self.build_client(&identity)?;

        let response = client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::REFERER, url)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        check_usable(&body).map_err(|reason| ScraperError::UnusableBody {
            url: url.to_owned(),
            reason,
        })?;
        Ok(body)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        FetchOutcome::from(self.fetch_once(url).await)
    }
}

/// Rejects bodies that carry no product markup even though the status was 2xx.
pub(crate) fn check_usable(body: &str) -> Result<(), &'static str> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err("empty body");
    }
    if looks_like_bot_challenge(trimmed) {
        return Err("bot challenge page");
    }
    Ok(())
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_captcha_form = lowered.contains("/errors/validatecaptcha");
    let has_captcha_prompt = lowered.contains("enter the characters you see below");
    let has_robot_notice = lowered.contains("to discuss automated access to amazon data");

    has_captcha_form || has_captcha_prompt || has_robot_notice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_unusable() {
        assert_eq!(check_usable("  \n "), Err("empty body"));
    }

    #[test]
    fn captcha_page_is_unusable() {
        let body = r#"<html><body><form action="/errors/validateCaptcha">
            <h4>Enter the characters you see below</h4></form></body></html>"#;
        assert_eq!(check_usable(body), Err("bot challenge page"));
    }

    #[test]
    fn product_page_is_usable() {
        let body = r#"<html><body><span id="productTitle">Widget</span></body></html>"#;
        assert_eq!(check_usable(body), Ok(()));
    }
}
