use crate::utils::error::{Result, ScraperError};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// One authenticated HTTP identity for the whole run: a shared client with a
/// cookie jar and a browser User-Agent. The cookie is an opaque capability
/// token stored in the jar; staleness is only detected reactively through a
/// 403 on a real request.
#[derive(Clone)]
pub struct Session {
    client: Client,
    cookie_url: String,
}

impl Session {
    /// Build the client. No network I/O happens here; the first real request
    /// surfaces any connectivity problem.
    pub fn acquire(root_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            cookie_url: format!("{}/cookie", root_url.trim_end_matches('/')),
        })
    }

    /// Hit the cookie endpoint; the Set-Cookie response replaces whatever is
    /// in the jar. Failure here means no call can be authenticated.
    pub async fn refresh_cookie(&self) -> Result<()> {
        tracing::debug!("Refreshing session cookie from {}", self.cookie_url);
        self.client
            .get(&self.cookie_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ScraperError::Authentication { source })?;
        Ok(())
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client.get(url).query(query).send().await
    }

    /// GET with the shared retry policy: on 403 refresh the cookie once and
    /// reissue the same request exactly once. The response is returned as-is;
    /// the caller decides whether a remaining non-success status is fatal.
    pub async fn get_with_reauth(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let mut response = self.get(url, query).await?;

        if response.status() == StatusCode::FORBIDDEN {
            tracing::debug!("Got 403 from {}, refreshing cookie and retrying", url);
            self.refresh_cookie().await?;
            response = self.get(url, query).await?;
        }

        Ok(response)
    }
}
