use crate::core::session::Session;
use crate::domain::model::RawLeader;
use crate::utils::error::{Result, ScraperError};

/// Client for the country-leaders API. Both listing calls go through the
/// session's single refresh-and-retry helper, so a stale cookie costs one
/// extra round trip and nothing more.
pub struct LeaderApi {
    session: Session,
    countries_url: String,
    leaders_url: String,
}

impl LeaderApi {
    pub fn new(session: Session, root_url: &str) -> Self {
        let root = root_url.trim_end_matches('/');
        Self {
            session,
            countries_url: format!("{}/countries", root),
            leaders_url: format!("{}/leaders", root),
        }
    }

    /// List supported country codes. Any failure left after the single
    /// refresh-retry is fatal: without countries there is nothing to scrape.
    pub async fn countries(&self) -> Result<Vec<String>> {
        let response = self
            .session
            .get_with_reauth(&self.countries_url, &[])
            .await?;

        if !response.status().is_success() {
            return Err(ScraperError::Fetch {
                url: self.countries_url.clone(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    /// List leaders for one country. Failures here are non-fatal: the country
    /// gets an empty list and the run continues with the next one.
    pub async fn leaders(&self, country: &str) -> Vec<RawLeader> {
        match self.try_leaders(country).await {
            Ok(leaders) => leaders,
            Err(e) => {
                tracing::warn!("Failed to fetch leaders for {}: {}", country, e);
                Vec::new()
            }
        }
    }

    async fn try_leaders(&self, country: &str) -> Result<Vec<RawLeader>> {
        let response = self
            .session
            .get_with_reauth(&self.leaders_url, &[("country", country)])
            .await?;

        if !response.status().is_success() {
            return Err(ScraperError::Fetch {
                url: self.leaders_url.clone(),
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }
}
