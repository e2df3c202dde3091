use crate::core::session::Session;
use crate::domain::ports::IntroSource;
use async_trait::async_trait;
use scraper::{Html, Selector};

const DISAMBIGUATION_MARKER: &str = "may refer to:";

/// Fetches a leader's encyclopedia page and pulls the first qualifying
/// introductory paragraph out of it. Every failure degrades to `None`; a
/// broken page must never interrupt the run.
pub struct IntroExtractor {
    session: Session,
    min_length: usize,
}

impl IntroExtractor {
    pub fn new(session: Session, min_length: usize) -> Self {
        Self {
            session,
            min_length,
        }
    }

    async fn fetch_page(&self, url: &str) -> reqwest::Result<String> {
        self.session
            .get(url, &[])
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl IntroSource for IntroExtractor {
    async fn extract_intro(&self, url: &str) -> Option<String> {
        let html = match self.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!("Could not fetch {}: {}", url, e);
                return None;
            }
        };

        first_paragraph(&html, self.min_length)
    }
}

/// Scan paragraphs left to right and return the first whose collapsed text is
/// at least `min_length` characters and is not a disambiguation stub. When an
/// element with id `mw-content-text` exists only its paragraphs are scanned,
/// otherwise the whole document.
pub fn first_paragraph(html: &str, min_length: usize) -> Option<String> {
    let document = Html::parse_document(html);
    let content_selector = Selector::parse("#mw-content-text").unwrap();
    let scoped_selector = Selector::parse("#mw-content-text p").unwrap();
    let any_selector = Selector::parse("p").unwrap();

    let selector = if document.select(&content_selector).next().is_some() {
        &scoped_selector
    } else {
        &any_selector
    };

    for paragraph in document.select(selector) {
        let text = paragraph.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.chars().count() >= min_length
            && !text.to_lowercase().contains(DISAMBIGUATION_MARKER)
        {
            return Some(text);
        }
    }

    None
}
