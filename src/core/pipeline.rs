use crate::core::fetcher::LeaderApi;
use crate::core::{ConfigProvider, IntroSource, LeadersByCountry, OutputFormat, Pipeline, RawLeadersByCountry, Storage};
use crate::utils::error::{Result, ScraperError};
use indexmap::IndexMap;

pub const JSON_FILE_NAME: &str = "leaders.json";
pub const CSV_FILE_NAME: &str = "leaders.csv";

const CSV_HEADER: [&str; 8] = [
    "country",
    "first_name",
    "last_name",
    "birth_date",
    "start_mandate",
    "end_mandate",
    "wikipedia_url",
    "intro_paragraph",
];

/// The fetch-enrich-save pipeline. Extract walks the countries in API order
/// and collects each country's raw leader list; transform attaches the intro
/// paragraphs; load serializes the aggregate through the storage port.
pub struct LeaderPipeline<S: Storage, C: ConfigProvider, I: IntroSource> {
    api: LeaderApi,
    intro: I,
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider, I: IntroSource> LeaderPipeline<S, C, I> {
    pub fn new(api: LeaderApi, intro: I, storage: S, config: C) -> Self {
        Self {
            api,
            intro,
            storage,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, I: IntroSource> Pipeline for LeaderPipeline<S, C, I> {
    async fn extract(&self) -> Result<RawLeadersByCountry> {
        // 國家清單抓取失敗是致命的,沒有國家就沒有後續工作
        let countries = self.api.countries().await?;
        tracing::info!("Fetched {} countries", countries.len());

        let mut raw = IndexMap::new();
        for country in countries {
            tracing::info!("Fetching leaders for {}", country);
            let leaders = self.api.leaders(&country).await;
            raw.insert(country, leaders);
        }

        Ok(raw)
    }

    async fn transform(&self, data: RawLeadersByCountry) -> Result<LeadersByCountry> {
        let mut enriched = IndexMap::new();

        for (country, leaders) in data {
            let mut out = Vec::with_capacity(leaders.len());
            for leader in leaders {
                // 沒有來源頁面就不打擾 extractor
                let intro = match leader.wikipedia_url.as_deref() {
                    Some(url) if !url.is_empty() => self.intro.extract_intro(url).await,
                    _ => None,
                };
                out.push(leader.enrich(intro));
            }
            tracing::info!("  - {}: {} leader(s)", country, out.len());
            enriched.insert(country, out);
        }

        Ok(enriched)
    }

    async fn load(&self, result: LeadersByCountry) -> Result<String> {
        let (file_name, bytes) = match self.config.format() {
            OutputFormat::Json => (JSON_FILE_NAME, render_json(&result)?),
            OutputFormat::Csv => (CSV_FILE_NAME, render_csv(&result)?),
        };

        tracing::debug!("Writing {} bytes to {}", bytes.len(), file_name);
        self.storage.write_file(file_name, &bytes).await?;

        Ok(format!("{}/{}", self.config.output_path(), file_name))
    }
}

/// Pretty-printed JSON of the whole mapping. serde_json leaves non-ASCII
/// characters unescaped, matching the output contract.
fn render_json(data: &LeadersByCountry) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(data)?)
}

/// One row per leader, missing fields as empty strings.
fn render_csv(data: &LeadersByCountry) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for (country, leaders) in data {
        for leader in leaders {
            writer.write_record([
                country.as_str(),
                leader.first_name.as_deref().unwrap_or(""),
                leader.last_name.as_deref().unwrap_or(""),
                leader.birth_date.as_deref().unwrap_or(""),
                leader.start_mandate.as_deref().unwrap_or(""),
                leader.end_mandate.as_deref().unwrap_or(""),
                leader.wikipedia_url.as_deref().unwrap_or(""),
                leader.intro_paragraph.as_deref().unwrap_or(""),
            ])?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| ScraperError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Session;
    use crate::domain::model::RawLeader;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScraperError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        root_url: String,
        format: OutputFormat,
    }

    impl MockConfig {
        fn new(root_url: String, format: OutputFormat) -> Self {
            Self { root_url, format }
        }
    }

    impl ConfigProvider for MockConfig {
        fn root_url(&self) -> &str {
            &self.root_url
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn format(&self) -> OutputFormat {
            self.format
        }

        fn min_intro_length(&self) -> usize {
            200
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    /// Intro source that counts invocations and returns a canned paragraph.
    struct CountingIntro {
        calls: Arc<AtomicUsize>,
        intro: Option<String>,
    }

    impl CountingIntro {
        fn new(intro: Option<String>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    intro,
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl IntroSource for CountingIntro {
        async fn extract_intro(&self, _url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.intro.clone()
        }
    }

    fn pipeline(
        server: &MockServer,
        format: OutputFormat,
        intro: CountingIntro,
    ) -> LeaderPipeline<MockStorage, MockConfig, CountingIntro> {
        let session = Session::acquire(&server.base_url(), Duration::from_secs(5)).unwrap();
        let api = LeaderApi::new(session, &server.base_url());
        let config = MockConfig::new(server.base_url(), format);
        LeaderPipeline::new(api, intro, MockStorage::new(), config)
    }

    fn raw_leader(first: &str, wikipedia_url: Option<&str>) -> RawLeader {
        RawLeader {
            first_name: Some(first.to_string()),
            last_name: Some("Test".to_string()),
            birth_date: Some("1900-01-01".to_string()),
            start_mandate: Some("1950-01-01".to_string()),
            end_mandate: None,
            wikipedia_url: wikipedia_url.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_extract_keeps_country_order_and_tolerates_per_country_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/countries");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!(["us", "xx", "ma"]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/leaders").query_param("country", "us");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"first_name": "George"}]));
        });
        // "xx" fails with a server error; it must not block the others.
        server.mock(|when, then| {
            when.method(GET).path("/leaders").query_param("country", "xx");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/leaders").query_param("country", "ma");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"first_name": "Hassan"}]));
        });

        let (intro, _) = CountingIntro::new(None);
        let pipeline = pipeline(&server, OutputFormat::Json, intro);

        let raw = pipeline.extract().await.unwrap();

        let countries: Vec<&String> = raw.keys().collect();
        assert_eq!(countries, vec!["us", "xx", "ma"]);
        assert_eq!(raw["us"].len(), 1);
        assert!(raw["xx"].is_empty());
        assert_eq!(raw["ma"].len(), 1);
    }

    #[tokio::test]
    async fn test_extract_fails_when_countries_listing_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/countries");
            then.status(500);
        });

        let (intro, _) = CountingIntro::new(None);
        let pipeline = pipeline(&server, OutputFormat::Json, intro);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ScraperError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_transform_skips_extractor_for_missing_or_empty_url() {
        let server = MockServer::start();
        let (intro, calls) = CountingIntro::new(Some("An intro.".to_string()));
        let pipeline = pipeline(&server, OutputFormat::Json, intro);

        let mut raw = IndexMap::new();
        raw.insert(
            "us".to_string(),
            vec![raw_leader("NoUrl", None), raw_leader("EmptyUrl", Some(""))],
        );

        let enriched = pipeline.transform(raw).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(enriched["us"][0].intro_paragraph, None);
        assert_eq!(enriched["us"][1].intro_paragraph, None);
    }

    #[tokio::test]
    async fn test_transform_attaches_intro_when_url_present() {
        let server = MockServer::start();
        let (intro, calls) = CountingIntro::new(Some("A long intro paragraph.".to_string()));
        let pipeline = pipeline(&server, OutputFormat::Json, intro);

        let mut raw = IndexMap::new();
        raw.insert(
            "us".to_string(),
            vec![raw_leader("George", Some("https://en.wikipedia.org/wiki/X"))],
        );

        let enriched = pipeline.transform(raw).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            enriched["us"][0].intro_paragraph.as_deref(),
            Some("A long intro paragraph.")
        );
    }

    #[tokio::test]
    async fn test_transform_enrichment_miss_yields_null_intro() {
        let server = MockServer::start();
        let (intro, calls) = CountingIntro::new(None);
        let pipeline = pipeline(&server, OutputFormat::Json, intro);

        let mut raw = IndexMap::new();
        raw.insert(
            "us".to_string(),
            vec![raw_leader("George", Some("https://en.wikipedia.org/wiki/X"))],
        );

        let enriched = pipeline.transform(raw).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(enriched["us"][0].intro_paragraph, None);
    }

    #[tokio::test]
    async fn test_load_json_round_trips() {
        let server = MockServer::start();
        let (intro, _) = CountingIntro::new(None);
        let pipeline = pipeline(&server, OutputFormat::Json, intro);
        let storage = pipeline.storage.clone();

        let mut data = IndexMap::new();
        data.insert(
            "ma".to_string(),
            vec![raw_leader("Hassan", Some("https://en.wikipedia.org/wiki/H"))
                .enrich(Some("Hassan était un roi.".to_string()))],
        );
        data.insert("us".to_string(), vec![]);

        let path = pipeline.load(data.clone()).await.unwrap();
        assert_eq!(path, format!("test_output/{}", JSON_FILE_NAME));

        let bytes = storage.get_file(JSON_FILE_NAME).await.unwrap();
        let parsed: LeadersByCountry = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, data);
        let countries: Vec<&String> = parsed.keys().collect();
        assert_eq!(countries, vec!["ma", "us"]);

        // Non-ASCII characters must survive literally, not as \u escapes.
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("était"));
        assert!(!text.contains("\\u00e9"));
    }

    #[tokio::test]
    async fn test_load_csv_column_order_and_empty_fields() {
        let server = MockServer::start();
        let (intro, _) = CountingIntro::new(None);
        let pipeline = pipeline(&server, OutputFormat::Csv, intro);
        let storage = pipeline.storage.clone();

        let mut data = IndexMap::new();
        data.insert(
            "us".to_string(),
            vec![RawLeader {
                first_name: Some("George".to_string()),
                last_name: Some("Washington".to_string()),
                birth_date: None,
                start_mandate: Some("1789-04-30".to_string()),
                end_mandate: None,
                wikipedia_url: None,
            }
            .enrich(None)],
        );

        let path = pipeline.load(data).await.unwrap();
        assert_eq!(path, format!("test_output/{}", CSV_FILE_NAME));

        let bytes = storage.get_file(CSV_FILE_NAME).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "country,first_name,last_name,birth_date,start_mandate,end_mandate,wikipedia_url,intro_paragraph"
        );
        assert_eq!(lines[1], "us,George,Washington,,1789-04-30,,,");
    }
}
