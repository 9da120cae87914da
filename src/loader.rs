//! Supplementary dictionary loading
//!
//! Extra dictionaries come from JSON documents on disk or behind an http(s)
//! URL. Loading runs in the background: queries keep resolving against
//! whatever is registered at that instant, and a source that fails to load is
//! logged and skipped without touching anything already registered.

use crate::config::SupplementaryConfig;
use crate::engine::EngineHandle;
use crate::error::{LexiconError, Result};
use crate::types::Dictionary;
use reqwest::Url;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where a dictionary document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    File(PathBuf),
    Url(Url),
}

impl DictionarySource {
    /// `http://` and `https://` strings are URLs, anything else is a path
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(LexiconError::InvalidSource("empty source".to_string()));
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            let url = Url::parse(source)
                .map_err(|e| LexiconError::InvalidSource(format!("{}: {}", source, e)))?;
            return Ok(Self::Url(url));
        }

        if source.contains("://") {
            return Err(LexiconError::InvalidSource(format!(
                "unsupported scheme: {}",
                source
            )));
        }

        Ok(Self::File(PathBuf::from(source)))
    }

    /// Registration name: the file name without its `.json` extension
    pub fn name(&self) -> String {
        let file_name = match self {
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Url(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .or_else(|| url.host_str().map(str::to_string))
                .unwrap_or_default(),
        };

        file_name
            .strip_suffix(".json")
            .map(str::to_string)
            .unwrap_or(file_name)
    }
}

impl FromStr for DictionarySource {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches and parses dictionary documents
#[derive(Debug, Clone)]
pub struct DictionaryLoader {
    client: reqwest::Client,
}

impl DictionaryLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("norsk-lexicon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one document and parse it leniently
    pub async fn fetch(&self, source: &DictionarySource) -> Result<Dictionary> {
        let body = match source {
            DictionarySource::File(path) => read_file(path).await?,
            DictionarySource::Url(url) => {
                self.client
                    .get(url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?
            }
        };

        Dictionary::from_json_str(&body).map_err(|e| LexiconError::DictionaryLoad {
            name: source.name(),
            reason: e.to_string(),
        })
    }
}

async fn read_file(path: &Path) -> Result<String> {
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Result of loading one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Registered {
        name: String,
        source: String,
        translations: usize,
        vocabulary: usize,
    },
    Failed {
        name: String,
        source: String,
        error: String,
    },
}

impl LoadOutcome {
    pub fn name(&self) -> &str {
        match self {
            LoadOutcome::Registered { name, .. } | LoadOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, LoadOutcome::Registered { .. })
    }
}

/// Outcome of one background loading run, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    pub fn registered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_registered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.registered()
    }
}

/// Load each source in order, registering the ones that succeed
pub async fn load_into(
    handle: &EngineHandle,
    loader: &DictionaryLoader,
    sources: &[String],
) -> LoadReport {
    let mut report = LoadReport::default();

    for raw in sources {
        let source = match DictionarySource::parse(raw) {
            Ok(source) => source,
            Err(e) => {
                warn!(source = %raw, error = %e, "Skipping supplementary dictionary");
                report.outcomes.push(LoadOutcome::Failed {
                    name: raw.clone(),
                    source: raw.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let name = source.name();
        debug!(dictionary = %name, %source, "Loading supplementary dictionary");

        match loader.fetch(&source).await {
            Ok(dictionary) => {
                let translations = dictionary.translation_count();
                let vocabulary = dictionary.vocabulary_count();
                handle.register(name.clone(), dictionary);
                report.outcomes.push(LoadOutcome::Registered {
                    name,
                    source: source.to_string(),
                    translations,
                    vocabulary,
                });
            }
            Err(e) => {
                warn!(dictionary = %name, %source, error = %e, "Failed to load supplementary dictionary");
                report.outcomes.push(LoadOutcome::Failed {
                    name,
                    source: source.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        registered = report.registered(),
        failed = report.failed(),
        "Supplementary loading finished"
    );
    report
}

/// Start loading the configured sources on a background task
///
/// The returned handle resolves to the [`LoadReport`]; nobody has to await
/// it for the dictionaries to become available.
pub fn spawn_supplementary(
    handle: EngineHandle,
    config: &SupplementaryConfig,
) -> Result<JoinHandle<LoadReport>> {
    let loader = DictionaryLoader::new(config.timeout())?;
    let sources = config.sources.clone();
    let delay = config.delay();

    Ok(tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        load_into(&handle, &loader, &sources).await
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::LexiconEngine;
    use axum::routing::get;
    use axum::Router;
    use std::fs;

    fn empty_handle() -> EngineHandle {
        EngineHandle::new(LexiconEngine::with_seed(EngineConfig::default(), 3))
    }

    fn loader() -> DictionaryLoader {
        DictionaryLoader::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_sources() {
        assert!(matches!(
            DictionarySource::parse("dictionaries/norwegian-verbs.json").unwrap(),
            DictionarySource::File(_)
        ));
        assert!(matches!(
            DictionarySource::parse("https://example.org/db/norwegian-phrases.json").unwrap(),
            DictionarySource::Url(_)
        ));
        assert!(DictionarySource::parse("   ").is_err());
        assert!(DictionarySource::parse("ftp://example.org/x.json").is_err());
    }

    #[test]
    fn test_source_names() {
        let name = |s: &str| DictionarySource::parse(s).unwrap().name();
        assert_eq!(name("norwegian-verbs.json"), "norwegian-verbs");
        assert_eq!(name("/srv/data/norwegian-idioms.json"), "norwegian-idioms");
        assert_eq!(name("grammar"), "grammar");
        assert_eq!(name("https://example.org/db/norwegian-phrases.json"), "norwegian-phrases");
        assert_eq!(name("https://example.org/"), "example.org");
    }

    #[tokio::test]
    async fn test_load_files_and_isolate_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("norwegian-verbs.json");
        fs::write(&good, r#"{"translations": {"читать": "å lese"}}"#).unwrap();
        let broken = dir.path().join("norwegian-broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let missing = dir.path().join("norwegian-missing.json");
        let partial = dir.path().join("norwegian-partial.json");
        fs::write(&partial, r#"{"vocabulary": {"verbs": {"å se": "видеть"}}, "translations": 5}"#).unwrap();

        let handle = empty_handle();
        handle.register("main", Dictionary::default().with_translation("кот", "katt"));

        let sources: Vec<String> = [&good, &broken, &missing, &partial]
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        let report = load_into(&handle, &loader(), &sources).await;

        assert_eq!(report.registered(), 2);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.outcomes[1].name(), "norwegian-broken");
        assert!(!report.outcomes[2].is_registered());

        assert_eq!(
            handle.list_dictionaries(),
            vec!["main", "norwegian-verbs", "norwegian-partial"]
        );
        assert_eq!(handle.resolve("кот").as_deref(), Some("кот → katt"));
        assert_eq!(handle.resolve("читать").as_deref(), Some("читать → å lese"));
        assert_eq!(handle.resolve("å se").as_deref(), Some("å se → видеть (verbs)"));
    }

    #[tokio::test]
    async fn test_invalid_source_is_reported() {
        let handle = empty_handle();
        let report = load_into(&handle, &loader(), &["gopher://old/thing.json".to_string()]).await;
        assert_eq!(report.failed(), 1);
        assert!(handle.list_dictionaries().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let app = Router::new()
            .route(
                "/db/norwegian-phrases.json",
                get(|| async { r#"{"translations": {"книга": "bok"}}"# }),
            )
            .route(
                "/db/norwegian-grammar.json",
                get(|| async { (axum::http::StatusCode::NOT_FOUND, "missing") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let handle = empty_handle();
        let sources = vec![
            format!("http://{}/db/norwegian-phrases.json", addr),
            format!("http://{}/db/norwegian-grammar.json", addr),
        ];
        let report = load_into(&handle, &loader(), &sources).await;

        assert_eq!(report.registered(), 1);
        assert_eq!(report.outcomes[1].name(), "norwegian-grammar");
        assert_eq!(handle.resolve("книга").as_deref(), Some("книга → bok"));
    }

    #[tokio::test]
    async fn test_spawn_supplementary_reports_through_join_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("norwegian-verbs.json");
        fs::write(&path, r#"{"translations": {"спать": "å sove"}}"#).unwrap();

        let handle = empty_handle();
        let config = SupplementaryConfig {
            sources: vec![path.display().to_string()],
            delay_ms: 10,
            timeout_secs: 5,
        };

        let task = spawn_supplementary(handle.clone(), &config).unwrap();
        // Queries issued before the load completes see what is registered now
        assert!(handle.lookup("спать").is_empty());

        let report = task.await.unwrap();
        assert_eq!(report.registered(), 1);
        assert_eq!(handle.resolve("спать").as_deref(), Some("спать → å sove"));
    }
}
