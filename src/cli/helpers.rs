//! Shared helper functions for CLI commands
//!
//! Configuration discovery, engine startup and supplementary loading.

use anyhow::Context;
use norsk_lexicon::{
    error::{LexiconError, Result},
    loader, EngineConfig, EngineHandle, LexiconEngine, LoadReport,
};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "norsk-lexicon.toml";

/// Load configuration from the given file, the default file, or defaults
///
/// Sources passed on the command line are appended to the configured ones.
pub fn load_config(
    path: Option<&Path>,
    extra_sources: &[String],
) -> anyhow::Result<EngineConfig> {
    let mut config = match config_path(path) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            EngineConfig::from_file(&path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    config
        .supplementary
        .sources
        .extend(extra_sources.iter().cloned());
    config
        .validate()
        .context("Invalid configuration after applying --source")?;
    Ok(config)
}

fn config_path(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    }
}

/// Bootstrap the engine and start loading supplementary dictionaries
pub fn start_engine(config: EngineConfig) -> Result<(EngineHandle, JoinHandle<LoadReport>)> {
    let supplementary = config.supplementary.clone();
    let handle = EngineHandle::new(LexiconEngine::bootstrap(config)?);
    let loading = loader::spawn_supplementary(handle.clone(), &supplementary)?;
    Ok((handle, loading))
}

/// Bootstrap the engine and wait until every supplementary source is processed
///
/// One-shot commands answer against the complete dictionary set.
pub async fn start_engine_loaded(config: EngineConfig) -> Result<EngineHandle> {
    let (handle, loading) = start_engine(config)?;
    let report = wait_for(loading).await?;
    if !report.outcomes.is_empty() {
        info!(
            "Supplementary dictionaries: {} registered, {} failed",
            report.registered(),
            report.failed()
        );
    }
    Ok(handle)
}

pub async fn wait_for(loading: JoinHandle<LoadReport>) -> Result<LoadReport> {
    loading
        .await
        .map_err(|e| LexiconError::Other(format!("supplementary loading task failed: {}", e)))
}
