//! Single query command

use super::helpers::start_engine_loaded;
use norsk_lexicon::{error::Result, EngineConfig};
use tracing::debug;

/// Resolve one query and print the reply
pub async fn handle(config: EngineConfig, query: String) -> Result<()> {
    let engine = start_engine_loaded(config).await?;

    match engine.resolve_detailed(&query) {
        Some(resolution) => {
            debug!(?resolution, "Resolved query");
            if let Some(reply) = resolution.response() {
                println!("{}", reply);
            }
        }
        None => debug!("Empty query, nothing to resolve"),
    }

    Ok(())
}
