//! Random vocabulary word command

use super::helpers::start_engine_loaded;
use norsk_lexicon::{error::Result, EngineConfig};

pub async fn handle(config: EngineConfig) -> Result<()> {
    let engine = start_engine_loaded(config).await?;
    println!("{}", engine.random_word());
    Ok(())
}
