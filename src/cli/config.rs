//! Effective configuration command

use norsk_lexicon::{error::Result, EngineConfig};

/// Print the configuration after file loading and `--source` merging
pub fn handle(config: &EngineConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
