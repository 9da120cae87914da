//! Engine statistics command

use super::helpers::start_engine_loaded;
use norsk_lexicon::{
    error::{LexiconError, Result},
    EngineConfig, LexiconStats,
};

/// Print dictionary, index and cache counters
pub async fn handle(config: EngineConfig, format: &str) -> Result<()> {
    let engine = start_engine_loaded(config).await?;
    let stats = engine.stats();
    println!("{}", render(&stats, &engine.list_dictionaries(), format)?);
    Ok(())
}

fn render(stats: &LexiconStats, dictionaries: &[String], format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "dictionaries": dictionaries,
            "stats": stats,
        }))?),
        "text" => Ok(format!("{}\nLoaded:        {}", stats, dictionaries.join(", "))),
        other => Err(LexiconError::Other(format!(
            "Unknown format '{}', expected text or json",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> LexiconStats {
        LexiconStats {
            dictionary_count: 2,
            translation_count: 40,
            vocabulary_count: 23,
            conversation_count: 9,
            index_size: 95,
            cache_size: 0,
        }
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let out = render(&stats(), &["main".to_string()], "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"]["indexSize"], 95);
        assert_eq!(value["dictionaries"][0], "main");
    }

    #[test]
    fn test_render_text() {
        let out = render(&stats(), &["main".to_string(), "extra".to_string()], "text").unwrap();
        assert!(out.contains("Translations:  40"));
        assert!(out.ends_with("main, extra"));
    }

    #[test]
    fn test_render_unknown_format() {
        let err = render(&stats(), &[], "yaml").unwrap_err();
        assert!(err.to_string().contains("Unknown format"));
    }
}
