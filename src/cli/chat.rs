//! Interactive chat session
//!
//! Reads one query per line from stdin and prints the reply, the way the
//! widget shows a bot bubble. Supplementary dictionaries keep loading in the
//! background while the session runs.

use super::helpers::start_engine;
use norsk_lexicon::{error::Result, EngineConfig, EngineHandle};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Run the chat loop until EOF or `quit`
pub async fn handle(config: EngineConfig) -> Result<()> {
    let (engine, loading) = start_engine(config)?;

    println!();
    println!("Норвежский помощник");
    println!("Type a word or phrase; 'stats' shows counters, 'quit' exits.");
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "stats" => println!("{}", engine.stats()),
            query => reply(&engine, query),
        }
    }

    loading.abort();
    info!("Chat session ended");
    Ok(())
}

fn reply(engine: &EngineHandle, query: &str) {
    if let Some(text) = engine.resolve(query) {
        println!("{}", text);
    }
}
