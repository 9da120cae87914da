//! HTTP API server command

use super::helpers::{start_engine, wait_for};
use norsk_lexicon::{
    api::{ApiServer, ApiServerConfig},
    error::{LexiconError, Result},
    EngineConfig,
};
use std::net::SocketAddr;
use tracing::{debug, warn};

/// Serve the widget API; supplementary dictionaries register while serving
pub async fn handle(config: EngineConfig, addr: &str) -> Result<()> {
    let socket_addr: SocketAddr = addr
        .parse()
        .map_err(|e| LexiconError::Config(format!("Invalid address '{}': {}", addr, e)))?;

    let (engine, loading) = start_engine(config)?;
    tokio::spawn(async move {
        match wait_for(loading).await {
            Ok(report) => debug!(
                registered = report.registered(),
                failed = report.failed(),
                "Supplementary loading complete"
            ),
            Err(e) => warn!("{}", e),
        }
    });

    println!();
    println!("Norsk Lexicon API");
    println!();
    println!("   Address: http://{}", socket_addr);
    println!();
    println!("   Endpoints:");
    println!("   • POST   /api/resolve            - Resolve a chat query");
    println!("   • GET    /api/random-word        - Random vocabulary word");
    println!("   • GET    /api/stats              - Engine counters");
    println!("   • GET    /api/dictionaries       - Registered dictionaries");
    println!("   • PUT    /api/dictionaries/:name - Register a dictionary");
    println!("   • DELETE /api/cache              - Clear the result cache");
    println!("   • GET    /health                 - Health check");
    println!();

    let server = ApiServer::new(ApiServerConfig { addr: socket_addr }, engine);
    server.serve().await?;
    Ok(())
}
