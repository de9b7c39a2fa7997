//! Question-answering server binary
//!
//! Run with: cargo run -p constitution-qa --bin constitution-qa-server

use constitution_qa::{config::QaConfig, server::QaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "constitution_qa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                    Constitution Q&A                       ║
║         Legal-text answers with article citations         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = QaConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Index: {} (namespace {})", config.vector.index_name, config.vector.namespace);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!(
        "  - top_k: default {}, max {}",
        config.retrieval.default_top_k,
        config.retrieval.max_top_k
    );
    tracing::info!(
        "  - Failure modes: retrieval {:?}, generation {:?}",
        config.retrieval.failure_mode,
        config.generation.failure_mode
    );

    // Create and start server
    let server = QaServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Health: http://{}/", server.address());
    println!("\nEndpoints:");
    println!("  POST /ask      - Ask a question");
    println!("  GET  /articles - Sample of indexed articles");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
