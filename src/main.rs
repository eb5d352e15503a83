use std::sync::Arc;

use clap::{Parser, Subcommand};

use folio::analyzer::standard_analyzer;
use folio::api::create_router;
use folio::client::SearchClient;
use folio::config::CONFIG;
use folio::corpus::Corpus;
use folio::index::CorpusIndex;
use folio::query_engine::QueryEngine;

#[derive(Parser)]
#[command(name = "folio", about = "Full-text search over a plain-text corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index the corpus and serve the search API and UI
    Serve,
    /// Submit a query to a running server and print the rendered result list
    Search {
        query: String,
        #[arg(long, default_value = "http://localhost:3001")]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve => serve().await,
        Command::Search { query, endpoint } => search(&query, &endpoint).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let corpus = Corpus::load(&CONFIG.corpus_path)?;
    let analyzer = standard_analyzer(CONFIG.stop_words, CONFIG.stemming);
    let index = CorpusIndex::build(&corpus, &analyzer, CONFIG.ngram_window)?;
    let query_engine = Arc::new(QueryEngine::new(corpus, index, analyzer));

    let router = create_router(query_engine, &CONFIG.static_dir);
    let addr = format!("{}:{}", CONFIG.host, CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on port {}...", CONFIG.port);
    axum::serve(listener, router).await?;
    Ok(())
}

async fn search(query: &str, endpoint: &str) -> anyhow::Result<()> {
    let client = SearchClient::new(endpoint);
    client.submit(query).await?;
    println!("{}", client.pane().inner_html());
    Ok(())
}
