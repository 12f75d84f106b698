use anyhow::Context;
use clap::Parser;
use sourcewell::{
    api::routes::create_router,
    cli::{output::Output, Cli, Commands},
    llm::{ChatClient, EmbeddingClient},
    rag::ingest::ingest_dir,
    types::RagIndex,
    AnswerEngine, AppState, BatchPolicy, Config, Embedder, IndexStore, OpenAIClient, TextChunker,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sourcewell=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Ingest => run_ingest(&config, &out),
        Commands::Embed => run_embed(&config, &out).await,
        Commands::Serve => run_serve(config).await,
    }
}

/// Offline stage 1: PDFs -> raw index artifact (chunks without embeddings).
fn run_ingest(config: &Config, out: &Output) -> anyhow::Result<()> {
    let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
    let store = IndexStore::new(&config.index.index_dir);

    out.info(&format!("ingesting PDFs from {}", config.index.documents_dir));
    let chunks = ingest_dir(Path::new(&config.index.documents_dir), &chunker)?;
    let count = chunks.len();

    let index = RagIndex {
        created_at: chrono::Utc::now(),
        chunks,
    };
    store.save_raw(&index)?;

    out.success(&format!(
        "wrote {} ({} chunks)",
        store.raw_path().display(),
        count
    ));
    Ok(())
}

/// Offline stage 2: raw index -> embedded index. Aborts without touching
/// the prior embedded artifact if any batch fails.
async fn run_embed(config: &Config, out: &Output) -> anyhow::Result<()> {
    let store = IndexStore::new(&config.index.index_dir);
    let raw = store.load_raw()?;
    let count = raw.chunks.len();
    out.info(&format!("embedding {} chunks", count));

    let client: Arc<dyn EmbeddingClient> = Arc::new(OpenAIClient::new(&config.openai)?);
    let embedder = Embedder::with_policy(
        client,
        BatchPolicy {
            batch_size: config.rag.embed_batch_size,
            batch_delay: Duration::from_millis(config.rag.embed_batch_delay_ms),
        },
    );

    let embedded = embedder.embed_index(raw).await?;
    store.save_embedded(&embedded)?;

    out.success(&format!(
        "wrote {} ({} chunks)",
        store.embedded_path().display(),
        count
    ));
    Ok(())
}

async fn run_serve(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(OpenAIClient::new(&config.openai)?);
    let chat: Arc<dyn ChatClient> = client.clone();
    let embeddings: Arc<dyn EmbeddingClient> = client;

    let engine = AnswerEngine::new(
        IndexStore::new(&config.index.index_dir),
        Embedder::new(embeddings),
        chat,
    )
    .with_top_k(config.rag.top_k);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        engine: Arc::new(engine),
    };

    let app = create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
