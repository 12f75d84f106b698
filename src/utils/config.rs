use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAIConfig,
    pub rag: RagConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When true, the ask endpoint omits the debug citation list.
    pub production: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub embed_batch_size: usize,
    pub embed_batch_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Directory of source PDFs for the offline ingest stage.
    pub documents_dir: String,
    /// Directory holding the index artifacts.
    pub index_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                production: env::var("APP_ENV")
                    .map(|v| v.eq_ignore_ascii_case("production"))
                    .unwrap_or(false),
            },
            openai: OpenAIConfig {
                api_key: env::var("OPENAI_API_KEY").ok(),
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                chat_model: env::var("CHAT_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                temperature: env::var("CHAT_TEMPERATURE")
                    .unwrap_or_else(|_| "0.2".to_string())
                    .parse()?,
                request_timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
            },
            rag: RagConfig {
                chunk_size: env::var("CHUNK_SIZE")
                    .unwrap_or_else(|_| "1200".to_string())
                    .parse()?,
                chunk_overlap: env::var("CHUNK_OVERLAP")
                    .unwrap_or_else(|_| "200".to_string())
                    .parse()?,
                top_k: env::var("TOP_K").unwrap_or_else(|_| "6".to_string()).parse()?,
                embed_batch_size: env::var("EMBED_BATCH_SIZE")
                    .unwrap_or_else(|_| "64".to_string())
                    .parse()?,
                embed_batch_delay_ms: env::var("EMBED_BATCH_DELAY_MS")
                    .unwrap_or_else(|_| "150".to_string())
                    .parse()?,
            },
            index: IndexConfig {
                documents_dir: env::var("DOCUMENTS_DIR")
                    .unwrap_or_else(|_| "data/pdfs".to_string()),
                index_dir: env::var("INDEX_DIR").unwrap_or_else(|_| "data/rag".to_string()),
            },
        })
    }
}
