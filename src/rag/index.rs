//! Persistence for the embedded chunk corpus.
//!
//! Two artifacts live in the index directory, mirroring the two offline
//! stages: `index.json` (chunks without embeddings, written by ingest) and
//! `index.embedded.json` (the queryable corpus, written by embed). Every
//! save replaces the artifact wholesale via write-to-temp-then-rename, so
//! a reader never observes a half-written index.

use crate::types::{AppError, RagIndex, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const RAW_INDEX_FILE: &str = "index.json";
pub const EMBEDDED_INDEX_FILE: &str = "index.embedded.json";

#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn raw_path(&self) -> PathBuf {
        self.dir.join(RAW_INDEX_FILE)
    }

    pub fn embedded_path(&self) -> PathBuf {
        self.dir.join(EMBEDDED_INDEX_FILE)
    }

    /// Writes the unembedded index produced by ingestion.
    pub fn save_raw(&self, index: &RagIndex) -> Result<()> {
        self.write_atomic(&self.raw_path(), index)
    }

    /// Writes the embedded, queryable index.
    pub fn save_embedded(&self, index: &RagIndex) -> Result<()> {
        self.write_atomic(&self.embedded_path(), index)
    }

    /// Loads the raw index for the embed stage.
    pub fn load_raw(&self) -> Result<RagIndex> {
        self.read(&self.raw_path(), "run `sourcewell-server ingest` first")
    }

    /// Loads the embedded index for query serving.
    pub fn load(&self) -> Result<RagIndex> {
        self.read(
            &self.embedded_path(),
            "run `sourcewell-server ingest` and `embed` first",
        )
    }

    fn write_atomic(&self, path: &Path, index: &RagIndex) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Io(format!("failed to create {}: {}", self.dir.display(), e)))?;

        let json = serde_json::to_vec_pretty(index)
            .map_err(|e| AppError::Internal(format!("failed to serialize index: {}", e)))?;

        let tmp = path.with_file_name(format!(
            "{}.tmp",
            path.file_name().and_then(|n| n.to_str()).unwrap_or("index")
        ));
        fs::write(&tmp, &json)
            .map_err(|e| AppError::Io(format!("failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| AppError::Io(format!("failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }

    fn read(&self, path: &Path, hint: &str) -> Result<RagIndex> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::IndexNotFound(format!(
                    "no index at {} ({})",
                    path.display(),
                    hint
                )));
            }
            Err(e) => {
                return Err(AppError::Io(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("corrupt index at {}: {}", path.display(), e)))
    }
}
