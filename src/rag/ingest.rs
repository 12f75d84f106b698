//! Offline document ingestion.
//!
//! Walks a directory of PDFs in lexicographic order, extracts per-page
//! text, and emits chunk records with deterministic identities. Chunking
//! per page (rather than per document) keeps citations page-accurate.

use crate::rag::chunker::TextChunker;
use crate::types::{AppError, Chunk, Result};
use std::path::{Path, PathBuf};

/// Ingests every PDF under `dir` into an ordered chunk collection with
/// embeddings unset. Fails if the directory is missing or holds no PDFs;
/// nothing is written on failure.
pub fn ingest_dir(dir: &Path, chunker: &TextChunker) -> Result<Vec<Chunk>> {
    let files = pdf_files(dir)?;
    let mut chunks = Vec::new();

    for path in files {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let doc_id = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let pages = extract_page_texts(&path)?;
        let page_count = pages.len();
        let doc_chunks = chunks_from_pages(&doc_id, &filename, &pages, chunker);

        tracing::info!(
            file = %filename,
            chunks = doc_chunks.len(),
            pages = page_count,
            "indexed document"
        );
        chunks.extend(doc_chunks);
    }

    Ok(chunks)
}

/// Lists PDFs in deterministic (lexicographic filename) order.
fn pdf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::Ingestion(format!(
            "missing document directory: {}",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| AppError::Ingestion(format!("failed to read {}: {}", dir.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(AppError::Ingestion(format!(
            "no PDFs found in {}",
            dir.display()
        )));
    }

    Ok(files)
}

/// Extracts `(page_number, text)` pairs in page order, whitespace
/// collapsed. Pages that carry no extractable text (scanned images) come
/// back empty and are skipped downstream; pages the parser cannot decode
/// are skipped here with a warning.
pub fn extract_page_texts(path: &Path) -> Result<Vec<(u32, String)>> {
    let doc = lopdf::Document::load(path).map_err(|e| {
        AppError::Ingestion(format!("failed to load {}: {}", path.display(), e))
    })?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let text = match doc.extract_text(&[*page_number]) {
            Ok(text) => collapse_whitespace(&text),
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    page = page_number,
                    error = %e,
                    "skipping undecodable page"
                );
                String::new()
            }
        };
        pages.push((*page_number, text));
    }

    Ok(pages)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pure chunk assembly: one record per window, ids derived from
/// `(doc_id, page, chunk_index)` so identical corpora always produce
/// identical indexes. Pages with no text yield nothing.
pub fn chunks_from_pages(
    doc_id: &str,
    filename: &str,
    pages: &[(u32, String)],
    chunker: &TextChunker,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for (page, text) in pages {
        if text.is_empty() {
            continue;
        }
        for (idx, window) in chunker.chunk(text).into_iter().enumerate() {
            let chunk_index = idx as u32;
            chunks.push(Chunk {
                id: Chunk::make_id(doc_id, *page, chunk_index),
                doc_id: doc_id.to_string(),
                filename: filename.to_string(),
                page: *page,
                chunk_index,
                text: window,
                embedding: Vec::new(),
            });
        }
    }

    chunks
}
