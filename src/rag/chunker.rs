//! Character-window text chunking.
//!
//! Splits normalized page text into overlapping fixed-size character windows.
//! Overlap preserves local context across chunk boundaries without needing
//! sentence or token segmentation.

use crate::types::{AppError, Result};

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1200;
/// Default overlap between adjacent windows.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Creates a chunker. `overlap` must be strictly less than `size` or
    /// the window walk would never advance.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::InvalidInput("chunk size must be non-zero".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(AppError::InvalidInput(format!(
                "chunk overlap {} must be smaller than chunk size {}",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let clean: Vec<char> = normalize(text).chars().collect();
        if clean.is_empty() {
            return Vec::new();
        }

        let step = self.chunk_size - self.chunk_overlap;
        let mut chunks = Vec::new();
        let mut i = 0;
        while i < clean.len() {
            let end = (i + self.chunk_size).min(clean.len());
            chunks.push(clean[i..end].iter().collect());
            i += step;
        }
        chunks
    }
}

/// Normalizes extracted page text: carriage returns removed, runs of spaces
/// and tabs collapsed to a single space, runs of 3+ newlines collapsed to
/// exactly two, leading/trailing whitespace trimmed.
pub fn normalize(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        match c {
            '\r' => {}
            ' ' | '\t' => {
                if !prev_space {
                    collapsed.push(' ');
                }
                prev_space = true;
            }
            other => {
                collapsed.push(other);
                prev_space = false;
            }
        }
    }

    let mut out = String::with_capacity(collapsed.len());
    let mut newline_run = 0usize;
    for c in collapsed.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push('\n');
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }

    out.trim().to_string()
}
