//! Exhaustive-scan nearest-neighbor retrieval.
//!
//! Every query scores every indexed chunk; the corpus is assumed small
//! enough (a few thousand chunks) that O(n) cosine ranking beats carrying
//! an index structure.

use crate::types::Chunk;

/// A retrieval hit. Ephemeral: borrows the indexed chunk, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f32,
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

/// Normalized dot product. The epsilon keeps a zero vector from dividing
/// by zero (it scores ~0 against everything instead).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    dot(a, b) / (norm(a) * norm(b) + 1e-12)
}

/// Ranks all chunks by cosine similarity to the query vector and returns
/// the top `k`, highest first. The sort is stable, so equal scores keep
/// their corpus order and identical inputs always produce identical output.
pub fn retrieve_top_k<'a>(query: &[f32], chunks: &'a [Chunk], k: usize) -> Vec<ScoredChunk<'a>> {
    let mut scored: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .map(|chunk| ScoredChunk {
            chunk,
            score: cosine_similarity(query, &chunk.embedding),
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Chunk;

    fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
        Chunk {
            id: id.to_string(),
            doc_id: id.to_string(),
            filename: format!("{}.pdf", id),
            page: 1,
            chunk_index: 0,
            text: format!("text for {}", id),
            embedding,
        }
    }

    #[test]
    fn cosine_of_self_is_one() {
        let v = vec![0.3, -1.2, 4.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-0.5, 0.25, 2.0];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_does_not_divide_by_zero() {
        let zero = vec![0.0, 0.0];
        let v = vec![1.0, 1.0];
        let score = cosine_similarity(&zero, &v);
        assert!(score.is_finite());
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn results_are_sorted_descending() {
        let chunks = vec![
            chunk("far", vec![-1.0, 0.0]),
            chunk("near", vec![1.0, 0.0]),
            chunk("mid", vec![1.0, 1.0]),
        ];
        let query = vec![1.0, 0.0];
        let top = retrieve_top_k(&query, &chunks, 3);
        let ids: Vec<&str> = top.iter().map(|s| s.chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn ties_keep_corpus_order() {
        let chunks = vec![
            chunk("a", vec![1.0, 0.0]),
            chunk("b", vec![2.0, 0.0]),
            chunk("c", vec![0.5, 0.0]),
        ];
        // All three point the same direction, so every score ties at 1.0.
        let top = retrieve_top_k(&[3.0, 0.0], &chunks, 3);
        let ids: Vec<&str> = top.iter().map(|s| s.chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn k_larger_than_corpus_returns_everything() {
        let chunks = vec![chunk("a", vec![1.0, 0.0]), chunk("b", vec![0.0, 1.0])];
        let top = retrieve_top_k(&[1.0, 0.5], &chunks, 10);
        assert_eq!(top.len(), 2);
        assert!(top[0].score >= top[1].score);
    }

    #[test]
    fn k_zero_returns_nothing() {
        let chunks = vec![chunk("a", vec![1.0, 0.0])];
        assert!(retrieve_top_k(&[1.0, 0.0], &chunks, 0).is_empty());
    }

    #[test]
    fn identical_input_is_deterministic() {
        let chunks: Vec<Chunk> = (0..20)
            .map(|i| chunk(&format!("c{}", i), vec![(i % 5) as f32, 1.0]))
            .collect();
        let query = vec![2.0, 1.0];
        let first: Vec<String> = retrieve_top_k(&query, &chunks, 6)
            .iter()
            .map(|s| s.chunk.id.clone())
            .collect();
        let second: Vec<String> = retrieve_top_k(&query, &chunks, 6)
            .iter()
            .map(|s| s.chunk.id.clone())
            .collect();
        assert_eq!(first, second);
    }
}
