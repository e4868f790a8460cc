use crate::index::Index;
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::cmp::Ordering;

/// Result count used when the caller does not ask for a specific limit.
pub const DEFAULT_TOP_K: usize = 6;

/// A chunk returned from a query, paired with its relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    pub id: String,
    pub filename: String,
    pub text: String,
    pub page: Option<u32>,
    pub score: f32,
}

/// Score every indexed chunk against `query` and return the best `top_k`
/// in descending score order.
///
/// Each query-term occurrence adds `(tf / length) * idf` to the chunks
/// containing the term, so repeating a term in the query amplifies its
/// weight proportionally. Chunks sharing no term with the query score zero
/// and are excluded. Ties are broken by chunk position, earlier first, so
/// equal-scoring results keep their document order. A `top_k` of zero is
/// treated as one.
pub fn retrieve(index: &Index, query: &str, top_k: usize) -> Vec<ScoredChunk> {
    let mut scores = vec![0.0f32; index.chunks.len()];

    for term in tokenize(query) {
        let Some(list) = index.postings.get(&term) else {
            continue;
        };
        let idf = index.idf.get(&term).copied().unwrap_or(1.0);
        for posting in list {
            let position = posting.chunk as usize;
            let tf = posting.term_frequency as f32;
            scores[position] += (tf / index.lengths[position] as f32) * idf;
        }
    }

    let mut ranked: Vec<(usize, f32)> = scores
        .into_iter()
        .enumerate()
        .filter(|(_, score)| *score > 0.0)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(top_k.max(1));

    ranked
        .into_iter()
        .map(|(position, score)| {
            let chunk = &index.chunks[position];
            ScoredChunk {
                id: chunk.id.clone(),
                filename: chunk.filename.clone(),
                text: chunk.text.clone(),
                page: chunk.page,
                score,
            }
        })
        .collect()
}
