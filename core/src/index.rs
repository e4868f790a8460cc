use crate::document::Chunk;
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// A single entry in a term's posting list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Position of the chunk within the index's chunk sequence.
    pub chunk: u32,
    /// Number of times the term appears in that chunk.
    pub term_frequency: u32,
}

/// Inverted index over a fixed chunk collection.
///
/// Built once per upload set and never mutated afterwards: a new upload set
/// produces a wholly new `Index` that replaces the old one. Because the
/// structure is read-only after `build`, concurrent queries need no
/// coordination.
#[derive(Debug)]
pub struct Index {
    /// The indexed chunks, positionally addressed by the posting lists.
    pub(crate) chunks: Vec<Chunk>,
    /// term → postings in ascending chunk-position order, at most one entry
    /// per chunk.
    pub(crate) postings: HashMap<String, Vec<Posting>>,
    /// chunk position → token count, floored at 1 so length normalization
    /// never divides by zero.
    pub(crate) lengths: Vec<u32>,
    /// term → smoothed inverse document frequency, precomputed at build
    /// time. Strictly positive for every indexed term.
    pub(crate) idf: HashMap<String, f32>,
    /// Total chunk count floored at 1, the idf smoothing denominator. The
    /// real collection size is `chunks.len()`.
    pub(crate) chunk_count: usize,
}

impl Index {
    /// Build an index from a chunk collection in a single pass.
    ///
    /// Total for every input: an empty collection yields a valid empty
    /// index, and a chunk with no extractable terms still occupies its
    /// position (with a length entry of 1) so posting positions stay
    /// aligned with the chunk sequence.
    pub fn build(chunks: Vec<Chunk>) -> Index {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut lengths: Vec<u32> = Vec::with_capacity(chunks.len());

        for (position, chunk) in chunks.iter().enumerate() {
            let tokens = tokenize(&chunk.text);
            lengths.push(tokens.len().max(1) as u32);

            let mut tf: HashMap<&str, u32> = HashMap::new();
            for token in &tokens {
                *tf.entry(token.as_str()).or_insert(0) += 1;
            }
            for (term, count) in tf {
                postings.entry(term.to_owned()).or_default().push(Posting {
                    chunk: position as u32,
                    term_frequency: count,
                });
            }
        }

        let chunk_count = chunks.len().max(1);
        let n = chunk_count as f32;
        let mut idf: HashMap<String, f32> = HashMap::with_capacity(postings.len());
        for (term, list) in &postings {
            let df = list.len() as f32;
            idf.insert(term.clone(), ((n + 1.0) / (df + 0.5)).ln() + 1.0);
        }

        tracing::debug!(
            chunks = chunks.len(),
            terms = postings.len(),
            "built inverted index"
        );

        Index {
            chunks,
            postings,
            lengths,
            idf,
            chunk_count,
        }
    }

    /// The indexed chunks, in input order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str, text: &str) -> Chunk {
        Chunk::new(id, "test.txt", text)
    }

    #[test]
    fn records_term_frequencies_per_chunk() {
        let index = Index::build(vec![chunk("a", "hello hello world")]);
        let postings = &index.postings["hello"];
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].chunk, 0);
        assert_eq!(postings[0].term_frequency, 2);
        assert_eq!(index.postings["world"][0].term_frequency, 1);
    }

    #[test]
    fn posting_lists_are_in_ascending_chunk_order() {
        let index = Index::build(vec![
            chunk("a", "rust programming"),
            chunk("b", "python scripting"),
            chunk("c", "rust systems"),
        ]);
        let positions: Vec<u32> = index.postings["rust"].iter().map(|p| p.chunk).collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn lengths_track_token_counts_floored_at_one() {
        let index = Index::build(vec![
            chunk("a", "one two three"),
            chunk("b", "!!! ??? ---"),
            chunk("c", ""),
        ]);
        assert_eq!(index.lengths, vec![3, 1, 1]);
        // Term-free chunks still occupy their positions.
        assert_eq!(index.chunks().len(), 3);
    }

    #[test]
    fn term_free_chunks_add_no_postings() {
        let index = Index::build(vec![chunk("a", "... !!! ...")]);
        assert_eq!(index.term_count(), 0);
        assert!(index.idf.is_empty());
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let index = Index::build(vec![
            chunk("a", "common rare"),
            chunk("b", "common"),
            chunk("c", "common"),
        ]);
        assert!(index.idf["rare"] > index.idf["common"]);
        // The smoothed formula stays strictly positive even for a term in
        // every chunk.
        assert!(index.idf["common"] > 0.0);
    }

    #[test]
    fn idf_follows_smoothed_formula() {
        let index = Index::build(vec![chunk("a", "alpha"), chunk("b", "beta")]);
        let expected = ((2.0f32 + 1.0) / (1.0 + 0.5)).ln() + 1.0;
        assert!((index.idf["alpha"] - expected).abs() < 1e-6);
    }

    #[test]
    fn empty_collection_builds_an_empty_index() {
        let index = Index::build(Vec::new());
        assert!(index.chunks().is_empty());
        assert!(index.postings.is_empty());
        assert!(index.idf.is_empty());
        assert_eq!(index.chunk_count, 1);
    }

    #[test]
    fn build_is_deterministic() {
        let chunks = vec![
            chunk("a", "the cat sat on the mat"),
            chunk("b", "the dog ran far"),
            chunk("c", "cat and dog play"),
        ];
        let first = Index::build(chunks.clone());
        let second = Index::build(chunks);
        assert_eq!(first.postings, second.postings);
        assert_eq!(first.lengths, second.lengths);
        assert_eq!(first.idf, second.idf);
        assert_eq!(first.chunk_count, second.chunk_count);
    }
}
