use crate::document::{chunk_documents, Document};
use crate::index::Index;
use crate::retrieve::{retrieve, ScoredChunk};

/// Holds one loaded document set and the index built over it.
///
/// Loading is wholesale replacement: each call to [`Session::load_documents`]
/// discards the previous library and index together, so queries never see a
/// half-updated state. A fresh or cleared session answers every query with
/// no results.
#[derive(Debug, Default)]
pub struct Session {
    documents: Vec<Document>,
    index: Option<Index>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Replace the loaded library with `documents` and rebuild the index.
    ///
    /// Documents with no readable text are dropped. Returns the number of
    /// chunks indexed, which is zero when every document was blank.
    pub fn load_documents(&mut self, documents: Vec<Document>) -> usize {
        let documents: Vec<Document> = documents
            .into_iter()
            .filter(|doc| !doc.text.trim().is_empty())
            .collect();
        let chunks = chunk_documents(&documents);
        let chunk_count = chunks.len();

        tracing::info!(
            documents = documents.len(),
            chunks = chunk_count,
            "loaded document library"
        );

        self.index = Some(Index::build(chunks));
        self.documents = documents;
        chunk_count
    }

    /// Drop the loaded library and index.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.index = None;
        tracing::info!("cleared document library");
    }

    /// Answer `query` against the loaded index, best matches first.
    pub fn query(&self, query: &str, top_k: usize) -> Vec<ScoredChunk> {
        match &self.index {
            Some(index) => retrieve(index, query, top_k),
            None => Vec::new(),
        }
    }

    /// The retained documents, in load order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of chunks in the current index, zero when nothing is loaded.
    pub fn chunk_count(&self) -> usize {
        self.index.as_ref().map_or(0, |index| index.chunks().len())
    }

    /// Number of distinct terms in the current index, zero when nothing is
    /// loaded.
    pub fn term_count(&self) -> usize {
        self.index.as_ref().map_or(0, |index| index.term_count())
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }
}
