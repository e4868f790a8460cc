//! Document question-answering retrieval: chunking, inverted indexing, and
//! tf-idf ranked lookup over an in-memory document library.

pub mod document;
pub mod index;
pub mod retrieve;
pub mod session;
pub mod tokenizer;

pub use document::{chunk_documents, chunk_text, Chunk, Document, CHUNK_OVERLAP, CHUNK_SIZE};
pub use index::{Index, Posting};
pub use retrieve::{retrieve, ScoredChunk, DEFAULT_TOP_K};
pub use session::Session;
