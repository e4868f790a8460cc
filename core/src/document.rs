use serde::{Deserialize, Serialize};

/// Characters per chunk window.
pub const CHUNK_SIZE: usize = 900;

/// Characters shared between consecutive windows, so text near a window
/// boundary appears whole in at least one chunk.
pub const CHUNK_OVERLAP: usize = 120;

/// A source document with its already-decoded text. Extraction from binary
/// formats happens upstream; by the time a `Document` exists the text is
/// plain UTF-8.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub text: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// A unit of retrievable text: one character window of one document.
///
/// `id` is stable across rebuilds of the same input set. `page` is a 1-based
/// page number carried only for paginated source formats; the plain-text
/// chunker leaves it absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub filename: String,
    pub text: String,
    pub page: Option<u32>,
}

impl Chunk {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            text: text.into(),
            page: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

/// Split trimmed text into windows of `size` characters, each overlapping
/// the previous one by `overlap` characters. The final window is clipped at
/// the end of the text. Blank text (or a zero `size`) yields no windows.
///
/// Window boundaries are character boundaries, never byte offsets inside a
/// UTF-8 code point.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || size == 0 {
        return Vec::new();
    }

    // Byte offset of every character plus an end sentinel, so windows can be
    // sliced by character position.
    let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    let total = bounds.len() - 1;

    let mut windows = Vec::new();
    let mut start = 0usize;
    while start < total {
        let end = (start + size).min(total);
        windows.push(text[bounds[start]..bounds[end]].to_owned());
        if end == total {
            break;
        }
        // Step back by the overlap, but always advance by at least one
        // character so the loop terminates even when overlap >= size.
        start = end.saturating_sub(overlap).max(start + 1);
    }
    windows
}

/// Chunk each document in order with the default window geometry.
///
/// Chunk ids are `"{filename}__chunk_{index:04}"` with a per-document
/// running index. Documents with no usable text contribute no chunks but are
/// otherwise ignored here; filtering the library is the session's job.
pub fn chunk_documents(documents: &[Document]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for doc in documents {
        for (i, window) in chunk_text(&doc.text, CHUNK_SIZE, CHUNK_OVERLAP)
            .into_iter()
            .enumerate()
        {
            chunks.push(Chunk {
                id: format!("{}__chunk_{:04}", doc.filename, i),
                filename: doc.filename.clone(),
                text: window,
                page: None,
            });
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_window() {
        let windows = chunk_text("hello world", 900, 120);
        assert_eq!(windows, vec!["hello world"]);
    }

    #[test]
    fn blank_text_yields_nothing() {
        assert!(chunk_text("", 900, 120).is_empty());
        assert!(chunk_text("   \n\t  ", 900, 120).is_empty());
        assert!(chunk_text("hello", 0, 0).is_empty());
    }

    #[test]
    fn windows_overlap_and_cover_the_text() {
        let windows = chunk_text("abcdefghij", 5, 2);
        assert_eq!(windows, vec!["abcde", "defgh", "ghij"]);
    }

    #[test]
    fn leading_and_trailing_whitespace_is_trimmed() {
        let windows = chunk_text("  abc  ", 10, 2);
        assert_eq!(windows, vec!["abc"]);
    }

    #[test]
    fn never_splits_multibyte_characters() {
        let text = "é".repeat(20);
        let windows = chunk_text(&text, 7, 3);
        assert!(!windows.is_empty());
        for w in &windows {
            assert!(w.chars().all(|c| c == 'é'));
            assert!(w.chars().count() <= 7);
        }
        assert_eq!(windows.last().map(|w| w.chars().count()), Some(4));
    }

    #[test]
    fn terminates_when_overlap_exceeds_size() {
        let windows = chunk_text("abcdefghij", 3, 5);
        assert!(!windows.is_empty());
        assert!(windows.last().unwrap().ends_with('j'));
    }

    #[test]
    fn chunk_ids_are_stable_and_zero_padded() {
        let docs = vec![Document::new("notes.txt", "abcdefghij")];
        let first: Vec<String> = chunk_documents(&docs).into_iter().map(|c| c.id).collect();
        let second: Vec<String> = chunk_documents(&docs).into_iter().map(|c| c.id).collect();
        assert_eq!(first, second);

        let chunks = chunk_documents(&docs);
        assert_eq!(chunks[0].id, "notes.txt__chunk_0000");
        assert_eq!(chunks[0].filename, "notes.txt");
        assert!(chunks[0].page.is_none());
    }

    #[test]
    fn blank_documents_contribute_no_chunks() {
        let docs = vec![
            Document::new("empty.txt", "   "),
            Document::new("real.txt", "some actual text"),
        ];
        let chunks = chunk_documents(&docs);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].filename, "real.txt");
    }
}
