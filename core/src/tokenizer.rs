use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"[a-z0-9]+").expect("valid regex");
}

/// Tokenize text into lowercase ASCII-alphanumeric terms.
///
/// Maximal `[a-z0-9]+` runs of the lowercased input become terms; everything
/// else (punctuation, whitespace, non-ASCII letters) separates terms. Index
/// and query sides share this function, so term matching is exact: no
/// stemming, no stopword removal, no fuzzy expansion.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect()
}
