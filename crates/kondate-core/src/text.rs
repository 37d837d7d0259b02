//! # Text Normalizer
//!
//! Deterministic text cleaning applied identically to catalog documents
//! at index-build time and to live queries. Any divergence between the
//! two sides silently degrades ranking quality instead of erroring, so
//! the exact transform is a compatibility contract.

use regex::Regex;

use crate::error::Result;

/// Normalizes free text for embedding: lowercase folding, digit and
/// punctuation removal, underscore removal, whitespace collapsing.
pub struct TextNormalizer {
    re_digits: Regex,
    re_symbols: Regex,
    re_underscores: Regex,
    re_whitespace: Regex,
}

impl TextNormalizer {
    /// Constructs a new `TextNormalizer` with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `KondateError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_digits: Regex::new(r"\d+")?,
            re_symbols: Regex::new(r"[^\w\s]")?,
            re_underscores: Regex::new(r"_+")?,
            re_whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Normalizes the given text.
    ///
    /// Pure and idempotent. Empty or whitespace-only input normalizes to
    /// the empty string; so does input consisting solely of digits and
    /// punctuation.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let no_digits = self.re_digits.replace_all(&lowered, "");
        let no_symbols = self.re_symbols.replace_all(&no_digits, "");
        let no_underscores = self.re_underscores.replace_all(&no_symbols, "");
        let collapsed = self.re_whitespace.replace_all(&no_underscores, " ");
        collapsed.trim().to_string()
    }
}
