//! Stopword filtering for keyword extraction.
//!
//! Combines the English list from the `stop-words` crate with words that leak out of
//! markup and converted documents (link syntax, HTML entities, page furniture). Stopwords
//! never become keywords on their own, and they are trimmed from the ends of phrases.

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// A case-insensitive stopword set.
#[derive(Debug, Clone)]
pub struct Stopwords {
    /// Lowercased stopwords.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates the default English and markup-noise stopword set.
    pub fn new() -> Self {
        let mut words: HashSet<String> = HashSet::new();

        let mut add_words = |slice: &[&str]| {
            for word in slice {
                words.insert(word.to_ascii_lowercase());
            }
        };

        add_words(stop_words::get(LANGUAGE::English));
        add_words(MARKUP_NOISE);

        Self { words }
    }

    /// Checks if a single word is a stopword, ignoring ASCII case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_lowercase())
    }

    /// Returns true when every word of `phrase` is a stopword.
    pub fn covers(&self, phrase: &str) -> bool {
        phrase.split_whitespace().all(|word| self.contains(word))
    }

    /// Returns the number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the stopwords as owned strings, the shape `keyword_extraction` expects.
    pub fn as_vec(&self) -> Vec<String> {
        let mut words: Vec<String> = self.words.iter().cloned().collect();
        words.sort_unstable();
        words
    }
}

/// Tokens left behind by Markdown, HTML and document conversion.
const MARKUP_NOISE: &[&str] = &[
    "http", "https", "www", "com", "org", "html", "htm", "href", "src", "img", "div", "span",
    "nbsp", "amp", "quot", "png", "jpg", "jpeg", "gif", "svg", "pdf", "docx", "page", "pages",
    "etc", "e.g", "i.e", "todo", "fixme", "note", "tbd",
];
