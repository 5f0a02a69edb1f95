//! Translation backend abstraction and the per-file caching session.
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::lib::errors::TranslateError;

pub mod deepl;

pub use deepl::DeepLBackend;

/// A service able to translate one fragment between two language codes.
pub trait TranslationBackend {
    fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

/// Caching front of a backend, scoped to one file.
///
/// Identical trimmed fragments reach the backend at most once per session.
/// Failures are turned into an inline marker and are not cached.
pub struct TranslationSession<'a> {
    backend: &'a dyn TranslationBackend,
    source_lang: &'a str,
    target_lang: &'a str,
    cache: HashMap<String, String>,
    characters_translated: usize,
}

impl<'a> TranslationSession<'a> {
    pub fn new(
        backend: &'a dyn TranslationBackend,
        source_lang: &'a str,
        target_lang: &'a str,
    ) -> Self {
        Self {
            backend,
            source_lang,
            target_lang,
            cache: HashMap::new(),
            characters_translated: 0,
        }
    }

    /// Translate `fragment`, serving repeats from the cache.
    pub fn translate(&mut self, fragment: &str) -> String {
        let text = fragment.trim();
        if text.is_empty() {
            return String::new();
        }
        if let Some(hit) = self.cache.get(text) {
            debug!(target: "comment_translator::translate", fragment = text, "Cache hit");
            return hit.clone();
        }

        match self
            .backend
            .translate(text, self.source_lang, self.target_lang)
        {
            Ok(translated) => {
                self.characters_translated += text.chars().count();
                self.cache.insert(text.to_string(), translated.clone());
                translated
            }
            Err(err) => {
                warn!(
                    target: "comment_translator::translate",
                    fragment = text,
                    reason = %err,
                    "Translation failed; leaving an inline marker"
                );
                format!("[Translation Error: {err}]")
            }
        }
    }

    /// Characters of source text successfully sent to the backend.
    pub fn characters_translated(&self) -> usize {
        self.characters_translated
    }

    /// Number of distinct fragments cached so far.
    pub fn cached_fragments(&self) -> usize {
        self.cache.len()
    }
}
