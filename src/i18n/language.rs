//! Language type: validated language representation.
//!
//! This module provides the `Language` type, which turns a free-form
//! language request ("Traditional Chinese", "LATAM spanish", ...) into a
//! canonical Steam language code validated against the registry.

use crate::error::ConvertError;
use crate::i18n::LanguageRegistry;

/// A validated language.
///
/// This type represents a language that has been validated against the
/// registry. It ensures that only supported languages can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Canonical Steam language code (e.g., "english", "latam")
    code: &'static str,
}

impl Language {
    /// Create a Language from a free-form request string.
    ///
    /// The request is normalized first (see [`normalize`]) and then checked
    /// against the registry of supported languages.
    ///
    /// # Arguments
    /// * `request` - The language as the user wrote it (e.g., "French",
    ///   "traditional chinese", "Latin American Spanish")
    ///
    /// # Returns
    /// * `Ok(Language)` if the normalized code is supported
    /// * `Err(ConvertError::UnsupportedLanguage)` otherwise
    pub fn from_request(request: &str) -> Result<Language, ConvertError> {
        let code = normalize(request);

        match LanguageRegistry::get().get_by_code(&code) {
            // Use the static str from the registry
            Some(config) => Ok(Language { code: config.code }),
            None => Err(ConvertError::UnsupportedLanguage(code)),
        }
    }

    /// Get the canonical Steam language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the fallback partner of this language, if one exists.
    ///
    /// Only the regional pairs (latam↔spanish, brazilian↔portuguese,
    /// tchinese↔schinese) have fallbacks; every other language returns
    /// `None`.
    pub fn fallback(&self) -> Option<Language> {
        LanguageRegistry::get()
            .fallback_of(self.code)
            .map(|code| Language { code })
    }
}

/// Normalize a free-form language request into a candidate Steam code.
///
/// Rules are applied in order, matching case-insensitively on substrings:
/// 1. contains "chinese": "traditional" → `tchinese`, else `schinese`
/// 2. contains "brazil" → `brazilian`
/// 3. contains "spanish" and "latin" → `latam`
/// 4. contains "korean" → `koreana`
/// 5. otherwise the lowercased input, unchanged
///
/// The result is a candidate only; callers still validate it against the
/// registry.
pub fn normalize(request: &str) -> String {
    let mut language = request.to_lowercase();

    if language.contains("chinese") {
        language = if language.contains("traditional") {
            "tchinese".to_string()
        } else {
            "schinese".to_string()
        };
    }
    if language.contains("brazil") {
        language = "brazilian".to_string();
    }
    if language.contains("spanish") && language.contains("latin") {
        language = "latam".to_string();
    }
    if language.contains("korean") {
        language = "koreana".to_string();
    }

    language
}
