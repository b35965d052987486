//! Language registry: single source of truth for all supported languages.
//!
//! This module provides a centralized registry of every language a Steam
//! install script can localize for, together with the fallback pairing used
//! when the preferred language is absent from a script. It uses a singleton
//! pattern with `OnceLock` to ensure thread-safe initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Steam language code (e.g., "english", "schinese", "latam")
    pub code: &'static str,

    /// Closest variation to substitute when this language is absent from a
    /// script, if one exists. Pairings are symmetric.
    pub fallback: Option<&'static str>,
}

/// Global language registry singleton.
///
/// Contains all supported languages and provides methods to query them. It's
/// initialized once on first access and remains immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The Steam language code (e.g., "english", "tchinese")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not supported
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Check if a language code is in the supported set.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Get the fallback partner of a language, if it has one.
    ///
    /// The fallback graph is used only for resolution against a script's
    /// contents, never for deciding whether a requested language is valid.
    pub fn fallback_of(&self, code: &str) -> Option<&'static str> {
        self.get_by_code(code).and_then(|lang| lang.fallback)
    }

    /// Get all supported languages.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }
}

/// Default language configurations.
///
/// The set matches the languages Steam ships install scripts for. Fallback
/// pairings cover the regional variations that are close enough to stand in
/// for one another: latam↔spanish, brazilian↔portuguese, tchinese↔schinese.
fn default_languages() -> Vec<LanguageConfig> {
    fn lang(code: &'static str) -> LanguageConfig {
        LanguageConfig {
            code,
            fallback: None,
        }
    }
    fn paired(code: &'static str, fallback: &'static str) -> LanguageConfig {
        LanguageConfig {
            code,
            fallback: Some(fallback),
        }
    }

    vec![
        lang("arabic"),
        lang("bulgarian"),
        paired("schinese", "tchinese"),
        paired("tchinese", "schinese"),
        lang("czech"),
        lang("danish"),
        lang("dutch"),
        lang("english"),
        lang("finnish"),
        lang("french"),
        lang("german"),
        lang("greek"),
        lang("hungarian"),
        lang("italian"),
        lang("japanese"),
        lang("koreana"),
        lang("norwegian"),
        lang("polish"),
        paired("portuguese", "brazilian"),
        paired("brazilian", "portuguese"),
        lang("romanian"),
        lang("russian"),
        paired("spanish", "latam"),
        paired("latam", "spanish"),
        lang("swedish"),
        lang("thai"),
        lang("turkish"),
        lang("ukrainian"),
        lang("vietnamese"),
    ]
}
