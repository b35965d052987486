//! Language handling for install-script localization.
//!
//! Steam install scripts carry localized alternatives of registry values,
//! keyed by language name. This module owns everything language-related:
//! the registry of supported codes, the normalization of free-form language
//! requests, and the fallback pairing between close regional variations.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their
//!   fallback partners
//! - `language`: Validated `Language` type constructed from free-form
//!   requests

mod language;
mod registry;

pub use language::{normalize, Language};
pub use registry::{LanguageConfig, LanguageRegistry};
