//! Registry subtree extraction and node classification.
//!
//! A parsed install script nests the registry data under
//! `InstallScript` → `Registry`. This module pulls that subtree out and
//! classifies each value node exactly once into a closed set of shapes, so
//! the transcriber can walk a typed tree instead of re-inspecting raw nodes
//! at every emission site.

use crate::error::ConvertError;
use crate::vdf::{VdfMap, VdfValue};

/// Registry value kind encoded by a language-variant group's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `REG_SZ`: quoted, escaped string value
    String,
    /// `REG_DWORD`: raw hex/decimal literal, emitted verbatim
    Dword,
}

impl ValueKind {
    /// Recognize a value-kind tag, case-insensitively.
    ///
    /// Only "string" and "dword" mark a language-variant group; any other
    /// tag means the nested mapping is structural.
    pub fn from_tag(tag: &str) -> Option<ValueKind> {
        if tag.eq_ignore_ascii_case("string") {
            Some(ValueKind::String)
        } else if tag.eq_ignore_ascii_case("dword") {
            Some(ValueKind::Dword)
        } else {
            None
        }
    }
}

/// Classified shape of one sub-key inside a registry key body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'t> {
    /// A literal registry value, final apart from substitution and escaping
    Scalar(&'t str),

    /// An anonymous grouping of value-name → value-content pairs, emitted
    /// fully regardless of language
    Structural(&'t VdfMap),

    /// A language-variant group: children keyed by language name, exactly
    /// one of which is selected and emitted
    Variant {
        kind: ValueKind,
        languages: &'t VdfMap,
    },
}

/// Classify one sub-key value into its emission shape.
pub fn classify<'t>(sub_key: &str, value: &'t VdfValue) -> Entry<'t> {
    match value {
        VdfValue::Str(s) => Entry::Scalar(s),
        VdfValue::Map(children) => match ValueKind::from_tag(sub_key) {
            Some(kind) => Entry::Variant {
                kind,
                languages: children,
            },
            None => Entry::Structural(children),
        },
    }
}

/// Extract the registry subtree from a parsed install script.
///
/// # Arguments
/// * `document` - The full parsed VDF document
///
/// # Returns
/// * `Ok(&VdfMap)` - The ordered key-path → key-body mapping
/// * `Err(ConvertError::MissingRegistryData)` if the document has no
///   `InstallScript` section or no `Registry` entry inside it
pub fn extract_registry(document: &VdfMap) -> Result<&VdfMap, ConvertError> {
    let install_script = document
        .get("InstallScript")
        .and_then(VdfValue::as_map)
        .ok_or(ConvertError::MissingRegistryData)?;

    install_script
        .get("Registry")
        .and_then(VdfValue::as_map)
        .ok_or(ConvertError::MissingRegistryData)
}
