//! Registry transcription: walk the registry tree and emit `.reg` text.
//!
//! This is the core of the converter. For every key path, in source order,
//! it emits a section header and the key's values, selecting exactly one
//! language per language-variant group, substituting the install-directory
//! placeholder, escaping backslashes, and rewriting WOW64-marked key paths.
//! Everything is a single synchronous pass over the tree; the first shape
//! the walker has no rule for aborts the conversion, leaving whatever was
//! already written on disk.

use std::io::Write;

use tracing::debug;

use crate::error::ConvertError;
use crate::i18n::Language;
use crate::rewrite::rewrite_key_path;
use crate::tree::{classify, Entry, ValueKind};
use crate::vdf::{VdfMap, VdfValue};

/// Placeholder token replaced by the install directory in literal values.
const INSTALL_DIR_TOKEN: &str = "%INSTALLDIR%";

/// Aggregated result of one transcription pass.
///
/// `language_present` is true when at least one variant group contained the
/// preferred language; `fallback_used` is true when at least one group was
/// resolved through the fallback partner instead. Both are OR-aggregated
/// across every group visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub language_present: bool,
    pub fallback_used: bool,
}

/// Per-group language selection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection<'t> {
    /// The preferred language is present in the group
    Preferred(&'t str),
    /// The preferred language is absent; its fallback partner is present
    Fallback(&'t str),
    /// Neither is present (or fallback is disabled); emit nothing
    None,
}

/// Select the language to emit for one variant group.
///
/// Children are scanned in iteration order; the first case-insensitive
/// match wins. The fallback partner is only considered when the preferred
/// language is absent and `allow_fallback` is set.
fn select_language<'t>(
    languages: &'t VdfMap,
    preferred: &str,
    fallback: Option<&str>,
    allow_fallback: bool,
) -> Selection<'t> {
    for name in languages.keys() {
        if name.eq_ignore_ascii_case(preferred) {
            return Selection::Preferred(name);
        }
    }

    if allow_fallback {
        if let Some(fallback) = fallback {
            for name in languages.keys() {
                if name.eq_ignore_ascii_case(fallback) {
                    return Selection::Fallback(name);
                }
            }
        }
    }

    Selection::None
}

/// Substitute the install-directory placeholder, then escape backslashes.
///
/// Order matters: substitution first, so backslashes introduced by the
/// install directory path are escaped too.
fn render_value(raw: &str, install_dir: &str) -> String {
    raw.replace(INSTALL_DIR_TOKEN, install_dir)
        .replace('\\', "\\\\")
}

/// Write the fixed `.reg` file header.
pub fn write_header<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Windows Registry Editor Version 5.00")?;
    writeln!(out)
}

/// Registry transcriber for one conversion.
pub struct Transcriber<'a> {
    language: Language,
    install_dir: &'a str,
    allow_fallback: bool,
}

impl<'a> Transcriber<'a> {
    pub fn new(language: Language, install_dir: &'a str, allow_fallback: bool) -> Self {
        Self {
            language,
            install_dir,
            allow_fallback,
        }
    }

    /// Transcribe the whole registry tree to `out`.
    ///
    /// Key paths and sub-keys are visited in source order. Returns the
    /// OR-aggregated language outcome; fails on the first node shape the
    /// walker has no rule for, leaving partial output in `out`.
    pub fn transcribe<W: Write>(
        &self,
        registry: &VdfMap,
        out: &mut W,
    ) -> Result<Outcome, ConvertError> {
        // One global decision: trees with a single key path get no blank
        // separator after their section.
        let separate_sections = registry.len() > 1;

        let fallback = self.language.fallback();
        let mut outcome = Outcome::default();

        for (key_path, body) in registry {
            let body = body.as_map().ok_or_else(|| ConvertError::UnsupportedValueShape {
                key_path: key_path.clone(),
                detail: "key body must be a mapping, not a string".to_string(),
            })?;

            writeln!(out, "[{}]", rewrite_key_path(key_path))?;

            for (sub_key, value) in body {
                match classify(sub_key, value) {
                    Entry::Scalar(raw) => self.write_value(out, sub_key, raw)?,
                    Entry::Structural(group) => {
                        self.write_structural_group(out, key_path, group)?
                    }
                    Entry::Variant { kind, languages } => {
                        let selection = select_language(
                            languages,
                            self.language.code(),
                            fallback.map(|l| l.code()),
                            self.allow_fallback,
                        );
                        match selection {
                            Selection::Preferred(name) => {
                                outcome.language_present = true;
                                self.write_variant_leaf(out, key_path, kind, &languages[name])?;
                            }
                            Selection::Fallback(name) => {
                                debug!(
                                    "[{}] '{}' absent, falling back to '{}'",
                                    key_path,
                                    self.language.code(),
                                    name
                                );
                                outcome.fallback_used = true;
                                self.write_variant_leaf(out, key_path, kind, &languages[name])?;
                            }
                            Selection::None => {
                                debug!(
                                    "[{}] no usable language in variant group '{}'",
                                    key_path, sub_key
                                );
                            }
                        }
                    }
                }
            }

            if separate_sections {
                writeln!(out)?;
            }
        }

        Ok(outcome)
    }

    /// Emit one `"name"="value"` line, honoring the `(default)` value rule.
    fn write_value<W: Write>(
        &self,
        out: &mut W,
        name: &str,
        raw: &str,
    ) -> Result<(), ConvertError> {
        let value = render_value(raw, self.install_dir);
        if name.eq_ignore_ascii_case("(default)") {
            writeln!(out, "@=\"{value}\"")?;
        } else {
            writeln!(out, "\"{name}\"=\"{value}\"")?;
        }
        Ok(())
    }

    /// Emit an anonymous grouping: every entry, regardless of language.
    ///
    /// Entries are either scalars or one level of name → value pairs; any
    /// deeper nesting has no defined emission rule.
    fn write_structural_group<W: Write>(
        &self,
        out: &mut W,
        key_path: &str,
        group: &VdfMap,
    ) -> Result<(), ConvertError> {
        for (entry, content) in group {
            match content {
                VdfValue::Str(raw) => self.write_value(out, entry, raw)?,
                VdfValue::Map(pairs) => {
                    for (name, value) in pairs {
                        let VdfValue::Str(raw) = value else {
                            return Err(ConvertError::UnsupportedValueShape {
                                key_path: key_path.to_string(),
                                detail: format!(
                                    "entry '{entry}' nests deeper than two levels"
                                ),
                            });
                        };
                        self.write_value(out, name, raw)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit the selected language's pairs from a variant group.
    ///
    /// String values get the usual substitution and escaping; dword values
    /// are raw hex/decimal literals written verbatim, unquoted.
    fn write_variant_leaf<W: Write>(
        &self,
        out: &mut W,
        key_path: &str,
        kind: ValueKind,
        leaf: &VdfValue,
    ) -> Result<(), ConvertError> {
        let VdfValue::Map(pairs) = leaf else {
            return Err(ConvertError::UnsupportedValueShape {
                key_path: key_path.to_string(),
                detail: "language entry must be a name/value mapping".to_string(),
            });
        };

        for (name, value) in pairs {
            let VdfValue::Str(raw) = value else {
                return Err(ConvertError::UnsupportedValueShape {
                    key_path: key_path.to_string(),
                    detail: format!("value '{name}' nests deeper than two levels"),
                });
            };
            match kind {
                ValueKind::Dword => writeln!(out, "\"{name}\"=dword:{raw}")?,
                ValueKind::String => {
                    let value = render_value(raw, self.install_dir);
                    writeln!(out, "\"{name}\"=\"{value}\"")?;
                }
            }
        }
        Ok(())
    }
}
