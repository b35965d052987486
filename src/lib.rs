//! Convert Steam install-script (VDF) files into Windows Registry import
//! (`.reg`) files.
//!
//! Install scripts describe the registry keys a game needs, with localized
//! alternatives of some values keyed by language name and an
//! `%INSTALLDIR%` placeholder standing in for the installation directory.
//! This crate walks that tree and emits a deterministic, escaped `.reg`
//! file for one chosen language, with a defined fallback between close
//! regional variations (latam↔spanish, brazilian↔portuguese,
//! tchinese↔schinese) and support for the WOW64 key-path markers install
//! scripts use for 32/64-bit registry redirection.
//!
//! # Architecture
//!
//! - `vdf`: minimal ordered parser for the key/value text format
//! - `tree`: registry subtree extraction and node-shape classification
//! - `i18n`: supported-language registry, request normalization, fallback
//! - `rewrite`: WOW64 key-path rewriting
//! - `transcriber`: the `.reg` writer and per-group language selection
//! - `convert`: the conversion entry point and companion artifacts
//!
//! # Example
//!
//! ```rust,ignore
//! use vdf_to_reg::{convert, Config};
//!
//! let mut config = Config::new("installscript.vdf", "french");
//! config.install_dir = "C:\\Games\\Example".to_string();
//! let outcome = convert(&config)?;
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod i18n;
pub mod rewrite;
pub mod transcriber;
pub mod tree;
pub mod vdf;

pub use config::Config;
pub use convert::{convert, detect_vdf_file};
pub use error::ConvertError;
pub use i18n::{Language, LanguageRegistry};
pub use transcriber::Outcome;
