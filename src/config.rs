use std::path::PathBuf;

/// Options for one VDF-to-registry conversion.
#[derive(Debug, Clone)]
pub struct Config {
    // Input
    pub vdf_path: PathBuf,

    // Language selection
    pub language: String,
    pub no_fallback: bool,

    // Output
    pub output: Option<PathBuf>,
    pub install_dir: String,

    // Companion artifacts
    pub batch: bool,
    pub auto_import: bool,
}

impl Config {
    /// Conversion of a single file with everything else at its defaults.
    pub fn new(vdf_path: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            vdf_path: vdf_path.into(),
            language: language.into(),
            no_fallback: false,
            output: None,
            install_dir: String::new(),
            batch: false,
            auto_import: false,
        }
    }
}
