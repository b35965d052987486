//! Error types for the VDF-to-registry conversion.

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that abort a conversion.
///
/// All of these are terminal for the current conversion: there is no retry
/// and no skip-and-continue. A failure partway through transcription leaves
/// whatever was already written on disk.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The install script has no `InstallScript` → `Registry` section
    #[error("there is nothing to create a registry of")]
    MissingRegistryData,

    /// The requested language is not in the supported language list
    #[error("language '{0}' is not present in the supported languages list")]
    UnsupportedLanguage(String),

    /// A tree node has a shape the transcriber has no rule for
    #[error("unsupported value shape under [{key_path}]: {detail}")]
    UnsupportedValueShape { key_path: String, detail: String },

    /// IO error while reading the script or writing the output file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Process exit code for this failure, matching the documented mapping:
    /// 2 = unsupported language, 3 = no registry data, 1 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::UnsupportedLanguage(_) => 2,
            ConvertError::MissingRegistryData => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(ConvertError::MissingRegistryData.exit_code(), 3);
        assert_eq!(
            ConvertError::UnsupportedLanguage("klingon".to_string()).exit_code(),
            2
        );
        let shape = ConvertError::UnsupportedValueShape {
            key_path: "HKEY_CURRENT_USER\\Software".to_string(),
            detail: "nested mapping where a string was expected".to_string(),
        };
        assert_eq!(shape.exit_code(), 1);
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ConvertError::UnsupportedLanguage("klingon".to_string());
        assert!(err.to_string().contains("klingon"));
    }
}
