//! Conversion entry point and its filesystem collaborators.
//!
//! Ties the pieces together for one conversion: load and parse the VDF
//! file, validate that it carries registry data, write the `.reg` header,
//! resolve the requested language, transcribe the tree, and produce the
//! optional companion artifacts (import batch script, immediate import via
//! the OS `reg` utility).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ConvertError;
use crate::i18n::Language;
use crate::transcriber::{write_header, Outcome, Transcriber};
use crate::tree::extract_registry;
use crate::vdf;

/// Run one conversion according to `config`.
///
/// The output file is created (and the fixed header written) as soon as the
/// input is known to contain registry data, before the requested language is
/// validated; an `UnsupportedLanguage` failure therefore leaves a
/// header-only file on disk, and a shape failure mid-transcription leaves
/// everything written up to that point. Both are documented behavior, not
/// cleanup bugs.
///
/// # Returns
/// The aggregated language [`Outcome`]. Absence of the requested language
/// is not an error; callers read it off the outcome.
pub fn convert(config: &Config) -> Result<Outcome, ConvertError> {
    let output = resolve_output_path(config)?;

    let document = vdf::load(&config.vdf_path)?;
    let registry = extract_registry(&document)?;

    info!("Writing registry file to {}", output.display());
    let mut reg_file = File::create(&output)?;
    write_header(&mut reg_file)?;

    if config.batch {
        write_import_script(&output)?;
    }

    let language = Language::from_request(&config.language)?;
    let transcriber = Transcriber::new(language, &config.install_dir, !config.no_fallback);
    let outcome = transcriber.transcribe(registry, &mut reg_file)?;

    if config.auto_import {
        auto_import(&output);
    }

    Ok(outcome)
}

/// Output path for a conversion: explicit if configured, otherwise the
/// input's basename with a `.reg` extension, placed in the current
/// directory.
fn resolve_output_path(config: &Config) -> Result<PathBuf, ConvertError> {
    if let Some(output) = &config.output {
        return Ok(output.clone());
    }

    let stem = config
        .vdf_path
        .file_stem()
        .unwrap_or_else(|| "installscript".as_ref());
    let mut output = std::env::current_dir()?.join(stem);
    output.set_extension("reg");
    Ok(output)
}

/// Find the VDF file to convert when none was given.
///
/// Prefers `installscript.vdf` in `dir`; otherwise accepts a directory
/// containing exactly one `.vdf` file. Anything else is an error.
pub fn detect_vdf_file(dir: &Path) -> anyhow::Result<PathBuf> {
    let default = dir.join("installscript.vdf");
    if default.is_file() {
        return Ok(default);
    }

    warn!(
        "No installscript.vdf file found in {}, searching for one...",
        dir.display()
    );

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
    {
        let path = entry?.path();
        let is_vdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vdf"));
        if is_vdf && path.is_file() {
            candidates.push(path);
        }
    }

    if candidates.len() == 1 {
        Ok(candidates.remove(0))
    } else {
        bail!(
            "multiple (or no) VDF files found in {}, aborting",
            dir.display()
        )
    }
}

/// Write the companion batch script that imports the produced `.reg` file
/// into both the 32-bit and 64-bit registry views.
pub fn write_import_script(output: &Path) -> std::io::Result<()> {
    let script_path = output.with_extension("cmd");
    let mut script = File::create(&script_path)?;
    write!(
        script,
        "REG IMPORT \"{}\" /reg:32\nREG IMPORT \"{}\" /reg:64",
        output.display(),
        output.display()
    )?;
    info!("Wrote import script to {}", script_path.display());
    Ok(())
}

/// Import the produced `.reg` file right away via the OS `reg` utility.
///
/// Best-effort: the conversion result already stands on disk, so a missing
/// or failing `reg` binary is logged rather than treated as fatal.
fn auto_import(output: &Path) {
    for view in ["/reg:32", "/reg:64"] {
        // 32-bit first; older games expect the redirected view.
        info!("Importing reg file to the {view} registry location...");
        match Command::new("reg")
            .arg("import")
            .arg(output)
            .arg(view)
            .status()
        {
            Ok(status) if !status.success() => {
                warn!("reg import {view} exited with {status}");
            }
            Err(e) => warn!("could not run reg import {view}: {e}"),
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCRIPT: &str = r#"
    "InstallScript"
    {
        "Registry"
        {
            "HKEY_CURRENT_USER\\Software\\Test"
            {
                "string"
                {
                    "english" { "Path" "%INSTALLDIR%\\bin" }
                }
            }
        }
    }
    "#;

    fn config_in(dir: &TempDir, script: &str, language: &str) -> Config {
        let vdf_path = dir.path().join("installscript.vdf");
        fs::write(&vdf_path, script).expect("write script");

        let mut config = Config::new(vdf_path, language);
        config.output = Some(dir.path().join("out.reg"));
        config.install_dir = "C:\\Games\\Test".to_string();
        config
    }

    #[test]
    fn test_convert_writes_header_and_values() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, SCRIPT, "english");

        let outcome = convert(&config).expect("conversion succeeds");
        assert!(outcome.language_present);

        let written = fs::read_to_string(dir.path().join("out.reg")).unwrap();
        assert!(written.starts_with("Windows Registry Editor Version 5.00\n\n"));
        assert!(written.contains("\"Path\"=\"C:\\\\Games\\\\Test\\\\bin\""));
    }

    #[test]
    fn test_convert_missing_registry_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, r#""InstallScript" { "Run Process" { } }"#, "english");

        let result = convert(&config);
        assert!(matches!(result, Err(ConvertError::MissingRegistryData)));
        assert!(!dir.path().join("out.reg").exists());
    }

    #[test]
    fn test_convert_unsupported_language_leaves_header_only_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, SCRIPT, "klingon");

        let result = convert(&config);
        assert!(matches!(result, Err(ConvertError::UnsupportedLanguage(_))));

        let written = fs::read_to_string(dir.path().join("out.reg")).unwrap();
        assert_eq!(written, "Windows Registry Editor Version 5.00\n\n");
    }

    #[test]
    fn test_convert_writes_batch_script_when_requested() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, SCRIPT, "english");
        config.batch = true;

        convert(&config).expect("conversion succeeds");

        let script = fs::read_to_string(dir.path().join("out.cmd")).unwrap();
        let reg_path = dir.path().join("out.reg");
        assert_eq!(
            script,
            format!(
                "REG IMPORT \"{}\" /reg:32\nREG IMPORT \"{}\" /reg:64",
                reg_path.display(),
                reg_path.display()
            )
        );
    }

    // ==================== Input Detection Tests ====================

    #[test]
    fn test_detect_prefers_installscript_vdf() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("installscript.vdf"), "").unwrap();
        fs::write(dir.path().join("other.vdf"), "").unwrap();

        let found = detect_vdf_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("installscript.vdf"));
    }

    #[test]
    fn test_detect_accepts_single_other_vdf() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("game.vdf"), "").unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();

        let found = detect_vdf_file(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("game.vdf"));
    }

    #[test]
    fn test_detect_rejects_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(detect_vdf_file(dir.path()).is_err());
    }

    #[test]
    fn test_detect_rejects_multiple_candidates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.vdf"), "").unwrap();
        fs::write(dir.path().join("b.vdf"), "").unwrap();

        assert!(detect_vdf_file(dir.path()).is_err());
    }
}
