//! Package build: generate, validate, write, manifest.
//!
//! Stage 3 of the build pipeline — the only stage that touches the
//! filesystem. [`build_package`] runs the strict linear sequence
//! `GENERATE → VALIDATE → (abort | WRITE)`; the optional archive step
//! lives in [`crate::archive`].
//!
//! ## Output layout
//!
//! ```text
//! audit-package/
//! ├── src/pages/digital-credibility-score-audit.astro
//! ├── styles/audit-styles.css
//! ├── public/schema-audit.json
//! ├── docs/readme.md
//! └── build-manifest.json
//! ```
//!
//! ## Integrity
//!
//! Every written artifact gets a SHA-256 hex digest recorded in the
//! manifest, computed over exactly the bytes written to disk. That is
//! the only integrity guarantee offered — an external auditor recomputes
//! and compares. Writes are best-effort, not atomic: a failure
//! mid-sequence can leave a subset of artifacts written and no manifest.

use crate::config::BuildConfig;
use crate::content;
use crate::logger::BuildLogger;
use crate::validate::{self, ValidationReport};
use chrono::{Local, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest filename at the output directory root.
const MANIFEST_FILENAME: &str = "build-manifest.json";

#[derive(Error, Debug)]
pub enum BuildError {
    /// A required check did not pass; nothing was written.
    #[error("content validation failed")]
    ValidationFailed,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Archive(#[from] crate::archive::ArchiveError),
}

/// Record of one build's outputs, checksums, and validation results.
///
/// Serialized as `build-manifest.json` at the output root. After a
/// dry run the `artifacts` and `checksums` maps are empty — only the
/// validation reports are populated.
#[derive(Debug, Clone, Serialize)]
pub struct BuildManifest {
    pub version: String,
    pub promptcore_ver: String,
    /// UTC ISO-8601 timestamp of this build invocation.
    pub generated_at: String,
    /// Host identifier, metadata only.
    pub hostname: String,
    /// Artifact name → written file path.
    pub artifacts: BTreeMap<String, String>,
    /// Artifact name → SHA-256 hex digest of the written bytes.
    pub checksums: BTreeMap<String, String>,
    /// Artifact name → validation report.
    pub validation: BTreeMap<String, ValidationReport>,
}

impl BuildManifest {
    fn new(config: &BuildConfig) -> Self {
        Self {
            version: config.version.clone(),
            promptcore_ver: config.promptcore_ver.clone(),
            generated_at: Utc::now().to_rfc3339(),
            hostname: hostname(),
            artifacts: BTreeMap::new(),
            checksums: BTreeMap::new(),
            validation: BTreeMap::new(),
        }
    }
}

/// Host identifier from the environment, metadata only.
///
/// `COMPUTERNAME` (Windows) falls back to `HOSTNAME` (Unix shells),
/// then to a literal `unknown`.
fn hostname() -> String {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// SHA-256 hex digest of a string's UTF-8 bytes.
pub fn compute_checksum(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// OS-level failures are logged with the offending path and propagated —
/// there is no retry and no partial-write recovery.
fn safe_write(path: &Path, content: &str, logger: &BuildLogger) -> Result<u64, BuildError> {
    let result: std::io::Result<u64> = (|| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(fs::metadata(path)?.len())
    })();
    match result {
        Ok(size) => {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            logger.info(&format!("Wrote {name} ({size} bytes)"));
            Ok(size)
        }
        Err(e) => {
            logger.error(&format!("Failed writing {}: {e}", path.display()));
            Err(BuildError::Io(e))
        }
    }
}

/// Copy an existing output directory to a timestamped sibling.
///
/// `audit-package` becomes `audit-package_backup_20260830_140321`.
/// Best-effort duplication, not versioned history; errors propagate.
pub fn create_backup(path: &Path, logger: &BuildLogger) -> Result<Option<PathBuf>, BuildError> {
    if !path.exists() {
        return Ok(None);
    }

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    let backup = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{name}_backup_{stamp}"));

    copy_dir_recursive(path, &backup)?;
    logger.info(&format!("Created backup: {}", backup.display()));
    Ok(Some(backup))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build the complete audit landing page package.
///
/// Generates all artifacts, validates them, and — unless `dry_run` or a
/// validation failure — writes them plus the manifest under
/// `output_dir`. Returns the populated [`BuildManifest`]; in dry-run
/// mode its path and checksum maps are empty.
///
/// # Errors
///
/// [`BuildError::ValidationFailed`] if any check fails (nothing is
/// written), or [`BuildError::Io`] / [`BuildError::Json`] on write and
/// serialization failures, which may leave a partial tree behind.
pub fn build_package(
    output_dir: &Path,
    config: &BuildConfig,
    logger: &BuildLogger,
    dry_run: bool,
) -> Result<BuildManifest, BuildError> {
    let mut manifest = BuildManifest::new(config);

    logger.info("Generating content...");
    let astro_content = content::astro_page();
    let schema_content = content::schema_document(config);
    let css_content = content::stylesheet();
    let readme_content = content::readme(config);

    logger.info("Validating content...");
    let reports = [
        ("astro", validate::check_astro(astro_content, config)),
        ("schema", validate::check_schema(&schema_content, config)),
        ("css", validate::check_css(css_content, config)),
    ];
    for (name, report) in &reports {
        for check in &report.checks {
            logger.debug(&format!("  {name}: {check}"));
        }
    }

    let all_passed = reports.iter().all(|(_, report)| report.passed);
    for (name, report) in reports {
        manifest.validation.insert(name.to_string(), report);
    }

    if !all_passed {
        // Echo failed checks at error level so operators see them
        // without --verbose.
        for (name, report) in &manifest.validation {
            for check in report.checks.iter().filter(|c| c.starts_with("FAIL:")) {
                logger.error(&format!("  {name}: {check}"));
            }
        }
        logger.error("Validation failed — aborting build");
        return Err(BuildError::ValidationFailed);
    }

    logger.info("All validations passed");

    if dry_run {
        logger.info("DRY RUN — skipping file writes");
        return Ok(manifest);
    }

    logger.info("Writing files...");

    let astro_path = output_dir
        .join("src")
        .join("pages")
        .join(format!("{}.astro", config.page_slug));
    safe_write(&astro_path, astro_content, logger)?;
    manifest
        .artifacts
        .insert("astro".to_string(), astro_path.display().to_string());
    manifest
        .checksums
        .insert("astro".to_string(), compute_checksum(astro_content));

    let schema_path = output_dir.join("public").join("schema-audit.json");
    let schema_str = serde_json::to_string_pretty(&schema_content)?;
    safe_write(&schema_path, &schema_str, logger)?;
    manifest
        .artifacts
        .insert("schema".to_string(), schema_path.display().to_string());
    manifest
        .checksums
        .insert("schema".to_string(), compute_checksum(&schema_str));

    let css_path = output_dir.join("styles").join("audit-styles.css");
    safe_write(&css_path, css_content, logger)?;
    manifest
        .artifacts
        .insert("css".to_string(), css_path.display().to_string());
    manifest
        .checksums
        .insert("css".to_string(), compute_checksum(css_content));

    let readme_path = output_dir.join("docs").join("readme.md");
    safe_write(&readme_path, &readme_content, logger)?;
    manifest
        .artifacts
        .insert("readme".to_string(), readme_path.display().to_string());
    manifest
        .checksums
        .insert("readme".to_string(), compute_checksum(&readme_content));

    let manifest_path = output_dir.join(MANIFEST_FILENAME);
    let manifest_str = serde_json::to_string_pretty(&manifest)?;
    safe_write(&manifest_path, &manifest_str, logger)?;

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_logger() -> BuildLogger {
        BuildLogger::new(false, None).unwrap()
    }

    #[test]
    fn checksum_matches_known_vector() {
        assert_eq!(
            compute_checksum("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn full_build_writes_all_artifacts() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        let config = BuildConfig::default();
        let manifest = build_package(&out, &config, &test_logger(), false).unwrap();

        assert!(
            out.join("src/pages/digital-credibility-score-audit.astro")
                .is_file()
        );
        assert!(out.join("styles/audit-styles.css").is_file());
        assert!(out.join("public/schema-audit.json").is_file());
        assert!(out.join("docs/readme.md").is_file());
        assert!(out.join(MANIFEST_FILENAME).is_file());
        assert_eq!(manifest.artifacts.len(), 4);
        assert_eq!(manifest.checksums.len(), 4);
        assert_eq!(manifest.validation.len(), 3);
    }

    #[test]
    fn checksums_match_written_bytes() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        let config = BuildConfig::default();
        let manifest = build_package(&out, &config, &test_logger(), false).unwrap();

        for (name, path) in &manifest.artifacts {
            let written = fs::read_to_string(path).unwrap();
            assert_eq!(
                compute_checksum(&written),
                manifest.checksums[name],
                "checksum mismatch for {name}"
            );
        }
    }

    #[test]
    fn manifest_file_round_trips_checksums() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        let config = BuildConfig::default();
        build_package(&out, &config, &test_logger(), false).unwrap();

        let raw = fs::read_to_string(out.join(MANIFEST_FILENAME)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["version"], config.version);
        assert_eq!(parsed["validation"]["astro"]["passed"], true);
        let css = fs::read_to_string(out.join("styles/audit-styles.css")).unwrap();
        assert_eq!(parsed["checksums"]["css"], compute_checksum(&css));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        let config = BuildConfig::default();
        let manifest = build_package(&out, &config, &test_logger(), true).unwrap();

        assert!(!out.exists());
        assert!(manifest.artifacts.is_empty());
        assert!(manifest.checksums.is_empty());
        assert_eq!(manifest.validation.len(), 3);
        assert!(manifest.validation.values().all(|r| r.passed));
    }

    #[test]
    fn validation_gate_leaves_no_files() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        // Force a size-floor failure without touching the templates.
        let config = BuildConfig {
            min_astro_size: usize::MAX,
            ..BuildConfig::default()
        };
        let result = build_package(&out, &config, &test_logger(), false);

        assert!(matches!(result, Err(BuildError::ValidationFailed)));
        assert!(!out.exists());
    }

    #[test]
    fn dry_run_verdict_matches_full_run() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig {
            required_schema_types: vec!["WebPage".to_string(), "Organization".to_string()],
            ..BuildConfig::default()
        };
        let dry = build_package(&tmp.path().join("a"), &config, &test_logger(), true);
        let wet = build_package(&tmp.path().join("b"), &config, &test_logger(), false);
        assert!(matches!(dry, Err(BuildError::ValidationFailed)));
        assert!(matches!(wet, Err(BuildError::ValidationFailed)));
    }

    #[test]
    fn rebuilds_are_byte_identical_except_timestamps() {
        let tmp = TempDir::new().unwrap();
        let config = BuildConfig::default();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        build_package(&first, &config, &test_logger(), false).unwrap();
        build_package(&second, &config, &test_logger(), false).unwrap();

        for rel in [
            "src/pages/digital-credibility-score-audit.astro",
            "styles/audit-styles.css",
            "public/schema-audit.json",
        ] {
            assert_eq!(
                fs::read(first.join(rel)).unwrap(),
                fs::read(second.join(rel)).unwrap(),
                "{rel} differs between identical builds"
            );
        }
    }

    #[test]
    fn backup_copies_existing_tree() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("audit-package");
        fs::create_dir_all(out.join("docs")).unwrap();
        fs::write(out.join("docs/readme.md"), "previous build").unwrap();

        let backup = create_backup(&out, &test_logger()).unwrap().unwrap();
        assert!(
            backup
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("audit-package_backup_")
        );
        assert_eq!(
            fs::read_to_string(backup.join("docs/readme.md")).unwrap(),
            "previous build"
        );
        // Original is untouched.
        assert!(out.join("docs/readme.md").is_file());
    }

    #[test]
    fn backup_of_missing_dir_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        let result = create_backup(&tmp.path().join("nope"), &test_logger()).unwrap();
        assert!(result.is_none());
    }
}
