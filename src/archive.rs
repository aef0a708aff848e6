//! Distribution archive creation.
//!
//! Optional final stage of the build pipeline. Walks the written output
//! tree and produces a single Deflate-compressed ZIP. Entry names are
//! relative to the *parent* of the output directory, so the archive
//! extracts to `audit-package/...` rather than spilling its contents
//! into the extraction directory:
//!
//! ```text
//! audit-package.zip
//! ├── audit-package/build-manifest.json
//! ├── audit-package/docs/readme.md
//! └── audit-package/...
//! ```
//!
//! Every regular file in the tree becomes exactly one entry — no
//! exclusion rules. Symlinks are not followed and not supported. The
//! writer handle is finalized on every exit path: `finish()` on
//! success, `ZipWriter`'s drop on early returns.

use crate::logger::BuildLogger;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Create a Deflate-compressed ZIP of `source_dir` at `output_path`.
///
/// Returns the archive path and logs the final byte size.
///
/// # Errors
///
/// Any walk, read, or write failure aborts the archive; a partially
/// written file may remain at `output_path`.
pub fn create_zip(
    source_dir: &Path,
    output_path: &Path,
    logger: &BuildLogger,
) -> Result<PathBuf, ArchiveError> {
    logger.info(&format!("Creating ZIP archive: {}", output_path.display()));

    // Entries are rooted at the output directory's own name.
    let root = source_dir.parent().unwrap_or(source_dir);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let file = File::create(output_path)?;
    let mut writer = ZipWriter::new(file);

    for entry in WalkDir::new(source_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let arc_name = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        writer.start_file(arc_name.as_str(), options)?;
        writer.write_all(&fs::read(entry.path())?)?;
        logger.debug(&format!("  Added: {arc_name}"));
    }

    let file = writer.finish()?;
    let size = file.metadata()?.len();
    logger.info(&format!("ZIP created: {size} bytes"));
    Ok(output_path.to_path_buf())
}
