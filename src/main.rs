use clap::Parser;
use dcs_builder::archive;
use dcs_builder::build::{self, BuildError, BuildManifest};
use dcs_builder::config::BuildConfig;
use dcs_builder::logger::BuildLogger;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "dcs-builder")]
#[command(about = "NexTara DCS Audit Landing Page Builder")]
#[command(long_about = "\
NexTara DCS Audit Landing Page Builder

Generates the Digital Credibility Score audit landing page package from
embedded templates, validates every artifact before anything is written,
and records checksums in a build manifest.

Output layout:

  audit-package/
  ├── src/pages/digital-credibility-score-audit.astro
  ├── styles/audit-styles.css
  ├── public/schema-audit.json
  ├── docs/readme.md
  └── build-manifest.json

Exit codes: 0 success, 1 validation failed (nothing written), 2 any
other failure.")]
#[command(version = version_string())]
struct Cli {
    /// Output directory
    #[arg(short, long, default_value = "audit-package")]
    output: PathBuf,

    /// Create distribution ZIP after build
    #[arg(long)]
    zip: bool,

    /// Backup existing output directory before overwriting
    #[arg(long)]
    backup: bool,

    /// Validate without writing files
    #[arg(long)]
    dry_run: bool,

    /// Write detailed log to file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let logger = match BuildLogger::new(cli.verbose, cli.log_file.as_deref()) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("cannot open log file: {e}");
            std::process::exit(2);
        }
    };
    let config = BuildConfig::default();

    logger.info(&"=".repeat(60));
    logger.info(&format!("NexTara DCS Audit Builder {}", config.version));
    logger.info(&format!("PromptCore Alignment: {}", config.promptcore_ver));
    logger.info(&"=".repeat(60));

    // The only place errors become exit codes.
    let code = match run(&cli, &config, &logger) {
        Ok(manifest) => {
            logger.info(&"=".repeat(60));
            logger.info("BUILD COMPLETE");
            logger.info(&format!("  Output: {}", cli.output.display()));
            logger.info(&format!("  Artifacts: {}", manifest.artifacts.len()));
            logger.info(&"=".repeat(60));
            0
        }
        Err(BuildError::ValidationFailed) => {
            logger.error("Validation failed: content validation failed");
            1
        }
        Err(e) => {
            logger.error(&format!("Build failed: {e}"));
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli, config: &BuildConfig, logger: &BuildLogger) -> Result<BuildManifest, BuildError> {
    if cli.backup {
        build::create_backup(&cli.output, logger)?;
    }

    let manifest = build::build_package(&cli.output, config, logger, cli.dry_run)?;

    if cli.zip && !cli.dry_run {
        let zip_path = sibling_zip_path(&cli.output);
        archive::create_zip(&cli.output, &zip_path, logger)?;
    }

    Ok(manifest)
}

/// `audit-package` → `audit-package.zip`, next to the output directory.
fn sibling_zip_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audit-package".to_string());
    output
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(format!("{name}.zip"))
}
