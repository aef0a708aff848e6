//! # DCS Builder
//!
//! Generates the Digital Credibility Score audit landing page package:
//! an Astro page component, its stylesheet, a JSON-LD structured data
//! document, and an implementation README — validated, written to disk
//! with a checksummed build manifest, and optionally zipped for
//! distribution. A one-shot, offline tool: no network, no concurrency,
//! no retries.
//!
//! # Architecture: Linear Pipeline
//!
//! One build is a strict linear sequence with a single abort gate:
//!
//! ```text
//! GENERATE → VALIDATE → (abort | WRITE) → (PACKAGE)?
//! ```
//!
//! - **Generate** ([`content`]) — produce the four artifacts from fixed
//!   templates. Pure except for the README's embedded timestamp.
//! - **Validate** ([`validate`]) — size floors, required substrings, and
//!   JSON-LD type coverage. Any failure aborts before anything touches
//!   the filesystem.
//! - **Write** ([`build`]) — persist artifacts under the output
//!   directory and record paths, SHA-256 checksums, and validation
//!   reports into `build-manifest.json`.
//! - **Package** ([`archive`]) — optionally zip the written tree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Immutable [`config::BuildConfig`], constructed once at startup |
//! | [`content`] | Artifact generation from embedded `static/` templates |
//! | [`validate`] | Per-artifact check functions producing `PASS:`/`FAIL:` reports |
//! | [`build`] | Writer: persistence, checksums, backup, and the build manifest |
//! | [`archive`] | ZIP packaging of the written tree |
//! | [`logger`] | Explicit logger value passed into every stage — no global state |
//!
//! # Design Decisions
//!
//! ## Templates Embedded at Compile Time
//!
//! The page component and stylesheet are `include_str!`-embedded from
//! `static/`, so the binary is fully self-contained — nothing to ship
//! alongside it, nothing to get out of sync.
//!
//! ## Validation Before Any Write
//!
//! The build either writes the complete artifact set (best-effort, not
//! atomic) or writes nothing at all. There is no partial-failure
//! continuation and no retry: for a local one-shot tool, retrying a
//! failed filesystem write has no expected benefit.
//!
//! ## Checksums as the Only Integrity Guarantee
//!
//! The manifest records a SHA-256 digest of exactly the bytes written
//! for each artifact. Verification is external — consumers recompute
//! and compare. The builder never reads its own output back.
//!
//! ## No Global Logger
//!
//! Logging goes through an explicitly constructed [`logger::BuildLogger`]
//! passed by reference, keeping stages testable in parallel and free of
//! hidden process-wide state.

pub mod archive;
pub mod build;
pub mod config;
pub mod content;
pub mod logger;
pub mod validate;
