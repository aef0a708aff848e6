//! Artifact content generation.
//!
//! Stage 1 of the build pipeline. Produces the four package artifacts as
//! in-memory values from fixed templates:
//!
//! - **Page component** — the Astro landing page, a single literal template
//! - **JSON-LD document** — structured data for search/AI crawlers
//! - **Stylesheet** — page-specific CSS, fully literal
//! - **README** — integration instructions with version/timestamp stamps
//!
//! The page template and stylesheet are embedded at compile time from
//! `static/`, the same way the site CSS and navigation script ship inside
//! the binary. Only the JSON-LD generator reads `domain` and `page_slug`
//! from the config — the page template carries its canonical URLs as
//! literals. That asymmetry is inherited from the original package and is
//! preserved deliberately rather than papered over by parameterizing the
//! template.
//!
//! Everything here is a pure function of [`BuildConfig`] except
//! [`readme`], which stamps the current UTC time — the single source of
//! non-determinism in the whole build.

use crate::config::BuildConfig;
use chrono::Utc;
use serde_json::{Value, json};

const PAGE_TEMPLATE: &str = include_str!("../static/audit-page.astro");
const STYLESHEET: &str = include_str!("../static/audit-styles.css");

/// The Astro page component, verbatim from the embedded template.
pub fn astro_page() -> &'static str {
    PAGE_TEMPLATE
}

/// Page-specific CSS, verbatim from the embedded stylesheet.
pub fn stylesheet() -> &'static str {
    STYLESHEET
}

/// JSON-LD structured data for the audit page.
///
/// Builds a `@graph` of three typed nodes — `WebPage`, `Service`, and
/// `FAQPage` — with every URL string-joined from `config.domain` and
/// `config.page_slug`. The graph node order is fixed; validation treats
/// the `@type` values as a set.
pub fn schema_document(config: &BuildConfig) -> Value {
    let domain = &config.domain;
    let base_url = format!("{}/{}", domain, config.page_slug);
    json!({
        "@context": "https://schema.org",
        "@graph": [
            {
                "@type": "WebPage",
                "@id": base_url,
                "url": base_url,
                "name": "Digital Credibility Score Audit | NexTara AI Solutions",
                "description": "Request a Digital Credibility Score Audit to understand whether your current website can realistically reach a DCS 900+ standard.",
                "isPartOf": {"@id": format!("{domain}/#website")},
                "primaryImageOfPage": {
                    "@type": "ImageObject",
                    "@id": format!("{domain}/#dcs-audit-hero-image")
                }
            },
            {
                "@type": "Service",
                "@id": format!("{domain}/#dcs-audit-service"),
                "name": "Digital Credibility Score Audit",
                "provider": {"@type": "Organization", "name": "NexTara AI Solutions"},
                "description": "A governance-grade diagnostic that evaluates your website across five pillars of the Digital Credibility Score framework.",
                "areaServed": {"@type": "AdministrativeArea", "name": "United States"}
            },
            {
                "@type": "FAQPage",
                "@id": format!("{domain}/#dcs-audit-faq"),
                "mainEntity": [
                    {
                        "@type": "Question",
                        "name": "Is this just an SEO audit with a different label?",
                        "acceptedAnswer": {
                            "@type": "Answer",
                            "text": "No. A DCS Audit includes SEO and schema, but it also evaluates conversion, trust, analytics, and governance."
                        }
                    },
                    {
                        "@type": "Question",
                        "name": "Can my current agency or developer use this audit?",
                        "acceptedAnswer": {
                            "@type": "Answer",
                            "text": "Yes. The audit is vendor-neutral. You keep the score, the findings, and the documentation."
                        }
                    },
                    {
                        "@type": "Question",
                        "name": "What if my score is already high?",
                        "acceptedAnswer": {
                            "@type": "Answer",
                            "text": "The audit focuses on unlocking specific opportunities: AI visibility, conversion lift, and governance hardening."
                        }
                    },
                    {
                        "@type": "Question",
                        "name": "Will you try to sell me a full website rebuild?",
                        "acceptedAnswer": {
                            "@type": "Answer",
                            "text": "Only if the data justifies it. The DCS Audit is designed to answer: Can this website realistically operate as a DCS 900+ asset?"
                        }
                    }
                ]
            }
        ]
    })
}

/// Implementation README with version, alignment tag, and a UTC timestamp.
pub fn readme(config: &BuildConfig) -> String {
    format!(
        "# Digital Credibility Score Audit — Implementation Package

**Version:** {version}
**PromptCore Alignment:** {promptcore}
**Generated:** {generated}

## Contents

- `src/pages/digital-credibility-score-audit.astro` — Page component
- `styles/audit-styles.css` — Component styles
- `public/schema-audit.json` — JSON-LD structured data
- `docs/readme.md` — This document
- `build-manifest.json` — Reproducibility manifest with checksums

## Integration Steps

1. Copy `digital-credibility-score-audit.astro` to `src/pages/`
2. Import `audit-styles.css` in your global stylesheet
3. Inject `schema-audit.json` via build-time import or script tag
4. Update homepage CTAs to link to `/digital-credibility-score-audit`
5. Configure Netlify Forms for `dcs-audit-request` form name

## Verification

Run checksums against `build-manifest.json` to verify artifact integrity.

## Form Configuration

The form includes `data-netlify=\"true\"` and `name=\"dcs-audit-request\"` for
automatic Netlify Forms integration. Ensure Netlify Forms is enabled in your
site settings.
",
        version = config.version,
        promptcore = config.promptcore_ver,
        generated = Utc::now().to_rfc3339(),
    )
}
