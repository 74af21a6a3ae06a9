// Device-selection widget lint
mod device;

pub use device::{find_device_widget, requires_device_widget};

use std::fmt;
use serde::Serialize;

use crate::document::anchor::slugify;
use crate::document::{Heading, Toc};

/// Kinds of mismatch a document can be flagged for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiscrepancyKind {
    /// Heading below the TOC section with no matching TOC entry
    OrphanHeading,
    /// TOC entry whose anchor matches no heading
    DanglingTocEntry,
    /// TOC order differs from document order (strict mode only)
    OrderMismatch,
    /// Document has no table-of-contents section
    MissingToc,
    /// Expected device-selection widget snippet was not found
    MissingDeviceWidget,
    /// Document could not be read or parsed
    ParseFailure,
}

impl DiscrepancyKind {
    /// Whether this kind fails the run. Orphan headings and dangling TOC
    /// entries always block; order mismatches block only in strict mode.
    /// The remaining kinds are advisory and merely counted.
    pub fn is_blocking(&self, strict_order: bool) -> bool {
        match self {
            DiscrepancyKind::OrphanHeading | DiscrepancyKind::DanglingTocEntry => true,
            DiscrepancyKind::OrderMismatch => strict_order,
            DiscrepancyKind::MissingToc
            | DiscrepancyKind::MissingDeviceWidget
            | DiscrepancyKind::ParseFailure => false,
        }
    }

    /// Short label used in the report table
    pub fn label(&self) -> &'static str {
        match self {
            DiscrepancyKind::OrphanHeading => "orphan heading",
            DiscrepancyKind::DanglingTocEntry => "dangling TOC entry",
            DiscrepancyKind::OrderMismatch => "order mismatch",
            DiscrepancyKind::MissingToc => "missing TOC",
            DiscrepancyKind::MissingDeviceWidget => "missing device widget",
            DiscrepancyKind::ParseFailure => "parse failure",
        }
    }
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One detected mismatch between declared and actual document structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    /// What went wrong
    pub kind: DiscrepancyKind,
    /// The offending heading or entry text, or the failure message
    pub detail: String,
    /// Line position in the document, when known
    pub line: Option<usize>,
}

impl Discrepancy {
    pub fn new(kind: DiscrepancyKind, detail: impl Into<String>, line: Option<usize>) -> Self {
        Self { kind, detail: detail.into(), line }
    }
}

/// Options for one consistency pass
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Report `OrderMismatch` when TOC order differs from document order
    pub strict_order: bool,
    /// Boilerplate headings exempt from the orphan check
    /// (e.g. "Installation Instructions")
    pub excluded_headings: Vec<String>,
}

/// Compares the extracted headings against the declared TOC entries.
///
/// Matching is by anchor equality, case-insensitive, never by display
/// text, since display text may carry emoji or punctuation the rendered
/// anchor drops. A document with zero discrepancies passes.
///
/// Without a TOC the document gets a single `MissingToc` advisory and no
/// blocking discrepancies.
pub fn check_consistency(
    headings: &[Heading],
    toc: Option<&Toc>,
    options: &CheckOptions,
) -> Vec<Discrepancy> {
    let toc = match toc {
        Some(toc) => toc,
        None => {
            return vec![Discrepancy::new(
                DiscrepancyKind::MissingToc,
                "no table-of-contents section found",
                None,
            )];
        }
    };

    let mut discrepancies = Vec::new();

    let excluded: Vec<String> = options
        .excluded_headings
        .iter()
        .map(|text| slugify(text))
        .collect();

    let declared: Vec<String> = toc
        .entries
        .iter()
        .map(|entry| entry.anchor.to_lowercase())
        .collect();

    // Orphan headings: below the TOC section, not excluded, not declared
    for heading in headings.iter().filter(|h| h.line > toc.line) {
        let anchor = heading.anchor.to_lowercase();
        if excluded.contains(&anchor) {
            continue;
        }
        if !declared.contains(&anchor) {
            discrepancies.push(Discrepancy::new(
                DiscrepancyKind::OrphanHeading,
                heading.text.clone(),
                Some(heading.line),
            ));
        }
    }

    // Dangling entries: declared anchor resolves to no heading.
    // Also record, per entry, the position of the first heading it
    // matched, for the strict-order pass below.
    let mut matched_positions = Vec::new();
    for entry in &toc.entries {
        let anchor = entry.anchor.to_lowercase();
        match headings.iter().position(|h| h.anchor.to_lowercase() == anchor) {
            Some(pos) => matched_positions.push((entry, pos)),
            None => discrepancies.push(Discrepancy::new(
                DiscrepancyKind::DanglingTocEntry,
                entry.text.clone(),
                Some(entry.line),
            )),
        }
    }

    // Strict mode: resolved entries must appear in document order.
    // Dangling entries are excluded here, they are already reported.
    if options.strict_order {
        for pair in matched_positions.windows(2) {
            let (entry, pos) = pair[1];
            if pos < pair[0].1 {
                discrepancies.push(Discrepancy::new(
                    DiscrepancyKind::OrderMismatch,
                    entry.text.clone(),
                    Some(entry.line),
                ));
                break;
            }
        }
    }

    discrepancies
}
