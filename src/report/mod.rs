// Table and JSON rendering of the collected report
mod display;

pub use display::{display_json, display_summary};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::checker::{
    check_consistency, find_device_widget, requires_device_widget, CheckOptions, Discrepancy,
    DiscrepancyKind,
};
use crate::config::Settings;
use crate::document::{extract_toc, load_document, parse_headings, ScanError};

/// Results for a single document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Path relative to the scan root
    pub path: PathBuf,
    /// Everything flagged for this document, in detection order
    pub discrepancies: Vec<Discrepancy>,
}

impl DocumentReport {
    pub fn passed(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Aggregated results for the whole corpus
#[derive(Debug, Serialize)]
pub struct CorpusReport {
    /// When the scan ran
    pub generated_at: DateTime<Utc>,
    /// Root the corpus was discovered under
    pub root: PathBuf,
    /// Per-document results, in discovery order
    pub documents: Vec<DocumentReport>,
}

impl CorpusReport {
    /// Whether any blocking discrepancy was found across the corpus
    pub fn has_blocking(&self, strict_order: bool) -> bool {
        self.documents.iter().any(|doc| {
            doc.discrepancies
                .iter()
                .any(|d| d.kind.is_blocking(strict_order))
        })
    }

    /// Count of discrepancies of one kind across the corpus
    pub fn count_of(&self, kind: DiscrepancyKind) -> usize {
        self.documents
            .iter()
            .flat_map(|doc| &doc.discrepancies)
            .filter(|d| d.kind == kind)
            .count()
    }
}

/// Runs the validation pipeline over every document under a root path
pub struct Reporter {
    settings: Settings,
    root: PathBuf,
    /// CLI excludes merged with the configured ones
    excludes: Vec<String>,
    strict_order: bool,
}

impl Reporter {
    pub fn new(settings: Settings, root: PathBuf, extra_excludes: Vec<String>, strict_order: bool) -> Self {
        let mut excludes = settings.scan.exclude.clone();
        excludes.extend(extra_excludes);
        Self {
            settings,
            root,
            excludes,
            strict_order,
        }
    }

    /// Discovers documents and validates each one.
    ///
    /// A failure reading or parsing one document is recorded as a
    /// `ParseFailure` discrepancy for that document and the scan
    /// continues; only a missing root aborts the run.
    pub fn run(&self) -> Result<CorpusReport, ScanError> {
        if !self.root.is_dir() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:.bold.dim} {spinner} {wide_msg}")
                .unwrap()
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb.set_message("Discovering documents...");

        let mut paths = Vec::new();
        self.collect_documents(&self.root, &mut paths);
        paths.sort();
        info!("Discovered {} documents under {}", paths.len(), self.root.display());

        let mut documents = Vec::with_capacity(paths.len());
        for path in &paths {
            let rel = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
            pb.set_message(format!("Checking {}", rel.display()));
            let report = self.check_document(path, rel);
            if !report.passed() {
                debug!(
                    "{}: {} discrepancies",
                    report.path.display(),
                    report.discrepancies.len()
                );
            }
            documents.push(report);
        }

        pb.finish_and_clear();

        Ok(CorpusReport {
            generated_at: Utc::now(),
            root: self.root.clone(),
            documents,
        })
    }

    /// Recursively gathers document paths by extension, skipping hidden
    /// entries and excluded paths. An unreadable subdirectory is logged
    /// and skipped, never aborting the scan of the rest of the corpus.
    fn collect_documents(&self, dir: &Path, paths: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();

            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if self.is_excluded(&path, &name) {
                debug!("Excluded from scan: {}", path.display());
                continue;
            }

            if path.is_dir() {
                self.collect_documents(&path, paths);
            } else if self.has_document_extension(&path) {
                paths.push(path);
            }
        }
    }

    fn has_document_extension(&self, path: &Path) -> bool {
        let ext = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => return false,
        };
        self.settings.scan.extensions.iter().any(|e| e == &ext)
    }

    /// An entry is excluded when its root-relative path equals or lives
    /// under an exclude entry, or its file name matches one
    fn is_excluded(&self, path: &Path, name: &str) -> bool {
        let rel = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        self.excludes.iter().any(|ex| {
            let ex = ex.trim_end_matches('/');
            rel == ex || rel.starts_with(&format!("{}/", ex)) || name == ex
        })
    }

    /// Runs the full pipeline for one document:
    /// parse -> TOC extract -> consistency -> device widget
    fn check_document(&self, path: &Path, rel: PathBuf) -> DocumentReport {
        let raw = match load_document(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                return DocumentReport {
                    path: rel,
                    discrepancies: vec![Discrepancy::new(
                        DiscrepancyKind::ParseFailure,
                        e.to_string(),
                        None,
                    )],
                };
            }
        };

        let headings = parse_headings(&raw.markdown);
        let toc = extract_toc(&raw.markdown, &self.settings.scan.toc_heading);

        let options = CheckOptions {
            strict_order: self.strict_order,
            excluded_headings: self.settings.scan.excluded_headings.clone(),
        };
        let mut discrepancies = check_consistency(&headings, toc.as_ref(), &options);

        if self.settings.widget.enabled
            && requires_device_widget(path, &self.settings.widget.require_in)
            && find_device_widget(&raw.code).is_none()
        {
            discrepancies.push(Discrepancy::new(
                DiscrepancyKind::MissingDeviceWidget,
                "no device-selection widget found in code cells",
                None,
            ));
        }

        DocumentReport {
            path: rel,
            discrepancies,
        }
    }
}
