use std::fs;
use std::path::PathBuf;

use notelint::checker::DiscrepancyKind;
use notelint::config::Settings;
use notelint::report::Reporter;

/// Creates a fresh corpus directory under the system temp dir.
/// Each test uses its own name so runs never interfere.
fn corpus_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("notelint-test-{}-{}", name, std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

const CONSISTENT_MD: &str = "\
# Tutorial

#### Table of contents:
- [Prerequisites](#prerequisites)
- [Create tools](#create-tools)

## Prerequisites

text

## Create tools

text
";

const ORPHAN_MD: &str = "\
# Tutorial

#### Table of contents:
- [Prerequisites](#prerequisites)
- [Create tools](#create-tools)

## Prerequisites

## Create tools

## Create LLM
";

#[test]
fn consistent_corpus_passes() {
    let dir = corpus_dir("pass");
    fs::write(dir.join("good.md"), CONSISTENT_MD).unwrap();

    let reporter = Reporter::new(Settings::default(), dir.clone(), Vec::new(), false);
    let report = reporter.run().unwrap();

    assert_eq!(report.documents.len(), 1);
    assert!(report.documents[0].passed());
    assert!(!report.has_blocking(false));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn orphan_heading_blocks_the_run() {
    let dir = corpus_dir("orphan");
    fs::write(dir.join("bad.md"), ORPHAN_MD).unwrap();

    let reporter = Reporter::new(Settings::default(), dir.clone(), Vec::new(), false);
    let report = reporter.run().unwrap();

    assert_eq!(report.count_of(DiscrepancyKind::OrphanHeading), 1);
    let doc = &report.documents[0];
    assert_eq!(doc.discrepancies.len(), 1);
    assert_eq!(doc.discrepancies[0].detail, "Create LLM");
    assert!(report.has_blocking(false));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn notebook_without_device_widget_is_flagged() {
    let dir = corpus_dir("widget");

    let notebook = serde_json::json!({
        "cells": [
            {
                "cell_type": "markdown",
                "source": [
                    "# Chatbot\n",
                    "\n",
                    "#### Table of contents:\n",
                    "- [Run inference](#run-inference)\n"
                ]
            },
            {"cell_type": "code", "source": ["model.compile()\n"]},
            {"cell_type": "markdown", "source": ["## Run inference\n"]}
        ],
        "metadata": {}
    });
    fs::write(
        dir.join("llm-chatbot.ipynb"),
        serde_json::to_string(&notebook).unwrap(),
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.widget.require_in = vec!["llm-chatbot.ipynb".to_string()];

    let reporter = Reporter::new(settings, dir.clone(), Vec::new(), false);
    let report = reporter.run().unwrap();

    assert_eq!(report.count_of(DiscrepancyKind::MissingDeviceWidget), 1);
    // Advisory: the run still passes
    assert!(!report.has_blocking(false));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn unreadable_document_does_not_abort_the_scan() {
    let dir = corpus_dir("continue");
    fs::write(dir.join("broken.ipynb"), "{not json at all").unwrap();
    fs::write(dir.join("good.md"), CONSISTENT_MD).unwrap();

    let reporter = Reporter::new(Settings::default(), dir.clone(), Vec::new(), false);
    let report = reporter.run().unwrap();

    // Both documents appear; the broken one carries a parse failure
    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.count_of(DiscrepancyKind::ParseFailure), 1);
    assert!(report
        .documents
        .iter()
        .any(|d| d.path == PathBuf::from("good.md") && d.passed()));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn excluded_paths_are_skipped() {
    let dir = corpus_dir("exclude");
    fs::create_dir_all(dir.join("drafts")).unwrap();
    fs::write(dir.join("drafts").join("wip.md"), ORPHAN_MD).unwrap();
    fs::write(dir.join("good.md"), CONSISTENT_MD).unwrap();

    let reporter = Reporter::new(
        Settings::default(),
        dir.clone(),
        vec!["drafts".to_string()],
        false,
    );
    let report = reporter.run().unwrap();

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].path, PathBuf::from("good.md"));

    fs::remove_dir_all(dir).unwrap();
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_does_not_abort_the_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = corpus_dir("unreadable");
    let locked = dir.join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("hidden.md"), CONSISTENT_MD).unwrap();
    fs::write(dir.join("good.md"), CONSISTENT_MD).unwrap();

    // Revoke all permissions on the subdirectory; the scan must skip it
    // rather than error out
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let reporter = Reporter::new(Settings::default(), dir.clone(), Vec::new(), false);
    let report = reporter.run().unwrap();
    assert!(report
        .documents
        .iter()
        .any(|d| d.path == PathBuf::from("good.md") && d.passed()));

    // Restore permissions so cleanup can remove the tree
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_root_is_an_error() {
    let reporter = Reporter::new(
        Settings::default(),
        PathBuf::from("/definitely/not/a/real/path"),
        Vec::new(),
        false,
    );
    assert!(reporter.run().is_err());
}

#[test]
fn strict_order_flags_out_of_order_toc() {
    let dir = corpus_dir("order");
    let doc = "\
# Tutorial

#### Table of contents:
- [B](#b)
- [A](#a)

## A

## B
";
    fs::write(dir.join("order.md"), doc).unwrap();

    let relaxed = Reporter::new(Settings::default(), dir.clone(), Vec::new(), false)
        .run()
        .unwrap();
    assert!(!relaxed.has_blocking(false));

    let strict = Reporter::new(Settings::default(), dir.clone(), Vec::new(), true)
        .run()
        .unwrap();
    assert_eq!(strict.count_of(DiscrepancyKind::OrderMismatch), 1);
    assert!(strict.has_blocking(true));

    fs::remove_dir_all(dir).unwrap();
}
