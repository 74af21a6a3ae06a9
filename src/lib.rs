// Consistency checks (TOC vs headings, device widget)
pub mod checker;

// Command line argument surface
pub mod cli;

// Settings loading and validation
pub mod config;

// Document loading, heading extraction, TOC parsing
pub mod document;

// Corpus discovery, pipeline execution, summary rendering
pub mod report;
