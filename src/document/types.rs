use std::fmt;
use std::error::Error;
use std::path::PathBuf;
use serde::Serialize;

/// A heading extracted from a document body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    /// Nesting level (1 for `#`, up to 6 for `######`)
    pub level: u8,
    /// Display text as written, without the leading markers
    pub text: String,
    /// 1-based line position in the document's markdown text
    pub line: usize,
    /// Derived anchor slug the heading is addressable by
    pub anchor: String,
}

/// One entry of a declared table of contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Display text of the entry
    pub text: String,
    /// Anchor reference, as written or derived from the display text
    pub anchor: String,
    /// Nesting depth inferred from list indentation (0 = top level)
    pub depth: usize,
    /// 1-based line position of the entry
    pub line: usize,
}

/// A located table-of-contents section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toc {
    /// Line of the "Table of contents" heading itself
    pub line: usize,
    /// Entries in declaration order
    pub entries: Vec<TocEntry>,
}

/// Kind of source file a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    /// Plain markdown file
    Markdown,
    /// Jupyter notebook (JSON with markdown and code cells)
    Notebook,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentKind::Markdown => write!(f, "markdown"),
            DocumentKind::Notebook => write!(f, "notebook"),
        }
    }
}

/// Raw content of a loaded document, before heading extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Source file kind
    pub kind: DocumentKind,
    /// Concatenated markdown text (whole file for markdown sources,
    /// joined markdown cells for notebooks)
    pub markdown: String,
    /// Code snippets (code cells for notebooks, fenced blocks for markdown)
    pub code: Vec<String>,
}

/// Custom error types for document scanning
#[derive(Debug)]
pub enum ScanError {
    /// Wraps std::io::Error for file operations
    Io(std::io::Error),
    /// File content is not valid UTF-8
    Undecodable(String),
    /// Notebook JSON is missing or malformed
    Notebook(String),
    /// The scan root path does not exist
    RootNotFound(PathBuf),
}

/// Implements Display trait for ScanError for error reporting
impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::Io(e) => write!(f, "I/O error: {}", e),
            ScanError::Undecodable(msg) => write!(f, "Undecodable content: {}", msg),
            ScanError::Notebook(msg) => write!(f, "Invalid notebook: {}", msg),
            ScanError::RootNotFound(path) => write!(f, "Root path not found: {}", path.display()),
        }
    }
}

/// Implements Error trait to allow ScanError to be used as a standard error type
impl Error for ScanError {}

/// Allows automatic conversion from std::io::Error to ScanError
impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        ScanError::Io(err)
    }
}

/// Allows automatic conversion from serde_json::Error to ScanError
impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        ScanError::Notebook(err.to_string())
    }
}
