// Anchor slugging and the compiled text patterns
pub mod anchor;

// Heading extraction and file loading
mod parser;

// Table-of-contents section parsing
mod toc;

// Shared document model and errors
mod types;

// Re-export from parser
pub use parser::{extract_fenced_code, load_document, parse_headings};
// Re-export from toc
pub use toc::extract_toc;
// Re-export from types
pub use types::{DocumentKind, Heading, RawDocument, ScanError, Toc, TocEntry};
