use std::fs;
use std::path::Path;
use serde::Deserialize;

use super::anchor::{slugify, HEADING_PATTERN};
use super::types::{DocumentKind, Heading, RawDocument, ScanError};

/// Minimal view of a Jupyter notebook file. Only the fields the checker
/// needs are deserialized; everything else in the JSON is ignored.
#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<NotebookCell>,
}

/// One notebook cell with its type tag and source text
#[derive(Debug, Deserialize)]
struct NotebookCell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

/// Notebook cell sources appear either as a list of lines or a single
/// string, depending on the tool that wrote the file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Lines(lines) => lines.concat(),
            CellSource::Text(text) => text,
        }
    }
}

/// Loads a document from disk, producing its markdown text and code
/// snippets according to the file extension.
///
/// Markdown files are read whole; their fenced code blocks are collected
/// as snippets. Notebooks are parsed as JSON: markdown cells are joined
/// (newline-separated, so heading line numbers stay meaningful across
/// cells) and code cells become snippets.
///
/// # Errors
/// Returns a `ScanError` if the file cannot be read, is not valid UTF-8,
/// or is a notebook with malformed JSON.
pub fn load_document(path: &Path) -> Result<RawDocument, ScanError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|e| {
        ScanError::Undecodable(format!("{}: {}", path.display(), e))
    })?;

    match extension.as_str() {
        "ipynb" => load_notebook(&content),
        // Anything else discovered by the scanner is treated as markdown
        _ => Ok(RawDocument {
            kind: DocumentKind::Markdown,
            code: extract_fenced_code(&content),
            markdown: content,
        }),
    }
}

/// Parses notebook JSON into the raw document model
fn load_notebook(content: &str) -> Result<RawDocument, ScanError> {
    let notebook: Notebook = serde_json::from_str(content)?;

    let mut markdown = String::new();
    let mut code = Vec::new();

    for cell in notebook.cells {
        let text = cell.source.into_text();
        match cell.cell_type.as_str() {
            "markdown" => {
                if !markdown.is_empty() {
                    markdown.push('\n');
                }
                markdown.push_str(&text);
                if !markdown.ends_with('\n') {
                    markdown.push('\n');
                }
            }
            "code" => code.push(text),
            // Raw cells carry neither headings nor device widgets
            _ => {}
        }
    }

    Ok(RawDocument {
        kind: DocumentKind::Notebook,
        markdown,
        code,
    })
}

/// Extracts the ordered sequence of headings from markdown text.
///
/// Recognizes ATX headings at levels 1-6 and records their 1-based line
/// positions. Lines inside fenced code blocks (between triple-backtick
/// delimiters) are skipped, since `# comment` lines in shell or Python
/// snippets would otherwise register as headings. Malformed heading
/// syntax is tolerated as plain text.
pub fn parse_headings(text: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for (idx, line) in text.lines().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING_PATTERN.captures(line) {
            let display = caps[2].to_string();
            headings.push(Heading {
                level: caps[1].len() as u8,
                anchor: slugify(&display),
                text: display,
                line: idx + 1,
            });
        }
    }

    headings
}

/// Collects the contents of fenced code blocks from markdown text, one
/// snippet per block. Used for the device-widget check on plain markdown
/// documents, where code lives inline rather than in cells.
pub fn extract_fenced_code(text: &str) -> Vec<String> {
    let mut snippets = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            match current.take() {
                Some(snippet) => snippets.push(snippet),
                None => current = Some(String::new()),
            }
            continue;
        }
        if let Some(snippet) = current.as_mut() {
            snippet.push_str(line);
            snippet.push('\n');
        }
    }

    snippets
}
