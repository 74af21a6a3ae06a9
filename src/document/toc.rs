use super::anchor::{anchor_of_target, slugify, BULLET_PATTERN, HEADING_PATTERN, TOC_LINK_PATTERN};
use super::types::{Toc, TocEntry};

/// Number of indentation spaces that make one level of TOC nesting
const INDENT_PER_LEVEL: usize = 2;

/// Locates the table-of-contents section and parses its bulleted list.
///
/// The section heading is matched case-insensitively against `label`
/// ("Table of contents" by default). The entry list is read from the
/// lines that follow: bullet items become entries, blank lines are
/// skipped, and parsing stops at the next heading or at the first other
/// non-blank line. Headings inside fenced code blocks never match.
///
/// Returns `None` when no such section exists; the caller turns that
/// into an advisory, not a failure, since some documents legitimately
/// omit a TOC.
pub fn extract_toc(text: &str, label: &str) -> Option<Toc> {
    // A trailing colon on either side is cosmetic ("Table of contents:")
    let label_lower = label.trim().trim_end_matches(':').to_lowercase();
    let mut in_fence = false;
    let mut toc_line = None;
    let mut entries = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING_PATTERN.captures(line) {
            if toc_line.is_some() {
                // Next heading ends the TOC section
                break;
            }
            if caps[2].trim().trim_end_matches(':').to_lowercase() == label_lower {
                toc_line = Some(idx + 1);
            }
            continue;
        }

        if toc_line.is_none() {
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        match BULLET_PATTERN.captures(line) {
            Some(caps) => {
                let indent = caps.name("indent").map_or("", |m| m.as_str());
                entries.push(parse_entry(&caps["rest"], indent, idx + 1));
            }
            // Non-list content ends the section once we are inside it
            None => break,
        }
    }

    toc_line.map(|line| Toc { line, entries })
}

/// Builds one entry from the text after the bullet marker.
///
/// A `[text](#anchor)` link takes its anchor from the written target;
/// a bare entry derives one from its display text with the same
/// slugging rule headings use.
fn parse_entry(rest: &str, indent: &str, line: usize) -> TocEntry {
    // Tabs count as one indentation level each
    let width = indent.chars().map(|c| if c == '\t' { INDENT_PER_LEVEL } else { 1 }).sum::<usize>();
    let depth = width / INDENT_PER_LEVEL;

    match TOC_LINK_PATTERN.captures(rest) {
        Some(caps) => TocEntry {
            text: caps["text"].to_string(),
            anchor: anchor_of_target(&caps["target"]).to_string(),
            depth,
            line,
        },
        None => TocEntry {
            anchor: slugify(rest),
            text: rest.to_string(),
            depth,
            line,
        },
    }
}
