use std::path::Path;
use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized device-selection constructions: the shared notebook helper
/// `device_widget(...)` or a raw ipywidgets dropdown described as the
/// device picker
static DEVICE_WIDGET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"device_widget\s*\(|widgets\.Dropdown\s*\([^)]*description\s*=\s*['"][Dd]evice"#,
    )
    .unwrap()
});

/// Scans code snippets for a device-selection widget construction.
///
/// Returns the first line containing a match, for inclusion in the
/// report, or `None` when no snippet matches.
pub fn find_device_widget(snippets: &[String]) -> Option<String> {
    for snippet in snippets {
        if let Some(m) = DEVICE_WIDGET_PATTERN.find(snippet) {
            let line = snippet[..m.start()]
                .rfind('\n')
                .map_or(&snippet[..], |pos| &snippet[pos + 1..]);
            let line = line.lines().next().unwrap_or(line);
            return Some(line.trim().to_string());
        }
    }
    None
}

/// Whether a document is on the allow-list of notebooks expected to
/// carry a device widget. This is an opt-in lint: absence elsewhere is
/// never an error, since not every notebook selects an inference device.
pub fn requires_device_widget(path: &Path, allow_list: &[String]) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return false,
    };
    allow_list.iter().any(|expected| expected == name.as_ref())
}
