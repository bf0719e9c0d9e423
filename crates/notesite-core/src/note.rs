//! Note types and identity rules.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};

/// Stable output identity of a note.
///
/// Derived from the file stem: Unicode-lowercased, with runs of whitespace,
/// underscores, and hyphens collapsed to a single hyphen, and leading or
/// trailing separators dropped. The identity names the note's output file
/// (`<identity>.html`) and the index links to it, so the rule is part of the
/// public contract between runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(String);

impl NoteId {
    /// Normalize a file stem into a note identity.
    pub fn from_stem(stem: &str) -> Self {
        let mut normalized = String::with_capacity(stem.len());
        let mut pending_separator = false;

        for c in stem.trim().chars() {
            if c.is_whitespace() || c == '_' || c == '-' {
                pending_separator = true;
            } else {
                if pending_separator && !normalized.is_empty() {
                    normalized.push('-');
                }
                pending_separator = false;
                for lower in c.to_lowercase() {
                    normalized.push(lower);
                }
            }
        }

        Self(normalized)
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the generated page for this identity.
    pub fn output_file_name(&self) -> String {
        format!("{}.html", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One loaded note, immutable once read.
#[derive(Debug, Clone)]
pub struct Note {
    /// Output identity derived from the file stem.
    pub id: NoteId,

    /// Title from the leading heading, or derived from the file name.
    pub title: String,

    /// Markdown body to render, without the title heading.
    pub body: String,

    /// Original file path, kept for error reporting.
    pub source_path: PathBuf,

    /// Filesystem modification time, shown on the index page.
    pub modified: Option<DateTime<Utc>>,
}

impl Note {
    /// Build a note from its source path and raw file contents.
    ///
    /// Returns `None` when the path has no usable UTF-8 file stem.
    pub fn from_source(path: &Path, raw: String, modified: Option<DateTime<Utc>>) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let id = NoteId::from_stem(stem);
        let (title, body) = split_title(&raw, stem);

        Some(Self {
            id,
            title,
            body,
            source_path: path.to_path_buf(),
            modified,
        })
    }

    /// File name of this note's generated page.
    pub fn output_file_name(&self) -> String {
        self.id.output_file_name()
    }
}

/// Whether a path carries a markdown note extension.
pub fn has_note_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "md" | "markdown"))
}

/// Split a note body into its title and remaining content.
///
/// When the first non-blank line is an ATX heading, its text becomes the
/// title and the line is removed from the rendered body. Otherwise the
/// title is derived from the file stem and the body is left untouched.
pub fn split_title(raw: &str, stem: &str) -> (String, String) {
    let mut offset = 0;

    for segment in raw.split_inclusive('\n') {
        let line = segment.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            offset += segment.len();
            continue;
        }
        if let Some(title) = heading_text(line) {
            return (title, raw[offset + segment.len()..].to_string());
        }
        break;
    }

    (title_from_stem(stem), raw.to_string())
}

/// Extract the text of an ATX heading line, if the line is one.
fn heading_text(line: &str) -> Option<String> {
    let trimmed = line.trim_start_matches(' ');
    // an ATX heading allows at most three leading spaces
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &trimmed[level..];
    if !(rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')) {
        return None;
    }

    let mut text = rest.trim();
    // a closing run of hashes is not part of the heading text
    let stripped = text.trim_end_matches('#');
    if stripped.len() != text.len()
        && (stripped.is_empty() || stripped.ends_with(' ') || stripped.ends_with('\t'))
    {
        text = stripped.trim_end();
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Derive a display title from a file stem.
///
/// Separators become spaces and each word is capitalized.
pub fn title_from_stem(stem: &str) -> String {
    stem.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
