//! Note discovery and loading.
//!
//! Reads the input directory and turns every markdown file into a loaded
//! [`Note`], in a deterministic order.

use std::{collections::BTreeMap, fs, path::PathBuf};

use chrono::{DateTime, Utc};
use notesite_core::{
    note::{has_note_extension, Note, NoteId},
    IndexOrder,
};
use thiserror::Error;
use tracing::{debug, info};

/// Note collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The input directory is missing or unreadable.
    #[error("cannot read notes directory {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single note file could not be read.
    #[error("cannot read note {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two notes normalize to the same output identity.
    #[error("notes {first} and {second} both map to output identity '{identity}'")]
    Conflict {
        identity: NoteId,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Collects notes from a flat input directory.
#[derive(Debug)]
pub struct NoteCollector {
    input_dir: PathBuf,
}

impl NoteCollector {
    /// Create a new collector for the given input directory.
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
        }
    }

    /// Collect every markdown note in the input directory.
    ///
    /// Entries are processed in file-name order so discovery is
    /// deterministic. Non-note entries and subdirectories are skipped
    /// silently. Identity conflicts are detected here, before any output
    /// exists, so a conflicting pair never produces partial output.
    pub fn collect(&self) -> Result<Vec<Note>> {
        info!(dir = %self.input_dir.display(), "collecting notes");

        let entries = fs::read_dir(&self.input_dir).map_err(|e| CollectorError::Load {
            path: self.input_dir.clone(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CollectorError::Load {
                path: self.input_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && has_note_extension(&path) {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "skipping non-note entry");
            }
        }
        paths.sort();

        let mut seen: BTreeMap<NoteId, PathBuf> = BTreeMap::new();
        let mut notes = Vec::with_capacity(paths.len());

        for path in paths {
            let raw = fs::read_to_string(&path).map_err(|e| CollectorError::Read {
                path: path.clone(),
                source: e,
            })?;
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            let Some(note) = Note::from_source(&path, raw, modified) else {
                debug!(path = %path.display(), "skipping entry without a usable file stem");
                continue;
            };

            if let Some(first) = seen.get(&note.id) {
                return Err(CollectorError::Conflict {
                    identity: note.id.clone(),
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(note.id.clone(), path);
            notes.push(note);
        }

        info!(count = notes.len(), "collected notes");
        Ok(notes)
    }
}

/// Sort notes for the index page by the configured order.
pub fn sort_for_index(notes: &mut [Note], order: IndexOrder) {
    match order {
        IndexOrder::Title => notes.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        }),
        IndexOrder::Name => notes.sort_by(|a, b| a.id.cmp(&b.id)),
        IndexOrder::Modified => notes.sort_by(|a, b| {
            // newest first, notes without a timestamp last
            match (&a.modified, &b.modified) {
                (Some(a_time), Some(b_time)) => b_time.cmp(a_time),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_collect_notes_sorted_by_file_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("beta.md"), "# Beta\n").expect("write");
        fs::write(dir.path().join("alpha.md"), "# Alpha\n").expect("write");

        let notes = NoteCollector::new(dir.path()).collect().expect("collect");

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id.as_str(), "alpha");
        assert_eq!(notes[1].id.as_str(), "beta");
    }

    #[test]
    fn test_collect_skips_other_files_and_dirs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("note.md"), "text").expect("write");
        fs::write(dir.path().join("image.png"), [0u8; 4]).expect("write");
        fs::write(dir.path().join("README.txt"), "readme").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("nested/inner.md"), "inner").expect("write");

        let notes = NoteCollector::new(dir.path()).collect().expect("collect");

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id.as_str(), "note");
    }

    #[test]
    fn test_collect_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("does-not-exist");

        let err = NoteCollector::new(&missing).collect().expect_err("should fail");

        assert!(matches!(err, CollectorError::Load { .. }));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn test_collect_identity_conflict() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("Ideas.md"), "# One\n").expect("write");
        fs::write(dir.path().join("ideas.md"), "# Two\n").expect("write");

        let err = NoteCollector::new(dir.path()).collect().expect_err("conflict");

        let CollectorError::Conflict {
            identity,
            first,
            second,
        } = err
        else {
            panic!("expected conflict error");
        };
        assert_eq!(identity.as_str(), "ideas");
        assert_ne!(first, second);
    }

    #[test]
    fn test_collect_markdown_extension_variants() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("a.markdown"), "a").expect("write");
        fs::write(dir.path().join("b.MD"), "b").expect("write");

        let notes = NoteCollector::new(dir.path()).collect().expect("collect");
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_sort_for_index_by_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("zz.md"), "# Apples\n").expect("write");
        fs::write(dir.path().join("aa.md"), "# bananas\n").expect("write");

        let mut notes = NoteCollector::new(dir.path()).collect().expect("collect");
        sort_for_index(&mut notes, IndexOrder::Title);

        assert_eq!(notes[0].title, "Apples");
        assert_eq!(notes[1].title, "bananas");
    }

    #[test]
    fn test_sort_for_index_by_name() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("zz.md"), "# Apples\n").expect("write");
        fs::write(dir.path().join("aa.md"), "# Bananas\n").expect("write");

        let mut notes = NoteCollector::new(dir.path()).collect().expect("collect");
        sort_for_index(&mut notes, IndexOrder::Name);

        assert_eq!(notes[0].id.as_str(), "aa");
        assert_eq!(notes[1].id.as_str(), "zz");
    }

    #[test]
    fn test_sort_for_index_by_modified_newest_first() {
        use chrono::TimeZone;
        use std::path::Path;

        let at = |day| Some(Utc.with_ymd_and_hms(2026, 7, day, 8, 0, 0).unwrap());
        let note = |name: &str, modified| {
            Note::from_source(Path::new(name), String::new(), modified).expect("note")
        };

        let mut notes = vec![
            note("older.md", at(1)),
            note("undated.md", None),
            note("newer.md", at(20)),
        ];
        sort_for_index(&mut notes, IndexOrder::Modified);

        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older", "undated"]);
    }
}
