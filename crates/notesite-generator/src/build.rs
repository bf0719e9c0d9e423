//! Build orchestration.
//!
//! Runs the full pipeline: collect notes, render every page, write the
//! index, and prune stale output.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use notesite_core::{Config, NoteId};
use notesite_parser::{render_fragment, MarkdownParser, ParseError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{sort_for_index, CollectorError, NoteCollector},
    html::{HtmlError, HtmlGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note collection error.
    #[error(transparent)]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Markdown parse error, tagged with the failing note.
    #[error("note '{identity}': {source}")]
    Parse {
        identity: NoteId,
        #[source]
        source: ParseError,
    },

    /// Output file write error.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of note pages generated.
    pub notes: usize,

    /// Number of stale output files removed.
    pub pruned: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a builder; input and output directories come from the
    /// configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let input_dir = PathBuf::from(&config.build.input_dir);
        let output_dir = PathBuf::from(&config.build.output_dir);
        Self {
            config,
            input_dir,
            output_dir,
        }
    }

    /// Execute the full build.
    ///
    /// The run aborts on the first parse or write failure, naming the
    /// offending note. Every page is built fully in memory and written in a
    /// single call, so no individual file is ever partially written.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            input = %self.input_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Collect notes; identity conflicts surface here, before any write
        let collector = NoteCollector::new(&self.input_dir);
        let mut notes = collector.collect()?;
        sort_for_index(&mut notes, self.config.index.order);

        // 2. Ensure the output directory exists
        fs::create_dir_all(&self.output_dir)?;

        // 3. Render and write one page per note
        let generator = HtmlGenerator::new(self.config.clone());
        let parser = MarkdownParser::new();

        let results: Vec<Result<()>> = notes
            .par_iter()
            .map(|note| {
                let doc = parser
                    .parse(&note.body, &note.source_path)
                    .map_err(|e| BuildError::Parse {
                        identity: note.id.clone(),
                        source: e,
                    })?;
                let fragment = render_fragment(&doc);
                let html = generator.note_page(note, &fragment)?;

                let path = generator.output_path(note, &self.output_dir);
                fs::write(&path, &html).map_err(|e| BuildError::Write {
                    path: path.clone(),
                    source: e,
                })?;

                debug!(path = %path.display(), "wrote note page");
                Ok(())
            })
            .collect();

        for result in results {
            result?;
        }
        stats.notes = notes.len();

        // 4. Write the index page
        let index_html = generator.index_page(&notes)?;
        let index_path = self.output_dir.join("index.html");
        fs::write(&index_path, &index_html).map_err(|e| BuildError::Write {
            path: index_path.clone(),
            source: e,
        })?;
        debug!(path = %index_path.display(), "wrote index page");

        // 5. Remove output pages whose notes are gone
        stats.pruned = self.prune_stale(&notes)?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            notes = stats.notes,
            pruned = stats.pruned,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Delete `*.html` files in the output directory that no current note
    /// produces. The index is always live.
    fn prune_stale(&self, notes: &[notesite_core::Note]) -> Result<usize> {
        let mut live: BTreeSet<String> = notes.iter().map(|n| n.output_file_name()).collect();
        live.insert("index.html".to_string());

        let mut pruned = 0;
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !is_html(&path) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !live.contains(name) {
                fs::remove_file(&path)?;
                pruned += 1;
                info!(path = %path.display(), "removed stale output");
            }
        }

        Ok(pruned)
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}
