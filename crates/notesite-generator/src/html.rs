//! Page and index HTML generation.
//!
//! Wraps rendered note fragments and the index listing in the shared page
//! template.

use std::path::{Path, PathBuf};

use notesite_core::{Config, Note};
use notesite_parser::html_escape;
use thiserror::Error;
use tracing::debug;

use crate::template::{TemplateContext, TemplateRegistry};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] crate::template::TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Generates complete HTML documents from note fragments.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
}

impl HtmlGenerator {
    /// Create a new generator with the built-in templates.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
        }
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self { templates, config }
    }

    /// Generate the full HTML document for one note.
    ///
    /// `fragment` is the note body already rendered to HTML.
    pub fn note_page(&self, note: &Note, fragment: &str) -> Result<String> {
        debug!(id = %note.id, "generating note page");

        let mut ctx = TemplateContext::new()
            .with_var("title", html_escape(&note.title))
            .with_var("content", fragment);

        if let Some(modified) = note.modified {
            ctx.insert(
                "modified_html",
                format!(
                    "<div class=\"note-date\"><time datetime=\"{}\">Last edited {}</time></div>",
                    modified.format("%Y-%m-%d"),
                    modified.format("%B %d, %Y")
                ),
            );
        }

        let inner = self.templates.render("note", &ctx)?;
        self.wrap_base(&note.title, &inner)
    }

    /// Generate the index page listing every note, in the given order.
    pub fn index_page(&self, notes: &[Note]) -> Result<String> {
        debug!(count = notes.len(), "generating index page");

        let items: String = notes.iter().map(list_item_html).collect();
        let ctx = TemplateContext::new()
            .with_var("title", html_escape(&self.config.site.title))
            .with_var("items", items);

        let inner = self.templates.render("index", &ctx)?;
        self.wrap_base(&self.config.site.title, &inner)
    }

    /// Output path for a note's page.
    #[must_use]
    pub fn output_path(&self, note: &Note, output_dir: &Path) -> PathBuf {
        output_dir.join(note.output_file_name())
    }

    /// Wrap inner content in the base template.
    fn wrap_base(&self, title: &str, inner: &str) -> Result<String> {
        let mut ctx = TemplateContext::new()
            .with_var("title", html_escape(title))
            .with_var("site_title", html_escape(&self.config.site.title))
            .with_var("content", inner);

        if title != self.config.site.title {
            ctx.insert(
                "site_title_suffix",
                format!(" | {}", html_escape(&self.config.site.title)),
            );
        }

        if let Some(description) = &self.config.site.description {
            ctx.insert("description", html_escape(description));
        }

        Ok(self.templates.render("base", &ctx)?)
    }
}

/// Generate the index list item for one note.
pub fn list_item_html(note: &Note) -> String {
    let date_html = note
        .modified
        .map(|d| {
            format!(
                "    <div class=\"note-date\"><time datetime=\"{}\">{}</time></div>\n",
                d.format("%Y-%m-%d"),
                d.format("%B %d, %Y")
            )
        })
        .unwrap_or_default();

    format!(
        "<li class=\"note-item\">\n    <a href=\"{}\" class=\"note-title\">{}</a>\n{}</li>\n",
        html_escape(&note.output_file_name()),
        html_escape(&note.title),
        date_html
    )
}
