//! HTML template system for page generation.
//!
//! A small string-interpolation engine; the shared page chrome is injected
//! through the registry rather than living in global state, so tests can
//! swap in minimal templates.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A template supporting `{{ variable }}` interpolation.
///
/// A trailing `?` (`{{ variable? }}`) marks the variable optional; missing
/// optional variables render as the empty string.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are emitted as-is and never re-scanned, so note
    /// content containing `{{` stays literal.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            let Some(end) = rest[start..].find("}}") else {
                return Err(TemplateError::InvalidSyntax(
                    "unclosed {{ delimiter".to_string(),
                ));
            };
            out.push_str(&rest[..start]);

            let var_name = rest[start + 2..start + end].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (var_name, false),
            };

            match context.get(var_name) {
                Some(value) => out.push_str(value),
                None if optional => {}
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            }

            rest = &rest[start + end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        registry.register(Template::new("note", DEFAULT_NOTE_TEMPLATE));
        registry.register(Template::new("index", DEFAULT_INDEX_TEMPLATE));
        registry
    }

    /// Register a template, replacing any existing one with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template with the embedded black-and-white theme.
pub const DEFAULT_BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}{{ site_title_suffix? }}</title>
    <meta name="description" content="{{ description? }}">
    <style>
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 20px;
    background: #fff;
    color: #333;
}

h1, h2, h3, h4, h5, h6 {
    color: #000;
    margin-top: 2rem;
    margin-bottom: 1rem;
}

h1 {
    border-bottom: 2px solid #000;
    padding-bottom: 0.5rem;
}

a {
    color: #000;
    text-decoration: underline;
}

a:hover {
    background: #000;
    color: #fff;
}

code {
    background: #f5f5f5;
    padding: 2px 4px;
    border-radius: 3px;
    font-family: 'Monaco', 'Consolas', monospace;
}

pre {
    background: #f5f5f5;
    padding: 1rem;
    border-radius: 5px;
    overflow-x: auto;
}

pre code {
    background: none;
    padding: 0;
}

blockquote {
    border-left: 4px solid #000;
    margin-left: 0;
    padding-left: 1rem;
    font-style: italic;
}

input[type="search"] {
    width: 100%;
    padding: 0.5rem;
    margin-bottom: 1.5rem;
    border: 1px solid #000;
    border-radius: 3px;
    font-size: 1rem;
}

.site-header a {
    font-weight: bold;
    text-decoration: none;
}

.note-list {
    list-style: none;
    padding: 0;
}

.note-item {
    margin-bottom: 1rem;
    padding: 1rem;
    border: 1px solid #ddd;
    border-radius: 5px;
}

.note-title {
    font-weight: bold;
    font-size: 1.2rem;
    margin-bottom: 0.5rem;
}

.note-date {
    font-size: 0.9rem;
    color: #666;
}

.back-link {
    margin-bottom: 2rem;
    display: inline-block;
}

.footer {
    margin-top: 4rem;
    padding-top: 2rem;
    border-top: 1px solid #ddd;
    text-align: center;
    color: #666;
    font-size: 0.9rem;
}
    </style>
</head>
<body>
    <header class="site-header">
        <nav><a href="index.html">{{ site_title }}</a></nav>
    </header>
    <main>
{{ content }}
    </main>
    <footer class="footer">
        <p>{{ site_title }} &middot; generated with notesite</p>
    </footer>
</body>
</html>
"#;

/// Default template for a single note page.
pub const DEFAULT_NOTE_TEMPLATE: &str = r#"<a href="index.html" class="back-link">&larr; All notes</a>
<article class="note">
    <h1>{{ title }}</h1>
    {{ modified_html? }}
    <div class="content">
{{ content }}
    </div>
</article>"#;

/// Default template for the index page, with the client-side note filter.
pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<section>
    <h1>{{ title }}</h1>
    <input type="search" id="search" placeholder="Filter notes..." autocomplete="off">
    <ul class="note-list" id="results">
{{ items }}
    </ul>
    <p id="no-results" style="display: none">No matching notes.</p>
</section>
<script>
(function() {
    const input = document.getElementById('search');
    const resultsContainer = document.getElementById('results');
    const noResults = document.getElementById('no-results');

    function filterNotes(q) {
        const query = q.trim().toLowerCase();
        const items = Array.from(resultsContainer.querySelectorAll('.note-item'));
        if (!query) {
            items.forEach(i => i.style.display = '');
            noResults.style.display = 'none';
            return;
        }
        let anyVisible = false;
        items.forEach(item => {
            const text = item.textContent.toLowerCase();
            const matched = text.indexOf(query) !== -1;
            item.style.display = matched ? '' : 'none';
            if (matched) anyVisible = true;
        });
        noResults.style.display = anyVisible ? 'none' : '';
    }

    input.addEventListener('input', function(e) {
        filterNotes(e.target.value);
    });
})();
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_multiple_variables() {
        let template = Template::new("test", "{{ greeting }}, {{ name }}!");
        let ctx = TemplateContext::new()
            .with_var("greeting", "Hello")
            .with_var("name", "User");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, User!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");

        let result = template.render(&TemplateContext::new()).unwrap();
        assert_eq!(result, "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_template_value_is_not_rescanned() {
        let template = Template::new("test", "{{ content }}");
        let ctx = TemplateContext::new().with_var("content", "literal {{ nope }}");

        let result = template.render(&ctx).unwrap();
        assert_eq!(result, "literal {{ nope }}");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");

        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::MissingVariable(_))));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "Hello {{ name");

        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        assert!(registry.get("base").is_some());
        assert!(registry.get("note").is_some());
        assert!(registry.get("index").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new("base", "{{ content }}"));

        let ctx = TemplateContext::new().with_var("content", "<p>hi</p>");
        assert_eq!(registry.render("base", &ctx).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("title", "My Note")
            .with_var("content", "<p>Hello!</p>")
            .with_var("site_title", "Notes");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>My Note</title>"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains("background: #fff"));
    }
}
