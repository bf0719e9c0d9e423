//! End-to-end tests for site generation.
//!
//! Each test builds a real site from a temporary notes directory and
//! inspects the written output.

use std::fs;

use notesite_core::{Config, IndexOrder};
use notesite_generator::Builder;
use tempfile::TempDir;

struct Site {
    input: TempDir,
    output: TempDir,
    config: Config,
}

impl Site {
    fn new() -> Self {
        let input = TempDir::new().expect("input dir");
        let output = TempDir::new().expect("output dir");

        let mut config = Config::default();
        config.site.title = "My Notes".to_string();
        config.build.input_dir = input.path().to_string_lossy().to_string();
        config.build.output_dir = output.path().to_string_lossy().to_string();

        Self {
            input,
            output,
            config,
        }
    }

    fn add_note(&self, name: &str, body: &str) {
        fs::write(self.input.path().join(name), body).expect("write note");
    }

    fn build(&self) -> notesite_generator::BuildStats {
        Builder::new(self.config.clone()).build().expect("build")
    }

    fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output.path())
            .expect("read output")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output.path().join(name)).expect("read output file")
    }
}

#[test]
fn test_one_page_per_note_plus_index() {
    let site = Site::new();
    site.add_note("feature-list.md", "# Feature List\n\n- markdown support\n");
    site.add_note("learning notes.md", "# Learning Notes\n\nSome text.\n");
    site.add_note("ideas.md", "# Ideas\n");
    site.add_note("scratch.txt", "not a note");

    let stats = site.build();

    assert_eq!(stats.notes, 3);
    assert_eq!(
        site.output_files(),
        vec![
            "feature-list.html",
            "ideas.html",
            "index.html",
            "learning-notes.html",
        ]
    );
}

#[test]
fn test_index_links_every_note_in_title_order() {
    let site = Site::new();
    site.add_note("zz.md", "# Alpha Note\n");
    site.add_note("aa.md", "# Zulu Note\n");

    site.build();
    let index = site.read_output("index.html");

    assert!(index.contains("href=\"zz.html\""));
    assert!(index.contains("href=\"aa.html\""));

    // default ordering is by title, not by file name
    let alpha = index.find("Alpha Note").expect("alpha listed");
    let zulu = index.find("Zulu Note").expect("zulu listed");
    assert!(alpha < zulu);
}

#[test]
fn test_index_order_by_name() {
    let mut site = Site::new();
    site.config.index.order = IndexOrder::Name;
    site.add_note("zz.md", "# Alpha Note\n");
    site.add_note("aa.md", "# Zulu Note\n");

    site.build();
    let index = site.read_output("index.html");

    let alpha = index.find("Alpha Note").expect("alpha listed");
    let zulu = index.find("Zulu Note").expect("zulu listed");
    assert!(zulu < alpha);
}

#[test]
fn test_rebuild_is_byte_identical() {
    let site = Site::new();
    site.add_note(
        "note.md",
        "# Note\n\n> quote\n\n```python\nprint(\"hi\")\n```\n",
    );

    site.build();
    let first = site.read_output("note.html");
    site.build();
    let second = site.read_output("note.html");

    assert_eq!(first, second);
}

#[test]
fn test_title_only_note_renders_empty_content() {
    let site = Site::new();
    site.add_note("minimal.md", "# Minimal\n");

    site.build();
    let page = site.read_output("minimal.html");

    assert!(page.contains("<h1>Minimal</h1>"));
    assert!(page.contains("<div class=\"content\">\n\n    </div>"));
}

#[test]
fn test_checkbox_items_render_as_controls() {
    let site = Site::new();
    site.add_note("todo.md", "# Todo\n\n- [x] Done\n- [ ] Todo\n");

    site.build();
    let page = site.read_output("todo.html");

    assert!(page.contains("<input type=\"checkbox\" checked disabled /> Done"));
    assert!(page.contains("<input type=\"checkbox\" disabled /> Todo"));
}

#[test]
fn test_code_fence_content_stays_literal() {
    let site = Site::new();
    site.add_note(
        "snippets.md",
        "# Snippets\n\n```md\n**bold**\n# heading\n[link](x)\n```\n",
    );

    site.build();
    let page = site.read_output("snippets.html");

    assert!(page.contains("**bold**"));
    assert!(page.contains("# heading"));
    assert!(page.contains("[link](x)"));
}

#[test]
fn test_conflicting_identities_produce_no_output() {
    let site = Site::new();
    site.add_note("Ideas.md", "# One\n");
    site.add_note("ideas.md", "# Two\n");
    site.add_note("fine.md", "# Fine\n");

    let err = Builder::new(site.config.clone())
        .build()
        .expect_err("conflict should fail the build");

    assert!(err.to_string().contains("ideas"));
    // detection happens at load time, before anything is written
    assert!(site.output_files().is_empty());
}

#[test]
fn test_note_without_heading_uses_file_name_title() {
    let site = Site::new();
    site.add_note("meeting_notes.md", "just some text\n");

    site.build();
    let page = site.read_output("meeting-notes.html");

    assert!(page.contains("<h1>Meeting Notes</h1>"));
    assert!(page.contains("just some text"));
}

#[test]
fn test_note_pages_share_the_base_chrome() {
    let site = Site::new();
    site.add_note("a.md", "# A\n");
    site.add_note("b.md", "# B\n");

    site.build();
    let a = site.read_output("a.html");
    let b = site.read_output("b.html");

    for page in [&a, &b] {
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("My Notes"));
        assert!(page.contains("class=\"footer\""));
    }
}

#[test]
fn test_removed_note_output_is_pruned_on_rebuild() {
    let site = Site::new();
    site.add_note("first.md", "# First\n");
    site.add_note("second.md", "# Second\n");
    site.build();
    assert!(site.output_files().contains(&"second.html".to_string()));

    fs::remove_file(site.input.path().join("second.md")).expect("remove note");
    let stats = site.build();

    assert_eq!(stats.pruned, 1);
    assert_eq!(site.output_files(), vec!["first.html", "index.html"]);

    let index = site.read_output("index.html");
    assert!(!index.contains("second.html"));
}
