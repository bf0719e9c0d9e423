//! Markdown parsing using pulldown-cmark.
//!
//! The event stream is folded into the closed [`Document`] tree instead of
//! being rendered directly, so downstream rendering can match exhaustively.

use std::path::{Path, PathBuf};

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::document::{plain_text, Block, Document, Inline, ListItem};

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A fenced code block was opened but never closed.
    #[error("unterminated code fence in {path} (opened on line {line})")]
    UnterminatedFence { path: PathBuf, line: usize },
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Markdown parser for note bodies.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with the note-taking extensions enabled.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        Self { options }
    }

    /// Parse a note body into a document tree.
    ///
    /// `path` identifies the note in error messages.
    pub fn parse(&self, body: &str, path: &Path) -> Result<Document> {
        if let Some(line) = unterminated_fence(body) {
            return Err(ParseError::UnterminatedFence {
                path: path.to_path_buf(),
                line,
            });
        }

        let mut builder = TreeBuilder::default();
        for event in Parser::new_ext(body, self.options) {
            builder.event(event);
        }
        Ok(builder.finish())
    }
}

/// Find an unterminated fenced code block, returning its opening line number.
///
/// Fences follow the usual rules: at most three leading spaces, a run of at
/// least three backticks or tildes, and a closing run of the same character
/// that is at least as long and carries no trailing text.
fn unterminated_fence(body: &str) -> Option<usize> {
    struct OpenFence {
        marker: char,
        len: usize,
        line: usize,
    }

    let mut open: Option<OpenFence> = None;

    for (idx, line) in body.lines().enumerate() {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            continue;
        }

        let marker = match trimmed.chars().next() {
            Some(c @ ('`' | '~')) => c,
            _ => continue,
        };
        let run = trimmed.chars().take_while(|&c| c == marker).count();
        if run < 3 {
            continue;
        }
        let rest = &trimmed[run..];

        match &open {
            None => {
                // a backtick info string may not itself contain backticks
                if marker == '`' && rest.contains('`') {
                    continue;
                }
                open = Some(OpenFence {
                    marker,
                    len: run,
                    line: idx + 1,
                });
            }
            Some(fence) => {
                if marker == fence.marker && run >= fence.len && rest.trim().is_empty() {
                    open = None;
                }
            }
        }
    }

    open.map(|fence| fence.line)
}

/// Open inline span kinds while building the tree.
enum SpanKind {
    Root,
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: Option<String> },
    Image { src: String, title: Option<String> },
}

struct InlineScope {
    kind: SpanKind,
    implicit: bool,
    content: Vec<Inline>,
}

impl InlineScope {
    fn root(implicit: bool) -> Self {
        Self {
            kind: SpanKind::Root,
            implicit,
            content: Vec::new(),
        }
    }

    fn span(kind: SpanKind) -> Self {
        Self {
            kind,
            implicit: false,
            content: Vec::new(),
        }
    }
}

/// Open block container kinds.
enum BlockCtx {
    Quote,
    Item { checkbox: Option<bool> },
}

struct ListScope {
    start: Option<u64>,
    items: Vec<ListItem>,
}

/// Folds pulldown-cmark events into a [`Document`].
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Block>,
    scopes: Vec<(BlockCtx, Vec<Block>)>,
    lists: Vec<ListScope>,
    inlines: Vec<InlineScope>,
    code: Option<(Option<String>, String)>,
}

impl TreeBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),

            Event::Text(text) => {
                if let Some((_, buffer)) = &mut self.code {
                    buffer.push_str(&text);
                } else {
                    self.push_inline(Inline::Text(text.into_string()));
                }
            }

            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),

            // raw markup is carried as text so it gets escaped on render
            Event::Html(raw) | Event::InlineHtml(raw) => {
                self.push_inline(Inline::Text(raw.into_string()));
            }

            Event::Rule => {
                self.flush_implicit();
                self.push_block(Block::Rule);
            }

            Event::TaskListMarker(checked) => self.set_item_checkbox(checked),

            // footnotes and math are not enabled
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::Heading { .. } => {
                self.flush_implicit();
                self.inlines.push(InlineScope::root(false));
            }
            Tag::BlockQuote(_) => {
                self.flush_implicit();
                self.scopes.push((BlockCtx::Quote, Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_implicit();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let info = info.into_string();
                        if info.is_empty() { None } else { Some(info) }
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                self.flush_implicit();
                self.lists.push(ListScope {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => {
                self.flush_implicit();
                self.scopes
                    .push((BlockCtx::Item { checkbox: None }, Vec::new()));
            }
            Tag::Emphasis => self.start_span(SpanKind::Emphasis),
            Tag::Strong => self.start_span(SpanKind::Strong),
            Tag::Strikethrough => self.start_span(SpanKind::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => self.start_span(SpanKind::Link {
                href: dest_url.into_string(),
                title: non_empty(title.into_string()),
            }),
            Tag::Image {
                dest_url, title, ..
            } => self.start_span(SpanKind::Image {
                src: dest_url.into_string(),
                title: non_empty(title.into_string()),
            }),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if let Some(scope) = self.inlines.pop() {
                    self.push_block(Block::Paragraph(scope.content));
                }
            }
            TagEnd::Heading(level) => {
                if let Some(scope) = self.inlines.pop() {
                    self.push_block(Block::Heading {
                        level: level as u8,
                        content: scope.content,
                    });
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_implicit();
                if let Some((_, blocks)) = self.scopes.pop() {
                    self.push_block(Block::BlockQuote(blocks));
                }
            }
            TagEnd::CodeBlock => {
                if let Some((lang, code)) = self.code.take() {
                    self.push_block(Block::CodeBlock { lang, code });
                }
            }
            TagEnd::List(_) => {
                if let Some(list) = self.lists.pop() {
                    self.push_block(Block::List {
                        start: list.start,
                        items: list.items,
                    });
                }
            }
            TagEnd::Item => {
                self.flush_implicit();
                if let Some((ctx, blocks)) = self.scopes.pop()
                    && let BlockCtx::Item { checkbox } = ctx
                    && let Some(list) = self.lists.last_mut()
                {
                    list.items.push(ListItem { checkbox, blocks });
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link
            | TagEnd::Image => self.end_span(),
            _ => {}
        }
    }

    fn start_span(&mut self, kind: SpanKind) {
        self.ensure_inline_root();
        self.inlines.push(InlineScope::span(kind));
    }

    fn end_span(&mut self) {
        let Some(scope) = self.inlines.pop() else {
            return;
        };
        let inline = match scope.kind {
            SpanKind::Emphasis => Inline::Emphasis(scope.content),
            SpanKind::Strong => Inline::Strong(scope.content),
            SpanKind::Strikethrough => Inline::Strikethrough(scope.content),
            SpanKind::Link { href, title } => Inline::Link {
                href,
                title,
                content: scope.content,
            },
            SpanKind::Image { src, title } => Inline::Image {
                src,
                title,
                alt: plain_text(&scope.content),
            },
            SpanKind::Root => {
                self.inlines.push(scope);
                return;
            }
        };
        self.push_inline(inline);
    }

    /// Append an inline to the innermost open scope, merging adjacent text.
    fn push_inline(&mut self, inline: Inline) {
        self.ensure_inline_root();
        let Some(scope) = self.inlines.last_mut() else {
            return;
        };
        if let (Some(Inline::Text(prev)), Inline::Text(text)) =
            (scope.content.last_mut(), &inline)
        {
            prev.push_str(text);
            return;
        }
        scope.content.push(inline);
    }

    fn push_block(&mut self, block: Block) {
        match self.scopes.last_mut() {
            Some((_, blocks)) => blocks.push(block),
            None => self.root.push(block),
        }
    }

    /// Tight list items produce bare text without a paragraph wrapper; open
    /// an implicit scope for it on demand.
    fn ensure_inline_root(&mut self) {
        if self.inlines.is_empty() {
            self.inlines.push(InlineScope::root(true));
        }
    }

    /// Close an open implicit scope into a plain block.
    fn flush_implicit(&mut self) {
        if self.inlines.last().is_some_and(|scope| scope.implicit) {
            if let Some(scope) = self.inlines.pop()
                && !scope.content.is_empty()
            {
                self.push_block(Block::Plain(scope.content));
            }
        }
    }

    fn set_item_checkbox(&mut self, checked: bool) {
        for (ctx, _) in self.scopes.iter_mut().rev() {
            if let BlockCtx::Item { checkbox } = ctx {
                *checkbox = Some(checked);
                return;
            }
        }
    }

    fn finish(mut self) -> Document {
        self.flush_implicit();
        while let Some((_, blocks)) = self.scopes.pop() {
            self.root.extend(blocks);
        }
        Document { blocks: self.root }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
