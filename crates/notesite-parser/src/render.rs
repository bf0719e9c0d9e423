//! HTML fragment rendering for the document tree.

use crate::document::{Block, Document, Inline, ListItem};

/// Render a document to an HTML fragment, ready for template insertion.
pub fn render_fragment(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        render_block(block, &mut out);
    }
    out
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            render_inlines(content, out);
            out.push_str(&format!("</h{level}>\n"));
        }
        Block::Paragraph(content) => {
            out.push_str("<p>");
            render_inlines(content, out);
            out.push_str("</p>\n");
        }
        Block::Plain(content) => {
            render_inlines(content, out);
            out.push('\n');
        }
        Block::List { start, items } => {
            let (open, close) = match start {
                None => ("<ul>\n".to_string(), "</ul>\n"),
                Some(1) => ("<ol>\n".to_string(), "</ol>\n"),
                Some(n) => (format!("<ol start=\"{n}\">\n"), "</ol>\n"),
            };
            out.push_str(&open);
            for item in items {
                render_list_item(item, out);
            }
            out.push_str(close);
        }
        Block::BlockQuote(blocks) => {
            out.push_str("<blockquote>\n");
            for inner in blocks {
                render_block(inner, out);
            }
            out.push_str("</blockquote>\n");
        }
        Block::CodeBlock { lang, code } => {
            let lang_class = lang
                .as_deref()
                .map(|l| format!(" class=\"language-{}\"", html_escape(l)))
                .unwrap_or_default();
            out.push_str(&format!("<pre><code{lang_class}>"));
            out.push_str(&html_escape(code));
            out.push_str("</code></pre>\n");
        }
        Block::Rule => out.push_str("<hr />\n"),
    }
}

fn render_list_item(item: &ListItem, out: &mut String) {
    out.push_str("<li>");
    if let Some(checked) = item.checkbox {
        out.push_str(if checked {
            "<input type=\"checkbox\" checked disabled /> "
        } else {
            "<input type=\"checkbox\" disabled /> "
        });
    }
    for block in &item.blocks {
        render_block(block, out);
    }
    out.push_str("</li>\n");
}

fn render_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&html_escape(text)),
            Inline::SoftBreak => out.push('\n'),
            Inline::HardBreak => out.push_str("<br />\n"),
            Inline::Emphasis(content) => {
                out.push_str("<em>");
                render_inlines(content, out);
                out.push_str("</em>");
            }
            Inline::Strong(content) => {
                out.push_str("<strong>");
                render_inlines(content, out);
                out.push_str("</strong>");
            }
            Inline::Strikethrough(content) => {
                out.push_str("<del>");
                render_inlines(content, out);
                out.push_str("</del>");
            }
            Inline::Code(code) => {
                out.push_str(&format!("<code>{}</code>", html_escape(code)));
            }
            Inline::Link {
                href,
                title,
                content,
            } => {
                let title_attr = title
                    .as_deref()
                    .map(|t| format!(" title=\"{}\"", html_escape(t)))
                    .unwrap_or_default();
                out.push_str(&format!("<a href=\"{}\"{title_attr}>", html_escape(href)));
                render_inlines(content, out);
                out.push_str("</a>");
            }
            Inline::Image { src, title, alt } => {
                let title_attr = title
                    .as_deref()
                    .map(|t| format!(" title=\"{}\"", html_escape(t)))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\"{title_attr} />",
                    html_escape(src),
                    html_escape(alt)
                ));
            }
        }
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
