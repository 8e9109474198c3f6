//! HTML adapter for web views.
//!
//! Each prose fragment becomes nested semantic elements (`<a>`, `<code>`,
//! `<strong>`, `<em>`, `<del>`); colours and sizes come from the [`Theme`] as
//! inline `style` attributes. All text is escaped.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{RenderedBlock, RenderedMessage, Sender, Theme};
use crate::styled::{Fragment, RunKind, StyledText};

/// Renders a whole message as a `<div>` of paragraphs and code blocks.
pub fn to_html(message: &RenderedMessage, theme: &Theme) -> String {
    let sender = message.sender;
    let class = if sender.is_outgoing() {
        "outgoing"
    } else {
        "incoming"
    };

    let mut out = format!("<div class=\"message {class}\">\n");
    for block in &message.blocks {
        match block {
            RenderedBlock::Text { styled, .. } => {
                let _ = writeln!(
                    out,
                    "<p style=\"{}\">{}</p>",
                    theme.base_style(sender).to_css(),
                    prose_to_html(styled, theme, sender)
                );
            }
            RenderedBlock::Code {
                language, content, ..
            } => {
                let class = language
                    .as_deref()
                    .map(|lang| {
                        format!(
                            " class=\"language-{}\"",
                            encode_double_quoted_attribute(lang)
                        )
                    })
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "<pre style=\"{}\"><code{class}>{}</code></pre>",
                    theme.code_block_style(sender).to_css(),
                    encode_text(content)
                );
            }
        }
    }
    out.push_str("</div>");
    out
}

fn prose_to_html(styled: &StyledText, theme: &Theme, sender: Sender) -> String {
    styled
        .fragments()
        .iter()
        .map(|fragment| fragment_to_html(fragment, theme, sender))
        .collect()
}

/// Wraps one fragment, innermost element first.
fn fragment_to_html(fragment: &Fragment<'_>, theme: &Theme, sender: Sender) -> String {
    let mut html = encode_text(fragment.text).replace('\n', "<br>\n");

    for kind in [RunKind::Strikethrough, RunKind::Emphasis, RunKind::Strong] {
        if fragment.kinds.contains(&&kind) {
            let tag = match kind {
                RunKind::Strikethrough => "del",
                RunKind::Emphasis => "em",
                _ => "strong",
            };
            html = format!("<{tag}>{html}</{tag}>");
        }
    }
    if fragment.has(|k| *k == RunKind::Code) {
        html = format!(
            "<code style=\"{}\">{html}</code>",
            theme.style_for(&RunKind::Code, sender).to_css()
        );
    }
    if let Some(destination) = fragment.link_destination() {
        let link = RunKind::Link {
            destination: destination.to_string(),
        };
        html = format!(
            "<a href=\"{}\" style=\"{}\">{html}</a>",
            encode_double_quoted_attribute(destination),
            theme.style_for(&link, sender).to_css()
        );
    }
    html
}
