//! # Rendering
//!
//! Runs the whole pipeline for one chat message and resolves style runs into
//! toolkit-neutral [`RunStyle`]s. UI adapters (the HTML writer in [`html`],
//! the terminal viewer in the CLI) only map `RunStyle` onto their own types.

pub mod html;
pub mod theme;

use serde::{Deserialize, Serialize};

use crate::{
    prose::preprocess,
    segments::{SegmentKind, split},
    styled::StyledText,
};

pub use theme::{ColorError, Rgb, RunStyle, Theme};

/// Who wrote the message. Only affects styling, never parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local user: an outgoing message.
    User,
    /// The assistant: an incoming message.
    #[default]
    Ai,
}

impl Sender {
    pub fn is_outgoing(self) -> bool {
        matches!(self, Sender::User)
    }
}

/// A message ready to draw: one block per segment, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub blocks: Vec<RenderedBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedBlock {
    Text {
        id: usize,
        styled: StyledText,
    },
    Code {
        id: usize,
        language: Option<String>,
        content: String,
    },
}

impl RenderedBlock {
    pub fn id(&self) -> usize {
        match self {
            RenderedBlock::Text { id, .. } | RenderedBlock::Code { id, .. } => *id,
        }
    }

    /// The text a reader sees for this block.
    pub fn visible_text(&self) -> &str {
        match self {
            RenderedBlock::Text { styled, .. } => &styled.plain,
            RenderedBlock::Code { content, .. } => content,
        }
    }
}

impl RenderedMessage {
    /// Everything visible, blocks separated by a blank line. This is what a
    /// selection spanning the whole message copies.
    pub fn visible_text(&self) -> String {
        self.blocks
            .iter()
            .map(RenderedBlock::visible_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Splits, preprocesses and styles one message.
///
/// Infallible: unterminated fences and malformed inline markdown both
/// degrade to plain text.
pub fn render_message(text: &str, sender: Sender) -> RenderedMessage {
    let blocks = split(text)
        .into_iter()
        .map(|segment| match segment.kind {
            SegmentKind::Text { content } => RenderedBlock::Text {
                id: segment.id,
                styled: StyledText::extract(&preprocess(&content)),
            },
            SegmentKind::CodeBlock { language, content } => RenderedBlock::Code {
                id: segment.id,
                language,
                content,
            },
        })
        .collect();

    RenderedMessage { sender, blocks }
}
