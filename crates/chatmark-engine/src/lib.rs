//! # chatmark-engine
//!
//! Turns a chat message written in markdown into something a UI can draw
//! without knowing anything about markdown.
//!
//! ## Pipeline
//!
//! 1. **`segments`**: split the message into prose and fenced code segments.
//! 2. **`prose`**: rewrite block-level syntax in prose (headers, `*` bullets)
//!    into forms the inline parser understands.
//! 3. **`inline`**: parse inline-only markdown into a span tree.
//! 4. **`styled`**: flatten the tree into plain text plus [`StyleRun`]s.
//! 5. **`render`**: resolve runs into toolkit-neutral styles for a [`Sender`]
//!    and [`Theme`], with an HTML adapter in [`render::html`].
//!
//! Every stage is a pure function of its input. Malformed markdown never
//! produces an error at the [`render_message`] boundary.

pub mod inline;
pub mod prose;
pub mod render;
pub mod segments;
pub mod span;
pub mod styled;

// Re-export key types for easier usage
pub use render::{RenderedBlock, RenderedMessage, Rgb, RunStyle, Sender, Theme, render_message};
pub use segments::{Segment, SegmentKind, split};
pub use span::Span;
pub use styled::{RunKind, StyleRun, StyledText};
