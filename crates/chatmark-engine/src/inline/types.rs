use crate::span::Span;

use super::kinds::EmphasisKind;

/// A parsed inline node with byte spans into the parsed string.
///
/// Nodes never copy text: rendering slices the source with their spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Literal text. Also used for the character after an escaping backslash.
    Text(Span),
    /// A code span. This is a "raw zone": no parsing inside.
    CodeSpan {
        /// Full span including backticks.
        full: Span,
        /// Rendered content, after padding is stripped.
        inner: Span,
    },
    /// `**strong**`, `*emphasis*` or `~~strikethrough~~`.
    Delimited {
        kind: EmphasisKind,
        /// Full span including delimiters.
        full: Span,
        children: Vec<InlineNode>,
    },
    /// An inline link `[text](destination)`.
    Link {
        /// Full span from `[` to `)`.
        full: Span,
        /// Raw destination, still carrying backslash escapes.
        destination: Span,
        children: Vec<InlineNode>,
    },
    /// An autolink `<https://...>` or `<user@host>`. Its text is its
    /// destination.
    Autolink {
        full: Span,
        /// Span between the angle brackets.
        target: Span,
        /// Email autolinks get a `mailto:` destination.
        email: bool,
    },
}

impl InlineNode {
    /// The span the node occupies in the source, delimiters included.
    pub fn full_span(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::CodeSpan { full, .. }
            | InlineNode::Delimited { full, .. }
            | InlineNode::Link { full, .. }
            | InlineNode::Autolink { full, .. } => *full,
        }
    }
}
