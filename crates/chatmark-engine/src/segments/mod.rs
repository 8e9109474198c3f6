//! # Segment Splitting
//!
//! Partitions a chat message into alternating prose and fenced code
//! segments in a single pass over its lines.
//!
//! - Fence lines are never stored in any segment.
//! - Prose is trimmed and dropped when empty, so adjacent code blocks never
//!   get an empty text segment between them.
//! - Code block bodies are kept verbatim, blank lines included.
//! - A fence that never closes is not a code block: its fence line and body
//!   are folded back into the prose.

pub mod code_fence;

pub use code_fence::CodeFence;

/// One contiguous piece of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Emission order within one [`split`] call, starting at 0. Only
    /// meaningful as a list key.
    pub id: usize,
    pub kind: SegmentKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Prose, possibly containing inline markdown.
    Text { content: String },
    /// The body of a fenced code block, without its fence lines.
    CodeBlock {
        language: Option<String>,
        content: String,
    },
}

impl Segment {
    /// Returns the prose content for text segments.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Text { content } => Some(content),
            SegmentKind::CodeBlock { .. } => None,
        }
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, SegmentKind::CodeBlock { .. })
    }
}

/// Accumulates segments while walking the lines of a message.
#[derive(Default)]
struct Splitter {
    kinds: Vec<SegmentKind>,
    current_text: String,
    in_code_block: bool,
    code_lines: Vec<String>,
    code_language: Option<String>,
}

impl Splitter {
    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        if let Some(info) = CodeFence::info(trimmed) {
            if self.in_code_block {
                self.close_code_block();
            } else {
                self.flush_text();
                self.code_language = info;
            }
            self.in_code_block = !self.in_code_block;
            return;
        }

        if self.in_code_block {
            self.code_lines.push(line.to_string());
        } else {
            self.append_text_line(line);
        }
    }

    fn append_text_line(&mut self, line: &str) {
        if !self.current_text.is_empty() {
            self.current_text.push('\n');
        }
        self.current_text.push_str(line);
    }

    fn flush_text(&mut self) {
        let trimmed = self.current_text.trim();
        if !trimmed.is_empty() {
            self.kinds.push(SegmentKind::Text {
                content: trimmed.to_string(),
            });
        }
        self.current_text.clear();
    }

    fn close_code_block(&mut self) {
        let content = self.code_lines.join("\n");
        self.kinds.push(SegmentKind::CodeBlock {
            language: self.code_language.take(),
            content,
        });
        self.code_lines.clear();
    }

    fn finish(mut self) -> Vec<Segment> {
        if self.in_code_block {
            log::debug!(
                "unterminated code fence ({} buffered lines), keeping it as text",
                self.code_lines.len()
            );
            let fence = CodeFence::opening_line(self.code_language.as_deref());
            self.append_text_line(&fence);
            for line in std::mem::take(&mut self.code_lines) {
                self.append_text_line(&line);
            }
        }
        self.flush_text();

        self.kinds
            .into_iter()
            .enumerate()
            .map(|(id, kind)| Segment { id, kind })
            .collect()
    }
}

/// Splits `text` into ordered prose and code block segments.
///
/// Lines are separated on `\n` only. Fence detection looks at the trimmed
/// line; accumulated content keeps each line as written.
pub fn split(text: &str) -> Vec<Segment> {
    let mut splitter = Splitter::default();
    for line in text.split('\n') {
        splitter.push_line(line);
    }
    let segments = splitter.finish();
    log::trace!("split {} bytes into {} segments", text.len(), segments.len());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(content: &str) -> SegmentKind {
        SegmentKind::Text {
            content: content.to_string(),
        }
    }

    fn code(language: Option<&str>, content: &str) -> SegmentKind {
        SegmentKind::CodeBlock {
            language: language.map(str::to_string),
            content: content.to_string(),
        }
    }

    fn kinds(input: &str) -> Vec<SegmentKind> {
        split(input).into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn plain_text_is_one_trimmed_segment() {
        assert_eq!(kinds("\n\n  hello\nworld  \n\n"), vec![text("hello\nworld")]);
    }

    #[test]
    fn fence_pairing() {
        let input = "before\n```lang\ncode line 1\ncode line 2\n```\nafter";
        assert_eq!(
            kinds(input),
            vec![
                text("before"),
                code(Some("lang"), "code line 1\ncode line 2"),
                text("after"),
            ]
        );
    }

    #[test]
    fn bare_fence_has_no_language() {
        assert_eq!(kinds("```\nfoo\n```"), vec![code(None, "foo")]);
    }

    #[test]
    fn unterminated_fence_becomes_text() {
        assert_eq!(kinds("```py\nx = 1"), vec![text("```py\nx = 1")]);
    }

    #[test]
    fn unterminated_fence_after_prose_stays_a_separate_segment() {
        // The prose was flushed when the fence opened.
        assert_eq!(
            kinds("intro\n```\nlet a = 1;\n\nlet b = 2;"),
            vec![text("intro"), text("```\nlet a = 1;\n\nlet b = 2;")]
        );
    }

    #[test]
    fn unterminated_fence_after_closed_block() {
        assert_eq!(
            kinds("```\na\n```\n```rs\nb"),
            vec![code(None, "a"), text("```rs\nb")]
        );
    }

    #[test]
    fn adjacent_code_blocks_have_no_text_between() {
        assert_eq!(
            kinds("```\na\n```\n```\nb\n```"),
            vec![code(None, "a"), code(None, "b")]
        );
    }

    #[test]
    fn blank_lines_between_blocks_are_dropped() {
        assert_eq!(
            kinds("```\na\n```\n\n   \n```\nb\n```"),
            vec![code(None, "a"), code(None, "b")]
        );
    }

    #[test]
    fn code_block_keeps_blank_lines_and_indentation() {
        assert_eq!(
            kinds("```rust\nfn main() {\n\n    run();\n}\n```"),
            vec![code(Some("rust"), "fn main() {\n\n    run();\n}")]
        );
    }

    #[test]
    fn empty_code_block_is_kept() {
        assert_eq!(kinds("```\n```"), vec![code(None, "")]);
    }

    #[test]
    fn indented_fence_is_detected() {
        assert_eq!(
            kinds("list:\n   ```sh\n   ls\n   ```"),
            vec![text("list:"), code(Some("sh"), "   ls")]
        );
    }

    #[test]
    fn closing_fence_with_trailing_text_still_closes() {
        assert_eq!(kinds("```\nx\n```done"), vec![code(None, "x")]);
    }

    #[test]
    fn whitespace_only_input_yields_nothing() {
        assert!(split("").is_empty());
        assert!(split(" \n\t\n").is_empty());
    }

    #[test]
    fn ids_follow_emission_order() {
        let segments = split("a\n```\nb\n```\nc");
        let ids: Vec<usize> = segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(segments[0].as_text(), Some("a"));
        assert!(segments[1].is_code_block());
        assert_eq!(segments[1].as_text(), None);
    }

    #[test]
    fn crlf_fence_lines_are_recognised() {
        assert_eq!(
            kinds("```js\r\nx;\r\n```\r\n"),
            vec![code(Some("js"), "x;\r")]
        );
    }
}
