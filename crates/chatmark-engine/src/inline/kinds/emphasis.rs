use crate::inline::cursor::Cursor;

/// What a matched delimiter pair renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmphasisKind {
    Strong,
    Emphasis,
    Strikethrough,
}

/// A delimiter run of `count` copies of `marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiter {
    pub marker: u8,
    pub count: usize,
}

impl Delimiter {
    pub fn kind(self) -> EmphasisKind {
        match (self.marker, self.count) {
            (Emphasis::TILDE, _) => EmphasisKind::Strikethrough,
            (_, 2) => EmphasisKind::Strong,
            _ => EmphasisKind::Emphasis,
        }
    }

    /// The same marker used once: `**` falls back to `*`.
    pub fn single(self) -> Self {
        Self {
            marker: self.marker,
            count: 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match (self.marker, self.count) {
            (Emphasis::STAR, 1) => "*",
            (Emphasis::STAR, _) => "**",
            (Emphasis::UNDERSCORE, 1) => "_",
            (Emphasis::UNDERSCORE, _) => "__",
            _ => "~~",
        }
    }
}

fn is_space(c: Option<char>) -> bool {
    c.is_none_or(char::is_whitespace)
}

fn is_punct(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_punctuation())
}

/// Emphasis, strong emphasis and strikethrough delimiters.
///
/// Openers must be left-flanking and closers right-flanking in the
/// CommonMark sense, judged on the chars around this delimiter only. `_`
/// additionally never opens or closes inside a word.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const TILDE: u8 = b'~';

    /// The widest delimiter the cursor could open with, if any.
    pub fn delimiter_at(cur: &Cursor<'_>) -> Option<Delimiter> {
        let marker = cur.peek()?;
        let run = cur.run_len(marker);
        let count = match marker {
            Self::STAR | Self::UNDERSCORE => run.min(2),
            Self::TILDE if run >= 2 => 2,
            _ => return None,
        };
        Some(Delimiter { marker, count })
    }

    pub fn can_open(cur: &Cursor<'_>, delim: Delimiter) -> bool {
        if !cur.starts_with(delim.as_str().as_bytes()) {
            return false;
        }
        let prev = cur.prev_char();
        let next = cur.char_at(delim.count);
        let left_flanking = !is_space(next) && (!is_punct(next) || is_space(prev) || is_punct(prev));
        if delim.marker == Self::UNDERSCORE {
            return left_flanking && !prev.is_some_and(char::is_alphanumeric);
        }
        left_flanking
    }

    pub fn can_close(cur: &Cursor<'_>, delim: Delimiter) -> bool {
        if !cur.starts_with(delim.as_str().as_bytes()) {
            return false;
        }
        let prev = cur.prev_char();
        let next = cur.char_at(delim.count);
        let right_flanking = !is_space(prev) && (!is_punct(prev) || is_space(next) || is_punct(next));
        if delim.marker == Self::UNDERSCORE {
            return right_flanking && !next.is_some_and(char::is_alphanumeric);
        }
        right_flanking
    }
}
