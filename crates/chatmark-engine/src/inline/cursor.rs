/// A byte cursor over a string slice with position tracking.
///
/// All delimiters the inline parser looks for are ASCII, so the cursor moves
/// a byte at a time and only ever stops on char boundaries when it stops on a
/// delimiter. `base` makes `pos()` absolute when the slice is a sub-range of
/// a larger string (link text, for instance).
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Offset of `s` within the outer string.
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Peeks at the byte `n` positions ahead.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Counts how many times `b` repeats starting at the current position.
    pub fn run_len(&self, b: u8) -> usize {
        self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .take_while(|&&c| c == b)
            .count()
    }

    /// The char just before the cursor, if any.
    pub fn prev_char(&self) -> Option<char> {
        self.s.get(..self.i)?.chars().next_back()
    }

    /// The char starting `n` bytes ahead of the cursor, if any.
    pub fn char_at(&self, n: usize) -> Option<char> {
        self.s.get(self.i + n..)?.chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
        assert_eq!(cur.peek_at(1), Some(b'l'));
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("**bold**", 0);
        assert!(cur.starts_with(b"**"));
        assert!(!cur.starts_with(b"~~"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.prev_char(), None);
        assert_eq!(cur.char_at(0), None);
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab", 0);
        cur.bump_n(2);
        assert!(cur.eof());
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("hi", 0);
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"h"));
        assert_eq!(cur.run_len(b'h'), 0);
    }

    #[test]
    fn run_len_counts_repeats() {
        let mut cur = Cursor::new("a```b", 0);
        assert_eq!(cur.run_len(b'`'), 0);
        cur.bump();
        assert_eq!(cur.run_len(b'`'), 3);
    }

    #[test]
    fn chars_around_multibyte_text() {
        let mut cur = Cursor::new("é*ü", 0);
        cur.bump_n('é'.len_utf8());
        assert_eq!(cur.peek(), Some(b'*'));
        assert_eq!(cur.prev_char(), Some('é'));
        assert_eq!(cur.char_at(1), Some('ü'));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
