/// Backslash escapes: `\*` renders as a literal `*`.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';

    /// Only ASCII punctuation can be escaped; any other backslash is literal.
    pub fn escapable(b: u8) -> bool {
        b.is_ascii_punctuation()
    }

    /// Removes backslash escapes from raw text such as a link destination.
    pub fn unescape(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\'
                && let Some(&next) = chars.peek()
                && next.is_ascii_punctuation()
            {
                out.push(next);
                chars.next();
                continue;
            }
            out.push(c);
        }
        out
    }
}
