/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones": no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Narrows the raw content between the backtick runs to the rendered
    /// content: one space is stripped from each side when both sides have
    /// one and the content is not only spaces.
    pub fn strip_padding(content: &str) -> (usize, usize) {
        let bytes = content.as_bytes();
        let padded = bytes.len() >= 2
            && bytes[0] == b' '
            && bytes[bytes.len() - 1] == b' '
            && bytes.iter().any(|&b| b != b' ');
        if padded {
            (1, bytes.len() - 1)
        } else {
            (0, bytes.len())
        }
    }
}
