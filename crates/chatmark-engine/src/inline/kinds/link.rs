/// Inline link syntax: `[text](destination "title")` and `<autolink>`.
pub struct Link;

impl Link {
    pub const TEXT_OPEN: u8 = b'[';
    pub const TEXT_CLOSE: u8 = b']';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ANGLE_OPEN: u8 = b'<';
    pub const ANGLE_CLOSE: u8 = b'>';
    pub const MAILTO: &'static str = "mailto:";
    /// Nesting bound for parentheses in a bare destination.
    pub const MAX_DEST_PARENS: usize = 32;

    /// Bytes that may open a link title.
    pub fn title_close(open: u8) -> Option<u8> {
        match open {
            b'"' => Some(b'"'),
            b'\'' => Some(b'\''),
            b'(' => Some(b')'),
            _ => None,
        }
    }

    /// `scheme:rest` with a 2..=32 char scheme of letters, digits, `+`, `.`,
    /// `-`, starting with a letter, and no whitespace or angle brackets.
    pub fn is_uri_autolink(inner: &str) -> bool {
        let Some((scheme, rest)) = inner.split_once(':') else {
            return false;
        };
        let scheme_ok = (2..=32).contains(&scheme.len())
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
        scheme_ok && !rest.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
    }

    /// `local@domain` with no whitespace and non-empty dot-separated domain labels.
    pub fn is_email_autolink(inner: &str) -> bool {
        let Some((local, domain)) = inner.split_once('@') else {
            return false;
        };
        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
        let domain_ok = !domain.is_empty()
            && domain
                .split('.')
                .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        local_ok && domain_ok
    }
}
