/// Fenced code block delimiter. Owns the marker so the splitter never
/// hardcodes it.
pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "```";

    /// Returns true if the (already trimmed) line is a fence line.
    pub fn is_fence(trimmed: &str) -> bool {
        trimmed.starts_with(Self::MARKER)
    }

    /// Extracts the info string of an opening fence.
    ///
    /// Returns `None` when the line is not a fence at all, `Some(None)` for a
    /// bare fence and `Some(Some(lang))` when a language tag follows the
    /// marker.
    pub fn info(trimmed: &str) -> Option<Option<String>> {
        let rest = trimmed.strip_prefix(Self::MARKER)?.trim();
        if rest.is_empty() {
            Some(None)
        } else {
            Some(Some(rest.to_string()))
        }
    }

    /// Rebuilds the opening fence line for a block that never closed.
    pub fn opening_line(language: Option<&str>) -> String {
        format!("{}{}", Self::MARKER, language.unwrap_or(""))
    }
}
