//! # Inline Kinds
//!
//! Inline constructs own their delimiters and flanking rules; the parser
//! calls into them and never hardcodes `` ` ``, `*` or `[`.
//!
//! - **`CodeSpan`**: backtick runs, raw zone that suppresses other parsing
//! - **`Delimiter`** / **`Emphasis`**: `*`, `_`, `**`, `__`, `~~`
//! - **`Link`**: `[text](dest "title")` and `<autolink>` syntax
//! - **`Escape`**: backslash escapes of ASCII punctuation

pub mod code_span;
pub mod emphasis;
pub mod escape;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Delimiter, Emphasis, EmphasisKind};
pub use escape::Escape;
pub use link::Link;
