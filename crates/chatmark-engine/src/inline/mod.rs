//! # Inline Parsing
//!
//! Cursor-based parser for inline-only markdown. Block constructs (headers,
//! lists, quotes) are not recognised; their characters stay literal text.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` span tree
//! - **`kinds`**: delimiter constants and flanking rules per construct
//! - **`cursor`**: `Cursor` for byte-wise parsing with position tracking
//! - **`parser`**: `parse_inline()` entry point with `try_parse_*` helpers
//!
//! ## Precedence
//!
//! Code spans are raw zones: `` `**not bold**` `` is one code span. Link text
//! cannot contain another link. Unclosed constructs fall back to literal
//! text, and so do openers nested deeper than [`MAX_NESTING`]; parsing
//! itself never fails.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{MAX_NESTING, parse_inline};
pub use types::InlineNode;
