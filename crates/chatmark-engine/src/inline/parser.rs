use std::collections::{HashMap, HashSet};

use crate::span::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Delimiter, Emphasis, Escape, Link},
    types::InlineNode,
};

/// How deep emphasis and links may nest. An opener reached deeper than this
/// stays literal text.
pub const MAX_NESTING: usize = 32;

/// Parses inline-only markdown into a sequence of [`InlineNode`]s.
///
/// # Arguments
/// - `base`: Byte offset added to every span (0 when `s` is the whole input)
/// - `s`: The string content to parse
///
/// # Returns
/// Nodes covering the whole input. Parsing never fails: unclosed delimiters,
/// and openers nested past [`MAX_NESTING`], stay text.
pub fn parse_inline(base: usize, s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s, base);
    let mut parser = InlineParser::default();
    parser.parse_until(&mut cur, None, 0).unwrap_or_default()
}

/// Parser state shared by every nesting level of one string.
#[derive(Default)]
struct InlineParser {
    /// Openers already known to have no closer. Treating an inner opener as
    /// literal only adds closer candidates, so a failure at any depth is final.
    failed: HashSet<(usize, Delimiter)>,
    /// Set while parsing link text: links cannot nest.
    in_link: bool,
    /// Built on the first `[`.
    links: Option<LinkScan>,
}

/// Link bookkeeping computed once per string so that bracket-heavy input
/// stays linear.
struct LinkScan {
    /// Local index of each `[` to the index of its matching `]`.
    brackets: HashMap<usize, usize>,
    /// Per title closing byte, the earliest index from which none follows.
    unclosed_titles: HashMap<u8, usize>,
}

impl LinkScan {
    fn new(s: &str) -> Self {
        Self {
            brackets: match_link_brackets(s),
            unclosed_titles: HashMap::new(),
        }
    }
}

fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
    if end > start {
        out.push(InlineNode::Text(Span { start, end }));
    }
}

impl InlineParser {
    /// Parses nodes until `closer` is found (consuming it) or, without a
    /// closer, until end of input.
    ///
    /// Returns `None` when a required closer never shows up.
    fn parse_until(
        &mut self,
        cur: &mut Cursor<'_>,
        closer: Option<Delimiter>,
        depth: usize,
    ) -> Option<Vec<InlineNode>> {
        let content_start = cur.i;
        let mut out = vec![];
        let mut text_start = cur.pos();

        while !cur.eof() {
            if let Some(delim) = closer
                && Emphasis::can_close(cur, delim)
                && has_content(&cur.s[content_start..cur.i], delim)
            {
                let before = cur.pos();
                if let Some(node) = self.try_parse_wider_opener(cur, delim, depth) {
                    flush_text(&mut out, text_start, before);
                    text_start = cur.pos();
                    out.push(node);
                    continue;
                }
                flush_text(&mut out, text_start, before);
                cur.bump_n(delim.count);
                return Some(out);
            }

            let before = cur.pos();
            match self.try_parse_node(cur, depth) {
                Some(node) => {
                    flush_text(&mut out, text_start, before);
                    text_start = cur.pos();
                    out.push(node);
                }
                // A failed attempt may already have skipped literal text
                // (an unmatched backtick run); otherwise step over one byte.
                None if cur.pos() == before => {
                    cur.bump();
                }
                None => {}
            }
        }

        if closer.is_some() {
            return None;
        }
        flush_text(&mut out, text_start, cur.pos());
        Some(out)
    }

    /// Tries every construct that can start at the current byte.
    fn try_parse_node(&mut self, cur: &mut Cursor<'_>, depth: usize) -> Option<InlineNode> {
        match cur.peek() {
            Some(Escape::BACKSLASH) => try_parse_escape(cur),
            Some(CodeSpan::TICK) => try_parse_code_span(cur),
            Some(Link::TEXT_OPEN) if !self.in_link => self.try_parse_link(cur, depth),
            Some(Link::ANGLE_OPEN) if !self.in_link => try_parse_autolink(cur),
            Some(Emphasis::STAR | Emphasis::UNDERSCORE | Emphasis::TILDE) => {
                self.try_parse_delimited(cur, depth)
            }
            _ => None,
        }
    }

    /// Tries `**`/`__` first, then the single marker.
    fn try_parse_delimited(&mut self, cur: &mut Cursor<'_>, depth: usize) -> Option<InlineNode> {
        let widest = Emphasis::delimiter_at(cur)?;
        let narrower = (widest.count == 2 && widest.marker != Emphasis::TILDE)
            .then(|| widest.single());

        std::iter::once(widest)
            .chain(narrower)
            .find_map(|delim| self.try_parse_delimiter(cur, delim, depth))
    }

    /// A single closer sitting on a `**` run that can also open gives way to
    /// the inner pair when that pair closes: `*a**b**c*` nests strong in
    /// emphasis.
    fn try_parse_wider_opener(
        &mut self,
        cur: &mut Cursor<'_>,
        closer: Delimiter,
        depth: usize,
    ) -> Option<InlineNode> {
        if closer.count != 1 || cur.run_len(closer.marker) < 2 {
            return None;
        }
        let wider = Delimiter {
            marker: closer.marker,
            count: 2,
        };
        self.try_parse_delimiter(cur, wider, depth)
    }

    fn try_parse_delimiter(
        &mut self,
        cur: &mut Cursor<'_>,
        delim: Delimiter,
        depth: usize,
    ) -> Option<InlineNode> {
        let start = cur.pos();
        if !Emphasis::can_open(cur, delim) || self.failed.contains(&(start, delim)) {
            return None;
        }
        let rest = cur.s.get(cur.i + delim.count..).unwrap_or_default();
        if !rest.contains(delim.as_str()) {
            self.failed.insert((start, delim));
            return None;
        }
        // Too deep to try here. Not memoized: the same opener may still close
        // once the speculative openers around it have failed.
        if depth >= MAX_NESTING {
            return None;
        }

        let saved = cur.clone();
        cur.bump_n(delim.count);
        match self.parse_until(cur, Some(delim), depth + 1) {
            Some(children) => Some(InlineNode::Delimited {
                kind: delim.kind(),
                full: Span {
                    start,
                    end: cur.pos(),
                },
                children,
            }),
            None => {
                // Not closed, restore cursor
                self.failed.insert((start, delim));
                *cur = saved;
                None
            }
        }
    }

    /// Attempts to parse `[text](destination "title")`.
    ///
    /// Link text is parsed by a fresh parser over just the bracketed slice,
    /// so delimiters inside it must close inside it.
    fn try_parse_link(&mut self, cur: &mut Cursor<'_>, depth: usize) -> Option<InlineNode> {
        if depth >= MAX_NESTING {
            return None;
        }
        let bytes = cur.s.as_bytes();
        let open = cur.i;
        let scan = self.links.get_or_insert_with(|| LinkScan::new(cur.s));
        let close = *scan.brackets.get(&open)?;
        if bytes.get(close + 1) != Some(&Link::DEST_OPEN) {
            return None;
        }
        let tail = parse_link_tail(bytes, close + 2, &mut scan.unclosed_titles)?;

        let start = cur.pos();
        let mut text_cur = Cursor::new(&cur.s[open + 1..close], cur.base + open + 1);
        let mut text_parser = InlineParser {
            in_link: true,
            ..InlineParser::default()
        };
        let children = text_parser
            .parse_until(&mut text_cur, None, depth + 1)
            .unwrap_or_default();

        cur.i = tail.end;
        Some(InlineNode::Link {
            full: Span {
                start,
                end: cur.pos(),
            },
            destination: Span {
                start: cur.base + tail.destination.0,
                end: cur.base + tail.destination.1,
            },
            children,
        })
    }
}

/// A pair only closes around something other than its own marker, so
/// `****` stays literal.
fn has_content(content: &str, delim: Delimiter) -> bool {
    content.bytes().any(|b| b != delim.marker)
}

/// `\` followed by ASCII punctuation renders the punctuation literally.
fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if !cur.peek_at(1).is_some_and(Escape::escapable) {
        return None;
    }
    let start = cur.pos();
    cur.bump_n(2);
    Some(InlineNode::Text(Span {
        start: start + 1,
        end: start + 2,
    }))
}

/// Attempts to parse a code span opened by a backtick run.
///
/// The closing run must have the same length. An unmatched opening run is
/// skipped as a whole so a shorter run inside it is never tried.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let run = cur.run_len(CodeSpan::TICK);
    let start = cur.pos();
    let saved = cur.clone();
    cur.bump_n(run);
    let content_start = cur.i;

    while !cur.eof() {
        if cur.peek() == Some(CodeSpan::TICK) {
            let close_run = cur.run_len(CodeSpan::TICK);
            if close_run == run {
                let (lead, trail) = CodeSpan::strip_padding(&cur.s[content_start..cur.i]);
                let inner = Span {
                    start: cur.base + content_start + lead,
                    end: cur.base + content_start + trail,
                };
                cur.bump_n(run);
                return Some(InlineNode::CodeSpan {
                    full: Span {
                        start,
                        end: cur.pos(),
                    },
                    inner,
                });
            }
            cur.bump_n(close_run);
            continue;
        }
        cur.bump();
    }

    *cur = saved;
    cur.bump_n(run);
    None
}

/// Attempts to parse `<scheme:...>` or `<user@host>`.
///
/// Neither form contains whitespace or `<`, so the scan for `>` stops there.
fn try_parse_autolink(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let rest = cur.s.get(cur.i + 1..)?;
    let close = rest.find(|c: char| c == '>' || c == '<' || c.is_whitespace())?;
    if rest.as_bytes()[close] != Link::ANGLE_CLOSE {
        return None;
    }
    let target_text = &rest[..close];
    let email = if Link::is_uri_autolink(target_text) {
        false
    } else if Link::is_email_autolink(target_text) {
        true
    } else {
        return None;
    };

    let start = cur.pos();
    cur.bump_n(close + 2);
    Some(InlineNode::Autolink {
        full: Span {
            start,
            end: cur.pos(),
        },
        target: Span {
            start: start + 1,
            end: start + 1 + close,
        },
        email,
    })
}

/// Pairs every `[` with its matching `]` in one pass.
///
/// Code spans and autolinks bind tighter than link brackets, so brackets
/// inside them are skipped, as are backslash-escaped ones.
fn match_link_brackets(s: &str) -> HashMap<usize, usize> {
    let mut cur = Cursor::new(s, 0);
    let mut pairs = HashMap::new();
    let mut open = vec![];
    while let Some(b) = cur.peek() {
        match b {
            CodeSpan::TICK => {
                try_parse_code_span(&mut cur);
                continue;
            }
            Link::ANGLE_OPEN if try_parse_autolink(&mut cur).is_some() => continue,
            Escape::BACKSLASH => {
                cur.bump();
            }
            Link::TEXT_OPEN => open.push(cur.i),
            Link::TEXT_CLOSE => {
                if let Some(o) = open.pop() {
                    pairs.insert(o, cur.i);
                }
            }
            _ => {}
        }
        cur.bump();
    }
    pairs
}

/// Local indices of a parsed `(destination "title")` tail.
struct LinkTail {
    /// Destination without angle brackets, `[start, end)`.
    destination: (usize, usize),
    /// Index just past the closing `)`.
    end: usize,
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n')) {
        i += 1;
    }
    i
}

/// Parses everything after `](`: destination, optional title, `)`.
///
/// `unclosed_titles` remembers titles that ran off the end of the input so
/// later links do not rescan the same tail.
fn parse_link_tail(
    bytes: &[u8],
    start: usize,
    unclosed_titles: &mut HashMap<u8, usize>,
) -> Option<LinkTail> {
    let mut i = skip_whitespace(bytes, start);

    let destination = if bytes.get(i) == Some(&Link::ANGLE_OPEN) {
        let dest_start = i + 1;
        let mut j = dest_start;
        loop {
            match *bytes.get(j)? {
                b'\n' | Link::ANGLE_OPEN => return None,
                Link::ANGLE_CLOSE => break,
                Escape::BACKSLASH => j += 2,
                _ => j += 1,
            }
        }
        i = j + 1;
        (dest_start, j)
    } else {
        let dest_start = i;
        let mut parens = 0usize;
        while let Some(&b) = bytes.get(i) {
            match b {
                Escape::BACKSLASH if bytes.get(i + 1).is_some_and(|b| b.is_ascii_punctuation()) => {
                    i += 1;
                }
                Link::DEST_OPEN if parens == Link::MAX_DEST_PARENS => return None,
                Link::DEST_OPEN => parens += 1,
                Link::DEST_CLOSE if parens == 0 => break,
                Link::DEST_CLOSE => parens -= 1,
                b if b.is_ascii_whitespace() || b.is_ascii_control() => break,
                _ => {}
            }
            i += 1;
        }
        if parens != 0 {
            return None;
        }
        (dest_start, i)
    };

    let after_destination = i;
    i = skip_whitespace(bytes, i);
    if i > after_destination
        && let Some(title_close) = bytes.get(i).and_then(|&b| Link::title_close(b))
    {
        let title_start = i + 1;
        if unclosed_titles
            .get(&title_close)
            .is_some_and(|&from| title_start >= from)
        {
            return None;
        }
        let mut j = title_start;
        loop {
            match bytes.get(j) {
                None => {
                    unclosed_titles
                        .entry(title_close)
                        .and_modify(|from| *from = (*from).min(title_start))
                        .or_insert(title_start);
                    return None;
                }
                Some(&Escape::BACKSLASH) => j += 2,
                Some(&b) if b == title_close => break,
                Some(_) => j += 1,
            }
        }
        i = skip_whitespace(bytes, j + 1);
    }

    if bytes.get(i) != Some(&Link::DEST_CLOSE) {
        return None;
    }
    Some(LinkTail {
        destination,
        end: i + 1,
    })
}
