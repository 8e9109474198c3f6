//! # Styled Runs
//!
//! Flattens the inline tree of one prose segment into the plain text a UI
//! draws plus [`StyleRun`]s over it. Runs are byte ranges into
//! [`StyledText::plain`]; delimiters never appear in either.

use crate::{
    inline::{InlineNode, kinds::EmphasisKind, kinds::Escape, kinds::Link, parse_inline},
    span::Span,
};

/// The visual treatment a run asks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunKind {
    Code,
    /// The destination is passed through as written, not validated.
    Link { destination: String },
    Strong,
    Emphasis,
    Strikethrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRun {
    pub kind: RunKind,
    pub span: Span,
}

/// A stretch of plain text together with every run covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub span: Span,
    pub text: &'a str,
    pub kinds: Vec<&'a RunKind>,
}

impl Fragment<'_> {
    pub fn has(&self, pred: impl Fn(&RunKind) -> bool) -> bool {
        self.kinds.iter().any(|&k| pred(k))
    }

    pub fn link_destination(&self) -> Option<&str> {
        self.kinds.iter().find_map(|k| match k {
            RunKind::Link { destination } => Some(destination.as_str()),
            _ => None,
        })
    }
}

/// Rendered prose: plain text plus ordered style runs over it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    pub plain: String,
    pub runs: Vec<StyleRun>,
}

/// The attribute set of one stretch of flattened text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Attributes {
    code: bool,
    link: Option<String>,
    strong: bool,
    emphasis: bool,
    strikethrough: bool,
}

/// Builds the plain string and its maximal same-attribute stretches.
struct Flattener<'a> {
    source: &'a str,
    plain: String,
    stretches: Vec<(Span, Attributes)>,
}

impl<'a> Flattener<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            plain: String::with_capacity(source.len()),
            stretches: vec![],
        }
    }

    fn push(&mut self, text: &str, attrs: &Attributes) {
        if text.is_empty() {
            return;
        }
        let start = self.plain.len();
        self.plain.push_str(text);
        let end = self.plain.len();

        if let Some((span, last)) = self.stretches.last_mut()
            && last == attrs
            && span.end == start
        {
            span.end = end;
            return;
        }
        self.stretches.push((Span { start, end }, attrs.clone()));
    }

    fn walk(&mut self, nodes: &[InlineNode], attrs: &Attributes) {
        for node in nodes {
            match node {
                InlineNode::Text(span) => self.push(span.slice(self.source), attrs),
                InlineNode::CodeSpan { inner, .. } => {
                    let code = Attributes {
                        code: true,
                        ..attrs.clone()
                    };
                    self.push(inner.slice(self.source), &code);
                }
                InlineNode::Delimited { kind, children, .. } => {
                    let mut nested = attrs.clone();
                    match kind {
                        EmphasisKind::Strong => nested.strong = true,
                        EmphasisKind::Emphasis => nested.emphasis = true,
                        EmphasisKind::Strikethrough => nested.strikethrough = true,
                    }
                    self.walk(children, &nested);
                }
                InlineNode::Link {
                    destination,
                    children,
                    ..
                } => {
                    let linked = Attributes {
                        link: Some(Escape::unescape(destination.slice(self.source))),
                        ..attrs.clone()
                    };
                    self.walk(children, &linked);
                }
                InlineNode::Autolink { target, email, .. } => {
                    let text = target.slice(self.source);
                    let destination = if *email {
                        format!("{}{text}", Link::MAILTO)
                    } else {
                        text.to_string()
                    };
                    let linked = Attributes {
                        link: Some(destination),
                        ..attrs.clone()
                    };
                    self.push(text, &linked);
                }
            }
        }
    }

    /// Walks the stretches once; each attribute of a stretch becomes its own
    /// run, so a code span inside a link yields both a code and a link run.
    fn finish(self) -> StyledText {
        let mut runs = vec![];
        for (span, attrs) in self.stretches {
            if attrs.code {
                runs.push(StyleRun {
                    kind: RunKind::Code,
                    span,
                });
            }
            if let Some(destination) = attrs.link {
                runs.push(StyleRun {
                    kind: RunKind::Link { destination },
                    span,
                });
            }
            if attrs.strong {
                runs.push(StyleRun {
                    kind: RunKind::Strong,
                    span,
                });
            }
            if attrs.emphasis {
                runs.push(StyleRun {
                    kind: RunKind::Emphasis,
                    span,
                });
            }
            if attrs.strikethrough {
                runs.push(StyleRun {
                    kind: RunKind::Strikethrough,
                    span,
                });
            }
        }
        StyledText {
            plain: self.plain,
            runs,
        }
    }
}

impl StyledText {
    /// Unstyled text with no runs.
    pub fn plain(text: &str) -> Self {
        Self {
            plain: text.to_string(),
            runs: vec![],
        }
    }

    /// Parses already-preprocessed prose and extracts its style runs.
    ///
    /// Never fails: malformed markup stays in `plain` as literal text.
    pub fn extract(preprocessed: &str) -> Self {
        let nodes = parse_inline(0, preprocessed);
        let mut flattener = Flattener::new(preprocessed);
        flattener.walk(&nodes, &Attributes::default());
        let styled = flattener.finish();
        log::trace!("extracted {} style runs", styled.runs.len());
        styled
    }

    /// The plain text a run covers.
    pub fn text_of(&self, run: &StyleRun) -> &str {
        run.span.slice(&self.plain)
    }

    /// Runs matching `pred`, in order.
    pub fn runs_where<'a>(
        &'a self,
        pred: impl Fn(&RunKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a StyleRun> + 'a {
        self.runs.iter().filter(move |run| pred(&run.kind))
    }

    /// Splits `plain` at every run boundary. Fragments cover the whole text
    /// in order; unstyled fragments have no kinds.
    pub fn fragments(&self) -> Vec<Fragment<'_>> {
        let mut bounds: Vec<usize> = self
            .runs
            .iter()
            .flat_map(|run| [run.span.start, run.span.end])
            .chain([0, self.plain.len()])
            .collect();
        bounds.sort_unstable();
        bounds.dedup();

        bounds
            .windows(2)
            .map(|w| {
                let span = Span {
                    start: w[0],
                    end: w[1],
                };
                let kinds = self
                    .runs
                    .iter()
                    .filter(|run| run.span.start <= span.start && span.end <= run.span.end)
                    .map(|run| &run.kind)
                    .collect();
                Fragment {
                    span,
                    text: span.slice(&self.plain),
                    kinds,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::MAX_NESTING;
    use pretty_assertions::assert_eq;

    fn link(destination: &str) -> RunKind {
        RunKind::Link {
            destination: destination.to_string(),
        }
    }

    #[test]
    fn code_run_covers_only_the_code_text() {
        let styled = StyledText::extract("run `inline code` here");
        assert_eq!(styled.plain, "run inline code here");
        let code: Vec<_> = styled.runs_where(|k| *k == RunKind::Code).collect();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].span, Span { start: 4, end: 15 });
        assert_eq!(styled.text_of(code[0]), "inline code");
    }

    #[test]
    fn link_run_carries_destination() {
        let styled = StyledText::extract("see [the docs](https://x.io/a\\_b)");
        assert_eq!(styled.plain, "see the docs");
        assert_eq!(
            styled.runs,
            vec![StyleRun {
                kind: link("https://x.io/a_b"),
                span: Span { start: 4, end: 12 },
            }]
        );
    }

    #[test]
    fn code_inside_link_yields_both_runs() {
        let styled = StyledText::extract("[`cargo`](https://doc.rust-lang.org)");
        assert_eq!(styled.plain, "cargo");
        assert_eq!(
            styled.runs,
            vec![
                StyleRun {
                    kind: RunKind::Code,
                    span: Span { start: 0, end: 5 },
                },
                StyleRun {
                    kind: link("https://doc.rust-lang.org"),
                    span: Span { start: 0, end: 5 },
                },
            ]
        );
    }

    #[test]
    fn link_split_by_bold_gives_one_link_run_per_stretch() {
        let styled = StyledText::extract("[a **b** c](u)");
        assert_eq!(styled.plain, "a b c");
        let links: Vec<Span> = styled
            .runs_where(|k| matches!(k, RunKind::Link { .. }))
            .map(|r| r.span)
            .collect();
        assert_eq!(
            links,
            vec![
                Span { start: 0, end: 2 },
                Span { start: 2, end: 3 },
                Span { start: 3, end: 5 },
            ]
        );
    }

    #[test]
    fn bold_and_italic_runs() {
        let styled = StyledText::extract("**Title** and *note*");
        assert_eq!(styled.plain, "Title and note");
        assert_eq!(
            styled.runs,
            vec![
                StyleRun {
                    kind: RunKind::Strong,
                    span: Span { start: 0, end: 5 },
                },
                StyleRun {
                    kind: RunKind::Emphasis,
                    span: Span { start: 10, end: 14 },
                },
            ]
        );
    }

    #[test]
    fn email_autolink_gets_mailto() {
        let styled = StyledText::extract("mail <me@host.org>");
        assert_eq!(styled.plain, "mail me@host.org");
        assert_eq!(styled.runs[0].kind, link("mailto:me@host.org"));
    }

    #[test]
    fn escapes_merge_into_surrounding_text() {
        let styled = StyledText::extract(r"1\*2\*3");
        assert_eq!(styled.plain, "1*2*3");
        assert!(styled.runs.is_empty());
    }

    #[test]
    fn whitespace_and_newlines_are_preserved() {
        let styled = StyledText::extract("a  b\n\n  `c`");
        assert_eq!(styled.plain, "a  b\n\n  c");
        assert_eq!(styled.runs[0].span, Span { start: 8, end: 9 });
    }

    #[test]
    fn runaway_nesting_keeps_the_outer_levels() {
        let depth = MAX_NESTING + 1;
        let input = format!("{}x{}", "~~a ".repeat(depth), " a~~".repeat(depth));
        let styled = StyledText::extract(&input);
        assert_eq!(styled.plain.len(), input.len() - MAX_NESTING * 4);
        assert_eq!(
            styled.runs,
            vec![StyleRun {
                kind: RunKind::Strikethrough,
                span: Span {
                    start: 0,
                    end: styled.plain.len() - " a~~".len(),
                },
            }]
        );
    }

    #[test]
    fn unclosed_openers_keep_code_and_link_runs() {
        let openers: String = (0..34).map(|i| format!("_v{i} ")).collect();
        let input = format!("see `code` and {openers}[docs](u)");
        let styled = StyledText::extract(&input);
        assert_eq!(styled.plain, format!("see code and {openers}docs"));
        assert_eq!(
            styled.runs,
            vec![
                StyleRun {
                    kind: RunKind::Code,
                    span: Span { start: 4, end: 8 },
                },
                StyleRun {
                    kind: link("u"),
                    span: Span {
                        start: styled.plain.len() - 4,
                        end: styled.plain.len(),
                    },
                },
            ]
        );
    }

    #[test]
    fn code_span_in_link_text_keeps_the_link() {
        let styled = StyledText::extract("[`]`](u)");
        assert_eq!(styled.plain, "]");
        assert_eq!(
            styled.runs,
            vec![
                StyleRun {
                    kind: RunKind::Code,
                    span: Span { start: 0, end: 1 },
                },
                StyleRun {
                    kind: link("u"),
                    span: Span { start: 0, end: 1 },
                },
            ]
        );
    }

    #[test]
    fn strong_inside_emphasis() {
        let styled = StyledText::extract("*foo**bar**baz*");
        assert_eq!(styled.plain, "foobarbaz");
        let strong: Vec<&str> = styled
            .runs_where(|k| *k == RunKind::Strong)
            .map(|run| styled.text_of(run))
            .collect();
        assert_eq!(strong, vec!["bar"]);
        let emphasis: Vec<&str> = styled
            .runs_where(|k| *k == RunKind::Emphasis)
            .map(|run| styled.text_of(run))
            .collect();
        assert_eq!(emphasis, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn offsets_are_bytes_into_plain() {
        let styled = StyledText::extract("é `ü`");
        assert_eq!(styled.plain, "é ü");
        assert_eq!(styled.runs[0].span, Span { start: 3, end: 5 });
        assert_eq!(styled.text_of(&styled.runs[0]), "ü");
    }

    #[test]
    fn fragments_cover_the_text() {
        let styled = StyledText::extract("a [`b`](u) c");
        let fragments = styled.fragments();
        let texts: Vec<&str> = fragments.iter().map(|f| f.text).collect();
        assert_eq!(texts, vec!["a ", "b", " c"]);
        assert!(fragments[0].kinds.is_empty());
        assert!(fragments[1].has(|k| *k == RunKind::Code));
        assert_eq!(fragments[1].link_destination(), Some("u"));
    }

    #[test]
    fn fragments_of_empty_text() {
        assert!(StyledText::plain("").fragments().is_empty());
    }
}
