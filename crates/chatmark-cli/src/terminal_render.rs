//! Maps rendered messages onto ratatui text.
//!
//! Terminals have one font, so `monospace` and `font_size` are dropped;
//! colours and modifiers carry over.

use chatmark_engine::{RenderedBlock, RenderedMessage, Rgb, RunStyle, Theme};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub fn to_ratatui_style(style: &RunStyle) -> Style {
    let mut out = Style::default();
    if let Some(fg) = style.foreground {
        out = out.fg(color(fg));
    }
    if let Some(bg) = style.background {
        out = out.bg(color(bg));
    }
    let modifiers = [
        (style.bold, Modifier::BOLD),
        (style.italic, Modifier::ITALIC),
        (style.underline, Modifier::UNDERLINED),
        (style.strikethrough, Modifier::CROSSED_OUT),
    ];
    for (on, modifier) in modifiers {
        if on {
            out = out.add_modifier(modifier);
        }
    }
    out
}

/// Lays a message out as terminal lines, a blank line between blocks.
pub fn message_lines(message: &RenderedMessage, theme: &Theme) -> Vec<Line<'static>> {
    let sender = message.sender;
    let mut lines: Vec<Line<'static>> = vec![];

    for (i, block) in message.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        match block {
            RenderedBlock::Text { styled, .. } => {
                let mut current: Vec<Span<'static>> = vec![];
                for fragment in styled.fragments() {
                    let style = to_ratatui_style(&theme.fragment_style(&fragment, sender));
                    let mut pieces = fragment.text.split('\n').peekable();
                    while let Some(piece) = pieces.next() {
                        if !piece.is_empty() {
                            current.push(Span::styled(piece.to_string(), style));
                        }
                        if pieces.peek().is_some() {
                            lines.push(Line::from(std::mem::take(&mut current)));
                        }
                    }
                }
                lines.push(Line::from(current));
            }
            RenderedBlock::Code {
                language, content, ..
            } => {
                let style = to_ratatui_style(&theme.code_block_style(sender));
                let label = language.as_deref().unwrap_or("code");
                lines.push(Line::from(Span::styled(
                    format!("── {label} ──"),
                    style.add_modifier(Modifier::DIM),
                )));
                for code_line in content.split('\n') {
                    lines.push(Line::from(Span::styled(code_line.to_string(), style)));
                }
            }
        }
    }
    lines
}
