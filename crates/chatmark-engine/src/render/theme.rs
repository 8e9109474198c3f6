use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Sender;
use crate::styled::{Fragment, RunKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("colour '{value}' must look like #rrggbb")]
    BadFormat { value: String },
}

/// A 24-bit colour, written `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ColorError::BadFormat {
            value: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Colours and sizes used to turn style runs into concrete styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Body text in the user's own (outgoing) messages.
    pub text_outgoing: Rgb,
    /// Body text in incoming messages.
    pub text_incoming: Rgb,
    pub link: Rgb,
    /// Fill behind inline code.
    pub code_background: Rgb,
    /// Fill behind fenced code blocks.
    pub code_block_background: Rgb,
    pub body_font_size: f32,
    /// Secondary size used for inline code and code blocks.
    pub code_font_size: f32,
    /// Links are only ever underlined in outgoing messages.
    pub underline_outgoing_links: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_outgoing: Rgb::new(0xff, 0xff, 0xff),
            text_incoming: Rgb::new(0xe5, 0xe5, 0xe5),
            link: Rgb::new(0x8b, 0x5c, 0xf6),
            code_background: Rgb::new(0x2a, 0x2a, 0x2e),
            code_block_background: Rgb::new(0x1c, 0x1c, 0x1f),
            body_font_size: 14.0,
            code_font_size: 13.0,
            underline_outgoing_links: true,
        }
    }
}

/// A toolkit-neutral style. `None` and `false` mean "inherit".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStyle {
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    pub font_size: Option<f32>,
    pub monospace: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl RunStyle {
    /// Layers `other` on top of `self`.
    pub fn merge(&mut self, other: &RunStyle) {
        self.foreground = other.foreground.or(self.foreground);
        self.background = other.background.or(self.background);
        self.font_size = other.font_size.or(self.font_size);
        self.monospace |= other.monospace;
        self.bold |= other.bold;
        self.italic |= other.italic;
        self.underline |= other.underline;
        self.strikethrough |= other.strikethrough;
    }

    /// Inline CSS declarations for the web adapter.
    pub fn to_css(&self) -> String {
        let mut decls = vec![];
        if let Some(fg) = self.foreground {
            decls.push(format!("color:{fg}"));
        }
        if let Some(bg) = self.background {
            decls.push(format!("background-color:{bg}"));
        }
        if self.monospace {
            decls.push("font-family:monospace".to_string());
        }
        if let Some(size) = self.font_size {
            decls.push(format!("font-size:{size}px"));
        }
        if self.bold {
            decls.push("font-weight:bold".to_string());
        }
        if self.italic {
            decls.push("font-style:italic".to_string());
        }
        let lines: Vec<&str> = [
            self.underline.then_some("underline"),
            self.strikethrough.then_some("line-through"),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !lines.is_empty() {
            decls.push(format!("text-decoration:{}", lines.join(" ")));
        }
        decls.join(";")
    }
}

impl Theme {
    /// The style every prose fragment starts from.
    pub fn base_style(&self, sender: Sender) -> RunStyle {
        RunStyle {
            foreground: Some(if sender.is_outgoing() {
                self.text_outgoing
            } else {
                self.text_incoming
            }),
            font_size: Some(self.body_font_size),
            ..RunStyle::default()
        }
    }

    /// The override one run kind applies on top of the base style.
    pub fn style_for(&self, kind: &RunKind, sender: Sender) -> RunStyle {
        match kind {
            RunKind::Code => RunStyle {
                monospace: true,
                font_size: Some(self.code_font_size),
                background: Some(self.code_background),
                ..RunStyle::default()
            },
            RunKind::Link { .. } => RunStyle {
                foreground: Some(self.link),
                underline: sender.is_outgoing() && self.underline_outgoing_links,
                ..RunStyle::default()
            },
            RunKind::Strong => RunStyle {
                bold: true,
                ..RunStyle::default()
            },
            RunKind::Emphasis => RunStyle {
                italic: true,
                ..RunStyle::default()
            },
            RunKind::Strikethrough => RunStyle {
                strikethrough: true,
                ..RunStyle::default()
            },
        }
    }

    /// The fully resolved style of one fragment.
    pub fn fragment_style(&self, fragment: &Fragment<'_>, sender: Sender) -> RunStyle {
        let mut style = self.base_style(sender);
        for kind in &fragment.kinds {
            style.merge(&self.style_for(kind, sender));
        }
        style
    }

    /// The style of a fenced code block body.
    pub fn code_block_style(&self, sender: Sender) -> RunStyle {
        RunStyle {
            monospace: true,
            font_size: Some(self.code_font_size),
            background: Some(self.code_block_background),
            ..self.base_style(sender)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styled::StyledText;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_and_print_colours() {
        let rgb: Rgb = "#8B5cf6".parse().unwrap();
        assert_eq!(rgb, Rgb::new(0x8b, 0x5c, 0xf6));
        assert_eq!(rgb.to_string(), "#8b5cf6");
    }

    #[test]
    fn reject_malformed_colours() {
        for bad in ["8b5cf6", "#8b5cf", "#zzzzzz", "#8b5cf6ff", ""] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn link_underline_only_when_outgoing() {
        let theme = Theme::default();
        let link = RunKind::Link {
            destination: "https://x".to_string(),
        };
        assert!(theme.style_for(&link, Sender::User).underline);
        assert!(!theme.style_for(&link, Sender::Ai).underline);
        assert_eq!(theme.style_for(&link, Sender::Ai).foreground, Some(theme.link));
    }

    #[test]
    fn underline_can_be_turned_off() {
        let theme = Theme {
            underline_outgoing_links: false,
            ..Theme::default()
        };
        let link = RunKind::Link {
            destination: "u".to_string(),
        };
        assert!(!theme.style_for(&link, Sender::User).underline);
    }

    #[test]
    fn code_is_monospace_secondary_size_with_fill() {
        let theme = Theme::default();
        let style = theme.style_for(&RunKind::Code, Sender::Ai);
        assert!(style.monospace);
        assert_eq!(style.font_size, Some(theme.code_font_size));
        assert_eq!(style.background, Some(theme.code_background));
    }

    #[test]
    fn fragment_style_layers_over_base() {
        let theme = Theme::default();
        let styled = StyledText::extract("[**x**](u)");
        let fragments = styled.fragments();
        let style = theme.fragment_style(&fragments[0], Sender::User);
        assert_eq!(style.foreground, Some(theme.link));
        assert_eq!(style.font_size, Some(theme.body_font_size));
        assert!(style.bold);
        assert!(style.underline);
    }

    #[test]
    fn css_lists_only_set_properties() {
        let style = RunStyle {
            foreground: Some(Rgb::new(1, 2, 3)),
            underline: true,
            strikethrough: true,
            ..RunStyle::default()
        };
        assert_eq!(
            style.to_css(),
            "color:#010203;text-decoration:underline line-through"
        );
        assert_eq!(RunStyle::default().to_css(), "");
    }
}
