//! The abstract render tree the presenter produces.
//!
//! Nodes carry the text, font, color and alignment attributes a host needs;
//! nothing here touches I/O, which keeps the presenter a pure function. The
//! terminal adapter in [`crate::render::term`] is one consumer; a richer host
//! could honor the colors and gradient.

use serde::{Deserialize, Serialize};

pub const COLOR_BG_1: &str = "#1D1F21";
pub const COLOR_BG_2: &str = "#282A2E";
pub const COLOR_ERROR_1: &str = "#800000";
pub const COLOR_ERROR_2: &str = "#080000";

/// The widget form factor requested by the host.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
    /// The host has no layout context yet; renders nothing.
    Unknown,
}

serde_plain::derive_display_from_serialize!(LayoutSize);
serde_plain::derive_fromstr_from_deserialize!(LayoutSize);

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Font {
    /// Monospace, 11pt.
    #[default]
    Regular,
    /// Monospace, 9pt.
    Small,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum TextColor {
    #[default]
    Regular,
    Green,
    Red,
}

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A two-stop background gradient.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Gradient {
    pub start: &'static str,
    pub end: &'static str,
}

impl Gradient {
    pub const NEUTRAL: Gradient = Gradient {
        start: COLOR_BG_1,
        end: COLOR_BG_2,
    };

    pub const ERROR: Gradient = Gradient {
        start: COLOR_ERROR_1,
        end: COLOR_ERROR_2,
    };
}

/// One node of the declarative widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    VStack {
        spacing: u8,
        children: Vec<Node>,
    },
    HStack {
        children: Vec<Node>,
    },
    Text {
        text: String,
        font: Font,
        color: TextColor,
        align: Align,
    },
    Spacer {
        size: Option<u8>,
    },
}

impl Node {
    pub fn vstack(spacing: u8, children: Vec<Node>) -> Node {
        Node::VStack { spacing, children }
    }

    pub fn hstack(children: Vec<Node>) -> Node {
        Node::HStack { children }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text {
            text: text.into(),
            font: Font::Regular,
            color: TextColor::Regular,
            align: Align::Left,
        }
    }

    pub fn spacer() -> Node {
        Node::Spacer { size: None }
    }

    pub fn sized_spacer(size: u8) -> Node {
        Node::Spacer { size: Some(size) }
    }

    pub fn with_font(self, font: Font) -> Node {
        match self {
            Node::Text {
                text, color, align, ..
            } => Node::Text {
                text,
                font,
                color,
                align,
            },
            other => other,
        }
    }

    pub fn with_color(self, color: TextColor) -> Node {
        match self {
            Node::Text {
                text, font, align, ..
            } => Node::Text {
                text,
                font,
                color,
                align,
            },
            other => other,
        }
    }

    pub fn with_align(self, align: Align) -> Node {
        match self {
            Node::Text {
                text, font, color, ..
            } => Node::Text {
                text,
                font,
                color,
                align,
            },
            other => other,
        }
    }
}

/// The complete render output for one cycle: a background gradient and the
/// root of the node tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub gradient: Gradient,
    pub root: Node,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_size_round_trip() {
        assert_eq!("extra-large", LayoutSize::ExtraLarge.to_string());
        assert_eq!(LayoutSize::Small, "small".parse().unwrap());
        assert_eq!(LayoutSize::Unknown, "unknown".parse().unwrap());
    }

    #[test]
    fn test_text_builders() {
        let node = Node::text("hi")
            .with_color(TextColor::Green)
            .with_align(Align::Right)
            .with_font(Font::Small);
        assert_eq!(
            Node::Text {
                text: "hi".to_string(),
                font: Font::Small,
                color: TextColor::Green,
                align: Align::Right,
            },
            node
        );
    }
}
