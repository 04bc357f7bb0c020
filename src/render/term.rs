//! The terminal adapter: flattens the abstract widget tree into aligned
//! plain-text lines.
//!
//! Colors and the background gradient are attributes for richer hosts; this
//! adapter only honors text, alignment and vertical spacing.

use crate::render::tree::{Align, Node, Widget};

/// Every layout renders into this many columns.
const WIDTH: usize = 46;

/// Spacers at least this tall become a blank line.
const BLANK_LINE_THRESHOLD: u8 = 5;

/// Flattens the widget into terminal text. An empty tree produces an empty
/// string.
pub fn to_text(widget: &Widget) -> String {
    let mut lines = Vec::new();
    collect_lines(&widget.root, &mut lines);
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn collect_lines(node: &Node, lines: &mut Vec<String>) {
    match node {
        Node::VStack { children, .. } => {
            for child in children {
                collect_lines(child, lines);
            }
        }
        Node::HStack { children } => lines.push(hstack_line(children)),
        Node::Text { text, align, .. } => lines.push(aligned(text, *align)),
        Node::Spacer { size } => {
            // Unsized spacers fill remaining space in the host UI; in a
            // terminal they only matter as a blank line separator.
            if size.unwrap_or(BLANK_LINE_THRESHOLD) >= BLANK_LINE_THRESHOLD {
                lines.push(String::new());
            }
        }
    }
}

/// Joins a horizontal stack into one line. A spacer splits the line into a
/// left-aligned part and a right-aligned remainder; surrounding spacers
/// center the content.
fn hstack_line(children: &[Node]) -> String {
    let mut segments: Vec<String> = vec![String::new()];
    for child in children {
        match child {
            Node::Spacer { .. } => segments.push(String::new()),
            Node::Text { text, .. } => {
                if let Some(last) = segments.last_mut() {
                    last.push_str(text);
                }
            }
            // Nested stacks inside an HStack do not occur in these layouts.
            _ => {}
        }
    }

    match segments.len() {
        1 => aligned(&segments[0], Align::Left),
        2 => split(&segments[0], &segments[1]),
        _ => {
            // Leading and trailing spacers: center the middle content.
            let middle = segments[1..segments.len() - 1].concat();
            aligned(&middle, Align::Center)
        }
    }
}

fn aligned(text: &str, align: Align) -> String {
    let text = text.trim_end();
    match align {
        Align::Left => text.to_string(),
        Align::Center => format!("{text:^width$}", width = WIDTH).trim_end().to_string(),
        Align::Right => format!("{text:>width$}", width = WIDTH),
    }
}

fn split(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = WIDTH.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::{Gradient, TextColor};

    fn widget(root: Node) -> Widget {
        Widget {
            gradient: Gradient::NEUTRAL,
            root,
        }
    }

    #[test]
    fn test_empty_tree_is_empty_text() {
        assert_eq!("", to_text(&widget(Node::vstack(0, Vec::new()))));
    }

    #[test]
    fn test_split_row_is_padded_to_width() {
        let row = Node::hstack(vec![
            Node::text("Income:"),
            Node::spacer(),
            Node::text("1000.00")
                .with_color(TextColor::Green)
                .with_align(Align::Right),
        ]);
        let line = to_text(&widget(Node::vstack(0, vec![row])));
        assert_eq!(WIDTH + 1, line.chars().count()); // includes trailing newline
        assert!(line.starts_with("Income:"));
        assert!(line.ends_with("1000.00\n"));
    }

    #[test]
    fn test_surrounding_spacers_center_text() {
        let row = Node::hstack(vec![
            Node::spacer(),
            Node::text("HEADER"),
            Node::spacer(),
        ]);
        let line = to_text(&widget(Node::vstack(0, vec![row])));
        let leading = line.chars().take_while(|c| *c == ' ').count();
        assert_eq!((WIDTH - "HEADER".len()) / 2, leading);
    }

    #[test]
    fn test_small_spacers_are_dropped_and_large_ones_blank() {
        let tree = Node::vstack(
            0,
            vec![
                Node::text("a"),
                Node::sized_spacer(2),
                Node::text("b"),
                Node::sized_spacer(10),
                Node::text("c"),
                Node::spacer(),
            ],
        );
        assert_eq!("a\nb\n\nc\n\n", to_text(&widget(tree)));
    }

    #[test]
    fn test_overlong_row_keeps_one_space_gap() {
        let row = Node::hstack(vec![
            Node::text("x".repeat(40)),
            Node::spacer(),
            Node::text("12345.67").with_align(Align::Right),
        ]);
        let line = to_text(&widget(Node::vstack(0, vec![row])));
        assert!(line.contains(&format!("{} 12345.67", "x".repeat(40))));
    }
}
