//! The presenter: a pure function from `(layout size, widget data)` to the
//! abstract render tree. No state, no I/O.

use crate::fetch::WidgetData;
use crate::model::{Snapshot, Transaction};
use crate::render::tree::{Align, Font, Gradient, LayoutSize, Node, TextColor, Widget};

const DIVIDER: &str = "-------------------------------------------";

/// Ambient facts the layouts need that are not part of the snapshot.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Header label for the aggregation window: the current month name, or
    /// "Current Pay cycle" in pay-cycle mode.
    pub window_label: String,
}

/// Builds the widget tree for one render cycle.
///
/// An unknown layout size renders an empty tree; hosts sometimes invoke the
/// program before any layout context exists.
pub fn build(size: LayoutSize, data: &WidgetData, ctx: &RenderContext) -> Widget {
    let snapshot = match data {
        WidgetData::Ready(snapshot) => snapshot,
        WidgetData::Empty => {
            return Widget {
                gradient: Gradient::NEUTRAL,
                root: empty_state(),
            }
        }
    };

    let gradient = if snapshot.accounts_in_error > 0 {
        Gradient::ERROR
    } else {
        Gradient::NEUTRAL
    };

    let root = match size {
        LayoutSize::Small => small(snapshot),
        LayoutSize::Medium => Node::vstack(2, medium(snapshot, ctx)),
        LayoutSize::Large | LayoutSize::ExtraLarge => large(snapshot, ctx),
        LayoutSize::Unknown => Node::vstack(0, Vec::new()),
    };

    Widget { gradient, root }
}

/// What the user sees on a first-ever run whose fetch failed: an explicit
/// no-data state instead of a blank or partial widget.
fn empty_state() -> Node {
    Node::vstack(
        2,
        vec![
            centered_header("LUNCH MONEY"),
            Node::sized_spacer(5),
            Node::text("NO DATA").with_align(Align::Center),
            Node::text("Could not reach the API and no snapshot is cached yet.")
                .with_font(Font::Small)
                .with_align(Align::Center),
        ],
    )
}

fn small(snapshot: &Snapshot) -> Node {
    let mut children = vec![
        centered_header("LUNCH MONEY"),
        Node::sized_spacer(5),
        metric_row("\u{1F7E2}", &snapshot.income, TextColor::Green),
        metric_row("\u{1F534}", &snapshot.spent, TextColor::Red),
        metric_row("\u{1F4B0}", &snapshot.total, total_color(snapshot)),
        metric_row("\u{1F3E6}", &snapshot.savings, savings_color(snapshot)),
    ];

    if snapshot.pending_transactions > 0 {
        children.push(Node::sized_spacer(5));
        children.push(metric_row(
            "\u{23F3}",
            &snapshot.pending_transactions.to_string(),
            TextColor::Regular,
        ));
    }

    if snapshot.accounts_in_error > 0 {
        children.push(Node::text("\u{2757} Sync Error").with_color(TextColor::Red));
    }

    children.push(Node::spacer());
    Node::vstack(2, children)
}

fn medium(snapshot: &Snapshot, ctx: &RenderContext) -> Vec<Node> {
    let mut children = vec![
        centered_header(&format!(
            "\u{1F4B0} LUNCH MONEY - {} \u{1F4B0}",
            ctx.window_label
        )),
        Node::sized_spacer(2),
        metric_row("\u{1F7E2} Total Income: ", &snapshot.income, TextColor::Green),
        metric_row("\u{1F534} Total Expenses: ", &snapshot.spent, TextColor::Red),
        metric_row("\u{1F4B0} Net Income: ", &snapshot.total, total_color(snapshot)),
        metric_row("\u{1F3E6} Savings rate: ", &snapshot.savings, savings_color(snapshot)),
    ];

    if snapshot.pending_transactions > 0 {
        children.push(metric_row(
            "\u{23F3} Pending Reviews:",
            &snapshot.pending_transactions.to_string(),
            TextColor::Regular,
        ));
    }

    if snapshot.accounts_in_error > 0 {
        children.push(
            Node::text(format!(
                "\u{2757} Sync Error(s) in {} Account(s).",
                snapshot.accounts_in_error
            ))
            .with_color(TextColor::Red),
        );
    } else {
        children.push(Node::text("Oldest Balance Syncs"));
        children.push(
            Node::text(format!("     - Plaid: {}", snapshot.plaid_oldest_update))
                .with_font(Font::Small),
        );
        children.push(
            Node::text(format!("     - Manual: {}", snapshot.manual_oldest_update))
                .with_font(Font::Small),
        );
    }

    children
}

fn large(snapshot: &Snapshot, ctx: &RenderContext) -> Node {
    let mut children = medium(snapshot, ctx);

    children.push(Node::sized_spacer(10));
    children.push(Node::text(DIVIDER));
    children.push(Node::sized_spacer(5));

    for transaction in &snapshot.last_transactions {
        children.push(transaction_row(transaction));
    }

    children.push(Node::spacer());
    Node::vstack(2, children)
}

fn transaction_row(transaction: &Transaction) -> Node {
    Node::hstack(vec![
        Node::text(format!("{} {}", transaction.date, transaction.payee)),
        Node::spacer(),
        // Rows always display the negated amount, whatever the type.
        Node::text(format!("{:.2}", -transaction.to_base)).with_align(Align::Right),
    ])
}

fn metric_row(label: &str, value: &str, color: TextColor) -> Node {
    Node::hstack(vec![
        Node::text(label),
        Node::spacer(),
        Node::text(value).with_color(color).with_align(Align::Right),
    ])
}

fn centered_header(text: &str) -> Node {
    Node::hstack(vec![
        Node::spacer(),
        Node::text(text).with_align(Align::Center),
        Node::spacer(),
    ])
}

fn total_color(snapshot: &Snapshot) -> TextColor {
    if snapshot.total.parse::<f64>().unwrap_or(0.0) >= 0.0 {
        TextColor::Green
    } else {
        TextColor::Red
    }
}

fn savings_color(snapshot: &Snapshot) -> TextColor {
    if snapshot.savings.starts_with('-') {
        TextColor::Red
    } else {
        TextColor::Green
    }
}
