//! The presenter and its host adapters.

mod layout;
pub mod term;
mod tree;

pub use layout::{build, RenderContext};
pub use tree::{Align, Font, Gradient, LayoutSize, Node, TextColor, Widget};
