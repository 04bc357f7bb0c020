mod aggregate;
mod api;
pub mod args;
mod cache;
pub mod commands;
mod config;
mod error;
mod fetch;
mod keys;
mod model;
mod render;
mod utils;

pub use cache::SnapshotCache;
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use keys::{KeyStore, Storage};
pub use render::LayoutSize;
