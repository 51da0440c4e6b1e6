//! Data tree helpers for quire.
//!
//! Page data is a loosely-structured tree of [`serde_json::Value`] nodes merged
//! from site-wide and page-local sources. This crate provides the small set of
//! operations the renderers need on that tree:
//!
//! - [`lookup`] / [`get_path`]: walk a dot- or slash-delimited path
//! - [`deep_merge`]: combine global and local data with local precedence
//! - [`is_truthy`], [`loose_eq`], [`strict_eq`]: comparisons with the
//!   semantics content authors expect from filter directives
//! - [`display`]: render a leaf as text
//!
//! Object key order is preserved (`serde_json/preserve_order`), so mappings
//! iterate in the order they were authored.

mod merge;
mod path;
mod value;

pub use merge::deep_merge;
pub use path::{get_path, last_segment, lookup, split_path};
pub use value::{display, is_truthy, loose_eq, opt_truthy, strict_eq};

/// The data tree type shared by all quire crates.
pub type Data = serde_json::Value;
