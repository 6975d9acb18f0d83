//! Utility functions shared across the crate.
//!
//! - [`slug`]: node name slugification (`slugify`, `is_slug`)
//! - [`html`]: markup stripping for path segments (`strip_tags`)
//! - [`date`]: `YYYY-MM-DD` parsing for date fields
//! - [`plural`]: count formatting for messages

pub mod date;
pub mod html;
pub mod plural;
pub mod slug;

pub use html::strip_tags;
pub use plural::{plural_count, pluralize};
pub use slug::{is_slug, slugify};
