//! Core types - pure abstractions shared across the codebase.

mod id;
mod status;
mod url;

pub use id::{AliasId, NodeId, TranslationId};
pub use status::{NodeStatus, ViewMode};
pub use url::{RequestPath, Segments, tokenize};
