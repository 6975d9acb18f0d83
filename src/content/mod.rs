//! Content model: nodes, translations and aliases.

mod alias;
mod node;
mod translation;

pub use alias::UrlAlias;
pub use node::{Node, NodeSource};
pub use translation::{Translation, shortcut_for};
