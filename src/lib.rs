//! Canopy - a multilingual content tree with URL resolution and a
//! publication workflow.
//!
//! # Layout
//!
//! | Module       | Purpose                                             |
//! |--------------|-----------------------------------------------------|
//! | `core`       | Ids, statuses, request path tokenization            |
//! | `content`    | Nodes, translations, URL aliases                    |
//! | `schema`     | Node types and field validation                     |
//! | `tree`       | Ordering, moves, renames, reachability              |
//! | `workflow`   | Publication state machine and guards                |
//! | `store`      | Storage traits, in-memory store, TOML fixtures      |
//! | `resolve`    | Path to node resolution and path generation         |
//! | `front`      | Request entry point (home and language roots)       |
//! | `settings`   | Cached key/value settings                           |
//! | `config`     | `canopy.toml` loading and validation                |

pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod front;
pub mod logger;
pub mod resolve;
pub mod schema;
pub mod settings;
pub mod store;
pub mod tree;
pub mod utils;
pub mod workflow;
