//! Configuration section definitions.
//!
//! | Module    | TOML Section  | Purpose                             |
//! |-----------|---------------|-------------------------------------|
//! | `routing` | `[routing]`   | Locale prefixes, home node, limits  |
//! | `types`   | `[[types]]`   | Node-type registry declarations     |

mod routing;
mod types;

pub use routing::RoutingConfig;
pub use types::{default_types, validate_types};
