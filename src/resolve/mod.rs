//! URL resolution.
//!
//! | Module     | Purpose                                         |
//! |------------|-------------------------------------------------|
//! | `resolver` | Request path -> node + translation              |
//! | `path`     | Node + translation -> canonical path (reverse)  |
//! | `context`  | Per-request inputs (view mode, locale hint)     |
//! | `result`   | `ResolveResult`, `Resolution`, `Visibility`     |

mod context;
mod path;
mod resolver;
mod result;


pub use context::ResolveContext;
pub use path::UrlGenerator;
pub use resolver::{DEFAULT_MAX_SEGMENTS, Resolver};
pub use result::{Resolution, ResolveResult, Visibility};
