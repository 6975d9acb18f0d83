//! Configuration utility types.
//!
//! | Module   | Purpose                                |
//! |----------|----------------------------------------|
//! | `error`  | `ConfigError`, collected diagnostics   |
//! | `field`  | `FieldPath` for diagnostic messages    |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
