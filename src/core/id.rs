//! Opaque identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[inline]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a content node.
    NodeId,
    "node"
);
define_id!(
    /// Identity of a translation (locale).
    TranslationId,
    "translation"
);
define_id!(
    /// Identity of a URL alias.
    AliasId,
    "alias"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodeId::new(7).to_string(), "node#7");
        assert_eq!(TranslationId::new(1).to_string(), "translation#1");
        assert_eq!(AliasId::new(3).to_string(), "alias#3");
    }

    #[test]
    fn test_serde_transparent() {
        assert_eq!(serde_json::to_string(&NodeId::new(42)).unwrap(), "42");
    }
}
