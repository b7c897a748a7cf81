//! Integer-backed ID types.
//!
//! Each ID wraps an `i64` so a `HostId` cannot be passed where a `ModuleId`
//! is expected. Serialization is transparent, so the wire form stays a bare
//! integer.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create a new ID from a raw integer.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw integer.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Host identifier.
    HostId
);

define_id!(
    /// Module identifier. A host may belong to several modules.
    ModuleId
);

define_id!(
    /// Service template identifier. Modules may be bound to one template.
    ServiceTemplateId
);

define_id!(
    /// Host model attribute identifier.
    AttributeId
);

define_id!(
    /// Auto-apply rule identifier.
    RuleId
);

define_id!(
    /// Business (tenant) identifier.
    BizId
);

impl RuleId {
    /// ID carried by rules that only exist in a what-if edit and were never saved.
    pub const UNSAVED: RuleId = RuleId(0);

    /// Whether this rule exists in the rule store.
    pub fn is_saved(self) -> bool {
        self != Self::UNSAVED
    }
}
