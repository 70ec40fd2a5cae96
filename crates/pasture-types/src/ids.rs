//! Dense, 1-based identifier wrappers.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. Identifiers are handed
//! out sequentially in creation order starting at 1, so an ID doubles as a
//! stable index into the registry's creation order regardless of how the
//! scheduler later reorders entities.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`NonZeroU32`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an identifier from its 1-based sequence number.
            ///
            /// Returns `None` for 0, which is never a valid identifier.
            pub const fn new(number: u32) -> Option<Self> {
                match NonZeroU32::new(number) {
                    Some(n) => Some(Self(n)),
                    None => None,
                }
            }

            /// Create the identifier for the entity at a 0-based creation index.
            ///
            /// Returns `None` if the index does not fit the identifier range.
            pub fn from_index(index: usize) -> Option<Self> {
                let number = u32::try_from(index).ok()?.checked_add(1)?;
                Self::new(number)
            }

            /// Return the 1-based sequence number.
            pub const fn number(self) -> u32 {
                self.0.get()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{:03}", self.0)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a forager agent.
    AgentId
}

define_id! {
    /// Unique identifier for a wolf in the pack.
    WolfId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_an_id() {
        assert!(AgentId::new(0).is_none());
        assert!(WolfId::new(0).is_none());
    }

    #[test]
    fn creation_index_maps_to_one_based_number() {
        assert_eq!(AgentId::from_index(0).unwrap().number(), 1);
        assert_eq!(WolfId::from_index(41).unwrap().number(), 42);
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(AgentId::new(7).unwrap().to_string(), "007");
        assert_eq!(WolfId::new(1234).unwrap().to_string(), "1234");
    }

    #[test]
    fn serializes_as_plain_number() {
        let id = AgentId::new(12).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12");
        let back: AgentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
