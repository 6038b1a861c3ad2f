//! Typed record identifiers.
//!
//! Every table gets its own opaque id newtype so a clothing item id can
//! never be handed to a generation lookup by accident.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// View the underlying uuid.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    /// Identifier of a user account (resolved by the auth collaborator).
    UserId
);
define_id!(
    /// Identifier of a generation record.
    GenerationId
);
define_id!(
    /// Identifier of a clothing item record.
    ClothingItemId
);
define_id!(
    /// Identifier of an entry in the shared default-clothing library.
    DefaultClothingItemId
);
define_id!(
    /// Identifier of a model (body) image record.
    ModelImageId
);
define_id!(
    /// Identifier of an inspiration image record.
    InspoImageId
);
define_id!(
    /// Opaque reference to a blob held by an image store.
    ImageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        let id = GenerationId::new();
        let parsed: GenerationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(ImageId::new(), ImageId::new());
    }
}
