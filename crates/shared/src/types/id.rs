//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `HorseId` where an
//! `OwnerId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
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

typed_id!(OwnerId, "Unique identifier for a horse owner.");
typed_id!(HorseId, "Unique identifier for a horse.");
typed_id!(LocationId, "Unique identifier for a yard location.");
typed_id!(OwnershipId, "Unique identifier for an ownership window.");
typed_id!(PlacementId, "Unique identifier for a placement.");
typed_id!(RateTypeId, "Unique identifier for a livery rate type.");
typed_id!(ServiceProviderId, "Unique identifier for a service provider.");
typed_id!(ExtraChargeId, "Unique identifier for an extra charge.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(InvoiceLineItemId, "Unique identifier for an invoice line item.");
typed_id!(VaccinationTypeId, "Unique identifier for a vaccination type.");
typed_id!(VaccinationId, "Unique identifier for a vaccination record.");
typed_id!(FarrierVisitId, "Unique identifier for a farrier visit.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(HorseId::new(), HorseId::new());
        assert_ne!(InvoiceId::new(), InvoiceId::new());
    }

    #[test]
    fn test_id_round_trip_through_uuid() {
        let id = OwnerId::new();
        assert_eq!(OwnerId::from_uuid(id.into_inner()), id);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id = PlacementId::new();
        let parsed = PlacementId::from_str(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!(RateTypeId::from_str("not-a-uuid").is_err());
    }
}
