//! Typed record identifiers.
//!
//! Every table is keyed by a random UUID. Wrapping it per entity keeps a
//! `ProductId` from being passed where an `OrderId` is expected.

/// Declares a UUID-backed identifier for one entity.
///
/// ```
/// use retrogo_store::define_id;
///
/// define_id!(WidgetId);
///
/// let id = WidgetId::new();
/// assert_eq!(WidgetId::from(id.as_uuid()), id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Returns the underlying UUID.
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(PromotionId);
define_id!(CollectionId);
define_id!(ProductId);
define_id!(CustomerId);
define_id!(AddressId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(CartId);
define_id!(CartItemId);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(ProductId::new(), ProductId::new());
    }

    #[test]
    fn id_round_trips_through_uuid() {
        let raw = Uuid::new_v4();
        let id = CustomerId::from(raw);
        assert_eq!(id.as_uuid(), raw);
        assert_eq!(Uuid::from(id), raw);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
