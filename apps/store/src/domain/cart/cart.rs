use chrono::{DateTime, Utc};

use crate::domain::ids::CartId;
use crate::domain::value_objects::timestamp_now;

/// Shopping cart
///
/// Carts are not tied to a customer; deleting one removes its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            id: CartId::new(),
            created_at: timestamp_now(),
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn from_persistence(id: CartId, created_at: DateTime<Utc>) -> Self {
        Self { id, created_at }
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
