use diesel::prelude::*;
use jiff_diesel::{Timestamp, ToDiesel};
use uuid::Uuid;

/// One costume sitting in one user's cart.
///
/// `(user_id, costume_id)` is unique.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::cart_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub costume_id: Uuid,
    pub added_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::cart_entries)]
pub struct NewCartEntry {
    pub user_id: Uuid,
    pub costume_id: Uuid,
    pub added_at: Timestamp,
}

impl NewCartEntry {
    pub fn new(user_id: Uuid, costume_id: Uuid) -> Self {
        Self {
            user_id,
            costume_id,
            added_at: jiff::Timestamp::now().to_diesel(),
        }
    }
}
