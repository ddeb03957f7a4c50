use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

/// A costume listed for rent by one user
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::costumes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Costume {
    pub id: Uuid,
    /// The listing user; fixed at creation
    pub user_id: Uuid,
    pub costume_name: String,
    pub category: String,
    /// Two decimal places, never negative
    pub rental_fee: BigDecimal,
    pub size: String,
    pub image_url: String,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::costumes)]
pub struct NewCostume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub costume_name: String,
    pub category: String,
    pub rental_fee: BigDecimal,
    pub size: String,
    pub image_url: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl From<NewCostume> for Costume {
    fn from(new: NewCostume) -> Self {
        Self {
            id: new.id,
            user_id: new.user_id,
            costume_name: new.costume_name,
            category: new.category,
            rental_fee: new.rental_fee,
            size: new.size,
            image_url: new.image_url,
            description: new.description,
            created_at: new.created_at,
        }
    }
}
