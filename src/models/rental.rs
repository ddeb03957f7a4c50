//! Rental records created when a cart is checked out.

use bigdecimal::BigDecimal;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use jiff::SignedDuration;
use jiff_diesel::{Timestamp, ToDiesel};
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

use crate::models::Costume;

/// Lifecycle of a rental.
///
/// `Pending` only appears on checkout previews and is never stored.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Active,
    Returned,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Active => "active",
            RentalStatus::Returned => "returned",
        }
    }
}

impl diesel::query_builder::QueryId for RentalStatus {
    type QueryId = RentalStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for RentalStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for RentalStatus {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "pending" => Ok(RentalStatus::Pending),
            "active" => Ok(RentalStatus::Active),
            "returned" => Ok(RentalStatus::Returned),
            _ => Err(format!("Unrecognized rental status: {}", s).into()),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Rental {
    pub id: Uuid,
    pub user_id: Uuid,
    pub costume_id: Uuid,
    /// Snapshot of the costume name at checkout
    pub costume_name: String,
    /// Snapshot of the costume fee at checkout
    pub rental_fee: BigDecimal,
    pub status: RentalStatus,
    pub rented_at: Timestamp,
    pub due_at: Timestamp,
    pub returned_at: Option<Timestamp>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::rentals)]
pub struct NewRental {
    pub id: Uuid,
    pub user_id: Uuid,
    pub costume_id: Uuid,
    pub costume_name: String,
    pub rental_fee: BigDecimal,
    pub status: RentalStatus,
    pub rented_at: Timestamp,
    pub due_at: Timestamp,
}

impl NewRental {
    /// Build the rental a cart entry turns into. The fee is copied from the
    /// costume as listed; no other pricing applies.
    pub fn from_costume(
        user_id: Uuid,
        costume: &Costume,
        rented_at: jiff::Timestamp,
        period_days: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            costume_id: costume.id,
            costume_name: costume.costume_name.clone(),
            rental_fee: costume.rental_fee.clone(),
            status: RentalStatus::Active,
            rented_at: rented_at.to_diesel(),
            due_at: due_date(rented_at, period_days).to_diesel(),
        }
    }
}

impl From<NewRental> for Rental {
    fn from(new: NewRental) -> Self {
        Self {
            id: new.id,
            user_id: new.user_id,
            costume_id: new.costume_id,
            costume_name: new.costume_name,
            rental_fee: new.rental_fee,
            status: new.status,
            rented_at: new.rented_at,
            due_at: new.due_at,
            returned_at: None,
        }
    }
}

/// `rented_at` plus whole 24 hour days.
pub fn due_date(rented_at: jiff::Timestamp, period_days: u32) -> jiff::Timestamp {
    let period = SignedDuration::from_hours(i64::from(period_days) * 24);
    rented_at
        .checked_add(period)
        .unwrap_or(jiff::Timestamp::MAX)
}
