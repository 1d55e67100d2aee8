//! Reservation Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::{Reservation, ReservationUpdate};
use crate::db::store::RESERVATIONS;

const FIELDS: &str = "record::id(id) AS reservationId, userId, name, guests, date, timeSlot, \
                      tableNumber, status, createdAt";

#[derive(Debug, Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(RESERVATIONS).await
    }

    /// List reservations in service order (date, then slot)
    pub async fn find_all(
        &self,
        user_id: Option<String>,
        date: Option<String>,
        time_slot: Option<String>,
    ) -> RepoResult<Vec<Reservation>> {
        self.ensure().await?;

        let mut sql = format!("SELECT {FIELDS} FROM reservations");
        let mut clauses = Vec::new();
        if user_id.is_some() {
            clauses.push("userId = $userId");
        }
        if date.is_some() {
            clauses.push("date = $date");
        }
        if time_slot.is_some() {
            clauses.push("timeSlot = $timeSlot");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date ASC, timeSlot ASC");

        let mut query = self.base.db().query(sql);
        if let Some(user_id) = user_id {
            query = query.bind(("userId", user_id));
        }
        if let Some(date) = date {
            query = query.bind(("date", date));
        }
        if let Some(time_slot) = time_slot {
            query = query.bind(("timeSlot", time_slot));
        }

        let mut res = query.await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!(
                "SELECT {FIELDS} FROM type::thing('reservations', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?;
        let reservations: Vec<Reservation> = res.take(0)?;
        Ok(reservations.into_iter().next())
    }

    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        self.ensure().await?;
        if self.find_by_id(&reservation.reservation_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "reservation {}",
                reservation.reservation_id
            )));
        }

        let id = reservation.reservation_id.clone();
        // reservationId doubles as the record key
        self.base
            .db()
            .query("INSERT INTO reservations $data")
            .bind(("data", StoredReservation::from(reservation)))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
    }

    pub async fn update(&self, id: &str, data: ReservationUpdate) -> RepoResult<Reservation> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("reservation {id}")));
        }

        self.base
            .db()
            .query("UPDATE type::thing('reservations', $id) MERGE $data")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("reservation {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('reservations', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}

/// Storage shape for reservations
///
/// The wire calls the key `reservationId`, but INSERT only treats a
/// field literally named `id` as the record key.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredReservation {
    id: String,
    user_id: String,
    name: String,
    guests: i64,
    date: String,
    time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_number: Option<i64>,
    status: String,
    created_at: String,
}

impl From<Reservation> for StoredReservation {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.reservation_id,
            user_id: r.user_id,
            name: r.name,
            guests: r.guests,
            date: r.date,
            time_slot: r.time_slot,
            table_number: r.table_number,
            status: r.status,
            created_at: r.created_at,
        }
    }
}
