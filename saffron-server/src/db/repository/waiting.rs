//! Reservation Waiting List Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::WaitingEntry;
use crate::db::store::WAITING_QUEUE;

const FIELDS: &str =
    "record::id(id) AS queueId, userId, name, guests, date, timeSlot, createdAt";

#[derive(Debug, Clone)]
pub struct WaitingRepository {
    base: BaseRepository,
}

impl WaitingRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(WAITING_QUEUE).await
    }

    /// List waiting entries in join order, optionally narrowed to a slot
    pub async fn find_all(
        &self,
        date: Option<String>,
        time_slot: Option<String>,
    ) -> RepoResult<Vec<WaitingEntry>> {
        self.ensure().await?;

        let mut sql = format!("SELECT {FIELDS} FROM reservation_waiting_queue");
        let mut clauses = Vec::new();
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
        sql.push_str(" ORDER BY createdAt ASC");

        let mut query = self.base.db().query(sql);
        if let Some(date) = date {
            query = query.bind(("date", date));
        }
        if let Some(time_slot) = time_slot {
            query = query.bind(("timeSlot", time_slot));
        }

        let mut res = query.await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<WaitingEntry>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!(
                "SELECT {FIELDS} FROM type::thing('reservation_waiting_queue', $id)"
            ))
            .bind(("id", id.to_string()))
            .await?;
        let entries: Vec<WaitingEntry> = res.take(0)?;
        Ok(entries.into_iter().next())
    }

    pub async fn create(&self, entry: WaitingEntry) -> RepoResult<WaitingEntry> {
        self.ensure().await?;
        if self.find_by_id(&entry.queue_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "waiting entry {}",
                entry.queue_id
            )));
        }

        let id = entry.queue_id.clone();
        // queueId doubles as the record key
        self.base
            .db()
            .query("INSERT INTO reservation_waiting_queue $data")
            .bind(("data", StoredWaitingEntry::from(entry)))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create waiting entry".into()))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('reservation_waiting_queue', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}

/// Storage shape for waiting entries
///
/// Same key handling as reservations: INSERT expects the record key in
/// a field literally named `id`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredWaitingEntry {
    id: String,
    user_id: String,
    name: String,
    guests: i64,
    date: String,
    time_slot: String,
    created_at: String,
}

impl From<WaitingEntry> for StoredWaitingEntry {
    fn from(e: WaitingEntry) -> Self {
        Self {
            id: e.queue_id,
            user_id: e.user_id,
            name: e.name,
            guests: e.guests,
            date: e.date,
            time_slot: e.time_slot,
            created_at: e.created_at,
        }
    }
}
