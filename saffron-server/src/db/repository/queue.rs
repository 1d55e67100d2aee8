//! Walk-in Queue Repository
//!
//! Position bookkeeping over SQLite. Entries are grouped by
//! (queue_date, guests, hall, segment); within a group positions run
//! 1..N in join order and the estimated wait is always position * 60
//! minutes.
//!
//! Join and cancel run inside a transaction so two concurrent joins
//! cannot read the same group count and claim the same position.

use sqlx::{SqlitePool, Transaction};

use super::RepoResult;
use crate::db::models::{NewQueueEntry, QueueEntry, QueueEntryPatch};
use crate::utils::time::utc_now_naive;

const COLUMNS: &str = "id, name, guests, notification_method, contact, hall, segment, position, \
                       estimated_wait_minutes, joined_at, queue_date, notified_at_5_min";

/// Minutes of estimated wait per position in the group
const WAIT_MINUTES_PER_POSITION: i64 = 60;

/// List entries, optionally for a single date
///
/// Ordering matches the board in the lobby: newest date first, then
/// hall, segment and position.
pub async fn find_all(pool: &SqlitePool, queue_date: Option<&str>) -> RepoResult<Vec<QueueEntry>> {
    let entries = if let Some(date) = queue_date {
        sqlx::query_as::<_, QueueEntry>(&format!(
            "SELECT {COLUMNS} FROM queue_entry WHERE queue_date = ? \
             ORDER BY queue_date DESC, hall ASC, segment ASC, position ASC"
        ))
        .bind(date)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, QueueEntry>(&format!(
            "SELECT {COLUMNS} FROM queue_entry \
             ORDER BY queue_date DESC, hall ASC, segment ASC, position ASC"
        ))
        .fetch_all(pool)
        .await?
    };
    Ok(entries)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<QueueEntry>> {
    let entry =
        sqlx::query_as::<_, QueueEntry>(&format!("SELECT {COLUMNS} FROM queue_entry WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(entry)
}

/// Join the queue
///
/// The position is one past the current group size. Rejoining with an
/// existing id replaces the old row outright, so a party that rejoins
/// its own group is counted once more and lands one position further
/// back until the group resequences.
pub async fn join(pool: &SqlitePool, data: NewQueueEntry) -> RepoResult<QueueEntry> {
    let mut tx = pool.begin().await?;

    let count: i64 = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM queue_entry \
         WHERE queue_date = ? AND guests = ? AND hall = ? AND segment = ?",
    )
    .bind(&data.queue_date)
    .bind(data.guests)
    .bind(&data.hall)
    .bind(&data.segment)
    .fetch_one(&mut *tx)
    .await?;

    let position = count + 1;
    let estimated_wait_minutes = (position * WAIT_MINUTES_PER_POSITION) as f64;
    let joined_at = utc_now_naive();

    sqlx::query(
        "INSERT OR REPLACE INTO queue_entry \
         (id, name, guests, notification_method, contact, hall, segment, position, \
          estimated_wait_minutes, joined_at, queue_date, notified_at_5_min) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.id)
    .bind(&data.name)
    .bind(data.guests)
    .bind(&data.notification_method)
    .bind(&data.contact)
    .bind(&data.hall)
    .bind(&data.segment)
    .bind(position)
    .bind(estimated_wait_minutes)
    .bind(joined_at)
    .bind(&data.queue_date)
    .bind(data.notified_at_5_min)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(QueueEntry {
        id: data.id,
        name: data.name,
        guests: data.guests,
        notification_method: data.notification_method,
        contact: data.contact,
        hall: data.hall,
        segment: data.segment,
        position,
        estimated_wait_minutes,
        joined_at,
        queue_date: data.queue_date,
        notified_at_5_min: data.notified_at_5_min,
    })
}

/// Cancel an entry and close the gap it leaves
///
/// Returns false when the id is unknown. The remaining entries of the
/// group are renumbered 1..N in join order with their waits recomputed.
pub async fn cancel(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    let entry =
        sqlx::query_as::<_, QueueEntry>(&format!("SELECT {COLUMNS} FROM queue_entry WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(entry) = entry else {
        return Ok(false);
    };

    sqlx::query("DELETE FROM queue_entry WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    resequence(&mut tx, &entry.queue_date, entry.guests, &entry.hall, &entry.segment).await?;

    tx.commit().await?;
    Ok(true)
}

/// Patch notification state or wait estimate
///
/// Returns None when the id is unknown. COALESCE keeps fields the
/// payload leaves out.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: QueueEntryPatch,
) -> RepoResult<Option<QueueEntry>> {
    let result = sqlx::query(
        "UPDATE queue_entry SET \
         notified_at_5_min = COALESCE(?1, notified_at_5_min), \
         estimated_wait_minutes = COALESCE(?2, estimated_wait_minutes) \
         WHERE id = ?3",
    )
    .bind(data.notified_at_5_min)
    .bind(data.estimated_wait_minutes)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Renumber a group 1..N in join order and recompute waits
async fn resequence(
    tx: &mut Transaction<'_, sqlx::Sqlite>,
    queue_date: &str,
    guests: i64,
    hall: &str,
    segment: &str,
) -> RepoResult<()> {
    let ids: Vec<String> = sqlx::query_scalar::<_, String>(
        "SELECT id FROM queue_entry \
         WHERE queue_date = ? AND guests = ? AND hall = ? AND segment = ? \
         ORDER BY joined_at ASC, position ASC",
    )
    .bind(queue_date)
    .bind(guests)
    .bind(hall)
    .bind(segment)
    .fetch_all(&mut **tx)
    .await?;

    for (idx, id) in ids.iter().enumerate() {
        let position = idx as i64 + 1;
        sqlx::query("UPDATE queue_entry SET position = ?, estimated_wait_minutes = ? WHERE id = ?")
            .bind(position)
            .bind((position * WAIT_MINUTES_PER_POSITION) as f64)
            .bind(id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
