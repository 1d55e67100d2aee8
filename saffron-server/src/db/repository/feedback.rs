//! Feedback Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::{Feedback, FeedbackUpdate};
use crate::db::store::FEEDBACK;

const FIELDS: &str = "record::id(id) AS id, userId, orderId, rating, comment, createdAt";

#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(FEEDBACK).await
    }

    /// List feedback, newest first, optionally narrowed by user or order
    pub async fn find_all(
        &self,
        user_id: Option<String>,
        order_id: Option<String>,
    ) -> RepoResult<Vec<Feedback>> {
        self.ensure().await?;

        let mut sql = format!("SELECT {FIELDS} FROM feedback");
        let mut clauses = Vec::new();
        if user_id.is_some() {
            clauses.push("userId = $userId");
        }
        if order_id.is_some() {
            clauses.push("orderId = $orderId");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(user_id) = user_id {
            query = query.bind(("userId", user_id));
        }
        if let Some(order_id) = order_id {
            query = query.bind(("orderId", order_id));
        }

        let mut res = query.await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Feedback>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM type::thing('feedback', $id)"))
            .bind(("id", id.to_string()))
            .await?;
        let entries: Vec<Feedback> = res.take(0)?;
        Ok(entries.into_iter().next())
    }

    pub async fn create(&self, feedback: Feedback) -> RepoResult<Feedback> {
        self.ensure().await?;
        if self.find_by_id(&feedback.id).await?.is_some() {
            return Err(RepoError::Duplicate(format!("feedback {}", feedback.id)));
        }

        let id = feedback.id.clone();
        self.base
            .db()
            .query("INSERT INTO feedback $data")
            .bind(("data", feedback))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create feedback".into()))
    }

    pub async fn update(&self, id: &str, data: FeedbackUpdate) -> RepoResult<Feedback> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("feedback {id}")));
        }

        self.base
            .db()
            .query("UPDATE type::thing('feedback', $id) MERGE $data")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("feedback {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('feedback', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}
