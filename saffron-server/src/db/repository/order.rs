//! Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::{Order, OrderUpdate};
use crate::db::store::ORDERS;

const FIELDS: &str = "record::id(id) AS id, userId, items, total, status, date, createdAt";

#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(ORDERS).await
    }

    /// List orders, newest day first, optionally narrowed by user or day
    pub async fn find_all(
        &self,
        user_id: Option<String>,
        date: Option<String>,
    ) -> RepoResult<Vec<Order>> {
        self.ensure().await?;

        let mut sql = format!("SELECT {FIELDS} FROM orders");
        let mut clauses = Vec::new();
        if user_id.is_some() {
            clauses.push("userId = $userId");
        }
        if date.is_some() {
            clauses.push("date = $date");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC, createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(user_id) = user_id {
            query = query.bind(("userId", user_id));
        }
        if let Some(date) = date {
            query = query.bind(("date", date));
        }

        let mut res = query.await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM type::thing('orders', $id)"))
            .bind(("id", id.to_string()))
            .await?;
        let orders: Vec<Order> = res.take(0)?;
        Ok(orders.into_iter().next())
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.ensure().await?;
        if self.find_by_id(&order.id).await?.is_some() {
            return Err(RepoError::Duplicate(format!("order {}", order.id)));
        }

        let id = order.id.clone();
        self.base
            .db()
            .query("INSERT INTO orders $data")
            .bind(("data", order))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("order {id}")));
        }

        self.base
            .db()
            .query("UPDATE type::thing('orders', $id) MERGE $data")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("order {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('orders', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}
