//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::{MenuItem, MenuItemUpdate};
use crate::db::store::MENU_ITEMS;

const FIELDS: &str = "record::id(id) AS id, name, category, price, isVeg, description, available";

#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(MENU_ITEMS).await
    }

    /// List menu items, optionally narrowed by category and veg flag
    pub async fn find_all(
        &self,
        category: Option<String>,
        is_veg: Option<bool>,
    ) -> RepoResult<Vec<MenuItem>> {
        self.ensure().await?;

        let mut sql = format!("SELECT {FIELDS} FROM menu_items");
        let mut clauses = Vec::new();
        if category.is_some() {
            clauses.push("category = $category");
        }
        if is_veg.is_some() {
            clauses.push("isVeg = $isVeg");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY category ASC, name ASC");

        let mut query = self.base.db().query(sql);
        if let Some(category) = category {
            query = query.bind(("category", category));
        }
        if let Some(is_veg) = is_veg {
            query = query.bind(("isVeg", is_veg));
        }

        let mut res = query.await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM type::thing('menu_items', $id)"))
            .bind(("id", id.to_string()))
            .await?;
        let items: Vec<MenuItem> = res.take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        self.ensure().await?;
        if self.find_by_id(&item.id).await?.is_some() {
            return Err(RepoError::Duplicate(format!("menu item {}", item.id)));
        }

        let id = item.id.clone();
        self.base
            .db()
            .query("INSERT INTO menu_items $data")
            .bind(("data", item))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("menu item {id}")));
        }

        self.base
            .db()
            .query("UPDATE type::thing('menu_items', $id) MERGE $data")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("menu item {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('menu_items', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}
