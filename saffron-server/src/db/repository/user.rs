//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::Store;
use crate::db::models::{User, UserUpdate};
use crate::db::store::USERS;

const FIELDS: &str = "record::id(id) AS id, name, email, phone, createdAt";

#[derive(Debug, Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    async fn ensure(&self) -> RepoResult<()> {
        self.base.ensure_indexes(USERS).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM users ORDER BY createdAt ASC"))
            .await?;
        Ok(res.take(0)?)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!("SELECT {FIELDS} FROM type::thing('users', $id)"))
            .bind(("id", id.to_string()))
            .await?;
        let users: Vec<User> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.ensure().await?;
        let mut res = self
            .base
            .db()
            .query(format!(
                "SELECT {FIELDS} FROM users WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = res.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        self.ensure().await?;
        if self.find_by_id(&user.id).await?.is_some() {
            return Err(RepoError::Duplicate(format!("user {}", user.id)));
        }
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!("email {}", user.email)));
        }

        let id = user.id.clone();
        // the `id` string in the content becomes the record key
        self.base
            .db()
            .query("INSERT INTO users $data")
            .bind(("data", user))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".into()))
    }

    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Err(RepoError::NotFound(format!("user {id}")));
        }
        // email stays unique across users
        if let Some(email) = &data.email
            && let Some(existing) = self.find_by_email(email).await?
            && existing.id != id
        {
            return Err(RepoError::Duplicate(format!("email {email}")));
        }

        self.base
            .db()
            .query("UPDATE type::thing('users', $id) MERGE $data")
            .bind(("id", id.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("user {id}")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.ensure().await?;
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing('users', $id)")
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }
}
