use super::SQLxRepo;
use crate::user_repo::{User, UserIdentity, UserRepo, UserRepoError};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query, query_as, Executor, Postgres};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct UserEntry {
    id: i32,
    name: String,
    auth0id: String,
}

impl From<UserEntry> for User {
    fn from(value: UserEntry) -> Self {
        User::new(value.id, value.name, value.auth0id)
    }
}

impl SQLxRepo {
    /// Inserts the user unless its `auth0id` is taken; either way returns the stored row. The
    /// no-op update makes `RETURNING` yield the existing row on conflict.
    #[instrument(skip(db_executor))]
    pub(super) async fn upsert_user<'e, E>(
        db_executor: E,
        identity: &UserIdentity,
    ) -> Result<User, anyhow::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = query_as::<_, UserEntry>(
            "INSERT INTO users(name, auth0id) VALUES ($1, $2) \
             ON CONFLICT (auth0id) DO UPDATE SET auth0id = EXCLUDED.auth0id \
             RETURNING id, name, auth0id",
        )
        .bind(&identity.name)
        .bind(&identity.auth0id)
        .fetch_one(db_executor)
        .await
        .with_context(|| format!("Unable to find or create user {}", identity.auth0id))?;
        Ok(user.into())
    }
}

#[async_trait]
impl UserRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_user(&self, auth0id: &str) -> Result<User, UserRepoError> {
        let user = query_as::<_, UserEntry>("SELECT id, name, auth0id FROM users WHERE auth0id = $1")
            .bind(auth0id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get user {}", auth0id))?;
        user.map(|entry| entry.into())
            .ok_or_else(|| UserRepoError::UserNotFound(auth0id.to_owned()))
    }

    #[instrument(skip(self))]
    async fn find_or_create_user(&self, identity: &UserIdentity) -> Result<User, UserRepoError> {
        Ok(Self::upsert_user(&self.pool, identity).await?)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, auth0id: &str) -> Result<(), UserRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to begin transaction")?;

        query(
            "DELETE FROM transactions USING users \
             WHERE users.id = transactions.user_id AND users.auth0id = $1",
        )
        .bind(auth0id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Unable to delete transactions of user {}", auth0id))?;

        let result = query("DELETE FROM users WHERE auth0id = $1")
            .bind(auth0id)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Unable to delete user {}", auth0id))?;
        if result.rows_affected() == 0 {
            return Err(UserRepoError::UserNotFound(auth0id.to_owned()));
        }

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(())
    }
}
