mod place_repo;
mod transaction_repo;
mod user_repo;

use crate::{HealthCheck, Repos};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, Pool, Postgres};
use std::sync::Arc;
use tracing::info;

const FOREIGN_KEY_VIOLATION: &str = "23503";

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

#[async_trait]
impl HealthCheck for SQLxRepo {
    async fn check(&self) -> bool {
        query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
        _ => false,
    }
}

pub async fn create_repos(
    database_url: &str,
    max_pool_size: u32,
    run_migrations: bool,
) -> Result<Repos, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(database_url)
        .await
        .context("Unable to connect to database")?;
    info!("Database pool created");

    if run_migrations {
        info!("Running migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Unable to run migrations")?;
    }

    Ok(Repos::from_store(Arc::new(SQLxRepo::new(pool))))
}
