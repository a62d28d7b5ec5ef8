use async_trait::async_trait;
use std::sync::Arc;

pub mod date_format;
pub mod place_repo;
pub mod transaction_repo;
pub mod user_repo;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;

use place_repo::PlaceRepo;
use transaction_repo::TransactionRepo;
use user_repo::UserRepo;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> bool;
}

/// Handles to every repository, all backed by the same store.
#[derive(Clone)]
pub struct Repos {
    pub user_repo: Arc<dyn UserRepo>,
    pub place_repo: Arc<dyn PlaceRepo>,
    pub transaction_repo: Arc<dyn TransactionRepo>,
    pub health_check: Arc<dyn HealthCheck>,
}

impl Repos {
    pub(crate) fn from_store<T>(store: Arc<T>) -> Repos
    where
        T: UserRepo + PlaceRepo + TransactionRepo + HealthCheck + 'static,
    {
        Repos {
            user_repo: store.clone(),
            place_repo: store.clone(),
            transaction_repo: store.clone(),
            health_check: store,
        }
    }
}
