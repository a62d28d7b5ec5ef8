use crate::place_repo::PlaceSummary;
use crate::user_repo::{UserIdentity, UserSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Storage for transactions. Every call is scoped to the user identified by `user` (the
/// identity provider's subject); transactions of other users behave as if they did not exist.
#[async_trait]
pub trait TransactionRepo: Sync + Send {
    async fn get_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Newest first.
    async fn get_all_transactions(&self, user: &str)
        -> Result<Vec<Transaction>, TransactionRepoError>;

    /// Finds or creates the user for `user` and inserts the transaction, atomically.
    async fn create_new_transaction(
        &self,
        user: &UserIdentity,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<(), TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error("Transaction with id {0} not found")]
    TransactionNotFound(i32),
    #[error("Place with id {0} not found")]
    PlaceNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A transaction with its place and user embedded.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub id: i32,
    /// Signed amount in cents: negative for expenses, positive for income.
    pub amount: i64,
    #[serde(with = "crate::date_format")]
    pub date: DateTime<Utc>,
    pub place: PlaceSummary,
    pub user: UserSummary,
}

impl Transaction {
    pub const fn new(
        id: i32,
        amount: i64,
        date: DateTime<Utc>,
        place: PlaceSummary,
        user: UserSummary,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            date,
            place,
            user,
        }
    }
}

impl PartialOrd for Transaction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Transaction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: i64,
    #[serde(with = "crate::date_format")]
    pub date: DateTime<Utc>,
    pub place_id: i32,
}

impl NewTransaction {
    pub const fn new(amount: i64, date: DateTime<Utc>, place_id: i32) -> NewTransaction {
        NewTransaction {
            amount,
            date,
            place_id,
        }
    }
}
