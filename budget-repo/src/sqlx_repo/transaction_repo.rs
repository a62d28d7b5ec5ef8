use super::{is_foreign_key_violation, SQLxRepo};
use crate::place_repo::PlaceSummary;
use crate::transaction_repo::TransactionRepoError::{PlaceNotFound, TransactionNotFound};
use crate::transaction_repo::{NewTransaction, Transaction, TransactionRepo, TransactionRepoError};
use crate::user_repo::{UserIdentity, UserSummary};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_scalar, Executor, Postgres, QueryBuilder};
use tracing::instrument;

const SELECT_TRANSACTIONS: &str = "SELECT t.id, t.amount, t.date, \
     p.id AS place_id, p.name AS place_name, u.id AS user_id, u.name AS user_name \
     FROM transactions t \
     JOIN places p ON p.id = t.place_id \
     JOIN users u ON u.id = t.user_id \
     WHERE u.auth0id = ";

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    amount: i64,
    date: DateTime<Utc>,
    place_id: i32,
    place_name: String,
    user_id: i32,
    user_name: String,
}

impl From<TransactionRow> for Transaction {
    fn from(value: TransactionRow) -> Self {
        Transaction::new(
            value.id,
            value.amount,
            value.date,
            PlaceSummary {
                id: value.place_id,
                name: value.place_name,
            },
            UserSummary {
                id: value.user_id,
                name: value.user_name,
            },
        )
    }
}

/// A foreign key violation on a transaction write can only come from its place.
fn write_error(err: sqlx::Error, place_id: i32, action: &str) -> TransactionRepoError {
    if is_foreign_key_violation(&err) {
        PlaceNotFound(place_id)
    } else {
        anyhow::Error::new(err)
            .context(format!("Unable to {} transaction", action))
            .into()
    }
}

impl SQLxRepo {
    #[instrument(skip(db_executor))]
    async fn get_transaction_row<'e, E>(
        db_executor: E,
        user: &str,
        transaction_id: i32,
    ) -> Result<Option<TransactionRow>, TransactionRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query_builder = QueryBuilder::<Postgres>::new(SELECT_TRANSACTIONS);
        query_builder
            .push_bind(user)
            .push(" AND t.id = ")
            .push_bind(transaction_id);
        let row = query_builder
            .build_query_as::<TransactionRow>()
            .fetch_optional(db_executor)
            .await
            .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        Ok(row)
    }

    #[instrument(skip(db_executor))]
    async fn insert_transaction_entry<'e, E>(
        db_executor: E,
        user_id: i32,
        new_transaction: &NewTransaction,
    ) -> Result<i32, TransactionRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        query_scalar::<_, i32>(
            "INSERT INTO transactions(user_id, place_id, amount, date) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(user_id)
        .bind(new_transaction.place_id)
        .bind(new_transaction.amount)
        .bind(new_transaction.date)
        .fetch_one(db_executor)
        .await
        .map_err(|e| write_error(e, new_transaction.place_id, "insert"))
    }

    #[instrument(skip(db_executor))]
    async fn update_transaction_entry<'e, E>(
        db_executor: E,
        user: &str,
        transaction_id: i32,
        updated_transaction: &NewTransaction,
    ) -> Result<(), TransactionRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = query(
            "UPDATE transactions SET amount = $1, date = $2, place_id = $3 FROM users \
             WHERE users.id = transactions.user_id AND users.auth0id = $4 AND transactions.id = $5",
        )
        .bind(updated_transaction.amount)
        .bind(updated_transaction.date)
        .bind(updated_transaction.place_id)
        .bind(user)
        .bind(transaction_id)
        .execute(db_executor)
        .await
        .map_err(|e| write_error(e, updated_transaction.place_id, "update"))?;
        if result.rows_affected() == 0 {
            Err(TransactionNotFound(transaction_id))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TransactionRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        Self::get_transaction_row(&self.pool, user, transaction_id)
            .await?
            .ok_or(TransactionNotFound(transaction_id))
            .map(|row| row.into())
    }

    #[instrument(skip(self))]
    async fn get_all_transactions(
        &self,
        user: &str,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let mut query_builder = QueryBuilder::<Postgres>::new(SELECT_TRANSACTIONS);
        query_builder
            .push_bind(user)
            .push(" ORDER BY t.date DESC, t.id DESC");
        let transactions = query_builder
            .build_query_as::<TransactionRow>()
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Unable to get transactions for user {}", user))?
            .into_iter()
            .map(|row| row.into())
            .collect();
        Ok(transactions)
    }

    #[instrument(skip(self))]
    async fn create_new_transaction(
        &self,
        user: &UserIdentity,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to begin transaction")?;

        let stored_user = Self::upsert_user(&mut *tx, user).await?;
        let id = Self::insert_transaction_entry(&mut *tx, stored_user.id, &new_transaction).await?;
        let row = Self::get_transaction_row(&mut *tx, &user.auth0id, id)
            .await?
            .ok_or(TransactionNotFound(id))?;

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to begin transaction")?;

        Self::update_transaction_entry(&mut *tx, user, transaction_id, &updated_transaction)
            .await?;
        let row = Self::get_transaction_row(&mut *tx, user, transaction_id)
            .await?
            .ok_or(TransactionNotFound(transaction_id))?;

        tx.commit().await.context("Unable to commit transaction")?;
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<(), TransactionRepoError> {
        let result = query(
            "DELETE FROM transactions USING users \
             WHERE users.id = transactions.user_id AND users.auth0id = $1 AND transactions.id = $2",
        )
        .bind(user)
        .bind(transaction_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;
        if result.rows_affected() == 0 {
            Err(TransactionNotFound(transaction_id))
        } else {
            Ok(())
        }
    }
}
