use super::{MemRepo, TransactionEntry};
use crate::transaction_repo::TransactionRepoError::{PlaceNotFound, TransactionNotFound};
use crate::transaction_repo::{
    NewTransaction, Transaction, TransactionRepo, TransactionRepoError,
};
use crate::user_repo::UserIdentity;
use async_trait::async_trait;

#[async_trait]
impl TransactionRepo for MemRepo {
    async fn get_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        let state = &*read_guard;

        let entry = state
            .owned_entry(user, transaction_id)
            .ok_or(TransactionNotFound(transaction_id))?;
        Ok(state.enrich(entry)?)
    }

    async fn get_all_transactions(
        &self,
        user: &str,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let read_guard = self.read_lock()?;
        let state = &*read_guard;

        let Some(user) = state.user_by_auth0id(user) else {
            return Ok(Vec::new());
        };

        let mut transactions = state
            .transactions
            .values()
            .filter(|entry| entry.user_id == user.id)
            .map(|entry| state.enrich(entry))
            .collect::<Result<Vec<Transaction>, anyhow::Error>>()?;
        transactions.sort_by(|a, b| b.cmp(a));

        Ok(transactions)
    }

    async fn create_new_transaction(
        &self,
        user: &UserIdentity,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.places.contains_key(&new_transaction.place_id) {
            return Err(PlaceNotFound(new_transaction.place_id));
        }
        let user = write_guard.find_or_create_user(user);

        let id = write_guard.next_transaction_id;
        write_guard.next_transaction_id += 1;

        let entry = TransactionEntry {
            id,
            user_id: user.id,
            place_id: new_transaction.place_id,
            amount: new_transaction.amount,
            date: new_transaction.date,
        };
        let transaction = write_guard.enrich(&entry)?;
        write_guard.transactions.insert(id, entry);

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        user: &str,
        transaction_id: i32,
        updated_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.owned_entry(user, transaction_id).is_none() {
            return Err(TransactionNotFound(transaction_id));
        }
        if !write_guard
            .places
            .contains_key(&updated_transaction.place_id)
        {
            return Err(PlaceNotFound(updated_transaction.place_id));
        }

        if let Some(entry) = write_guard.transactions.get_mut(&transaction_id) {
            entry.amount = updated_transaction.amount;
            entry.date = updated_transaction.date;
            entry.place_id = updated_transaction.place_id;
        }

        let state = &*write_guard;
        let entry = state
            .transactions
            .get(&transaction_id)
            .ok_or(TransactionNotFound(transaction_id))?;
        Ok(state.enrich(entry)?)
    }

    async fn delete_transaction(
        &self,
        user: &str,
        transaction_id: i32,
    ) -> Result<(), TransactionRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.owned_entry(user, transaction_id).is_none() {
            return Err(TransactionNotFound(transaction_id));
        }
        write_guard.transactions.remove(&transaction_id);

        Ok(())
    }
}
