use crate::place_repo::Place;
use crate::transaction_repo::Transaction;
use crate::user_repo::{User, UserIdentity};
use crate::{HealthCheck, Repos};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod place_repo;
mod transaction_repo;
mod user_repo;

struct TransactionEntry {
    id: i32,
    user_id: i32,
    place_id: i32,
    amount: i64,
    date: DateTime<Utc>,
}

struct State {
    users: HashMap<i32, User>,
    places: BTreeMap<i32, Place>,
    transactions: HashMap<i32, TransactionEntry>,
    next_user_id: i32,
    next_transaction_id: i32,
}

impl State {
    fn user_by_auth0id(&self, auth0id: &str) -> Option<&User> {
        self.users.values().find(|u| u.auth0id == auth0id)
    }

    fn find_or_create_user(&mut self, identity: &UserIdentity) -> User {
        if let Some(user) = self.user_by_auth0id(&identity.auth0id) {
            return user.clone();
        }

        let id = self.next_user_id;
        self.next_user_id += 1;

        let user = User::new(id, identity.name.clone(), identity.auth0id.clone());
        self.users.insert(id, user.clone());
        user
    }

    /// Entry of `transaction_id` if it exists and belongs to the user `auth0id`.
    fn owned_entry(&self, auth0id: &str, transaction_id: i32) -> Option<&TransactionEntry> {
        let user = self.user_by_auth0id(auth0id)?;
        self.transactions
            .get(&transaction_id)
            .filter(|entry| entry.user_id == user.id)
    }

    fn enrich(&self, entry: &TransactionEntry) -> Result<Transaction, anyhow::Error> {
        let place = self
            .places
            .get(&entry.place_id)
            .ok_or_else(|| anyhow!("Transaction {} references a missing place", entry.id))?;
        let user = self
            .users
            .get(&entry.user_id)
            .ok_or_else(|| anyhow!("Transaction {} references a missing user", entry.id))?;
        Ok(Transaction::new(
            entry.id,
            entry.amount,
            entry.date,
            place.summary(),
            user.summary(),
        ))
    }
}

/// A store that keeps every table behind one lock. Nothing survives a restart.
pub struct MemRepo {
    state: RwLock<State>,
}

impl MemRepo {
    pub fn new() -> MemRepo {
        Self::with_places(Vec::new())
    }

    pub fn with_places(places: Vec<Place>) -> MemRepo {
        let state = State {
            users: HashMap::new(),
            places: places.into_iter().map(|p| (p.id, p)).collect(),
            transactions: HashMap::new(),
            next_user_id: 1,
            next_transaction_id: 1,
        };
        MemRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

impl Default for MemRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthCheck for MemRepo {
    async fn check(&self) -> bool {
        self.read_lock().is_ok()
    }
}

pub fn create_repos() -> Repos {
    Repos::from_store(Arc::new(MemRepo::new()))
}

/// Same as [create_repos], seeded with `places`.
pub fn create_repos_with_places(places: Vec<Place>) -> Repos {
    Repos::from_store(Arc::new(MemRepo::with_places(places)))
}
