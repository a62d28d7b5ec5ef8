use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait UserRepo: Sync + Send {
    /// Lookup without creation. Request handlers go through [UserRepo::find_or_create_user];
    /// this is used by test setup to check stored users.
    async fn get_user(&self, auth0id: &str) -> Result<User, UserRepoError>;

    /// Returns the user registered for `identity.auth0id`, creating it with `identity.name` if
    /// there is none. An existing user keeps its stored name.
    async fn find_or_create_user(&self, identity: &UserIdentity) -> Result<User, UserRepoError>;

    /// Removes the user and its transactions. Only used to clean up after tests.
    async fn delete_user(&self, auth0id: &str) -> Result<(), UserRepoError>;
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub auth0id: String,
}

impl User {
    pub fn new(id: i32, name: String, auth0id: String) -> User {
        User { id, name, auth0id }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// The caller as resolved by the identity provider.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UserIdentity {
    pub auth0id: String,
    pub name: String,
}

impl UserIdentity {
    pub fn new(auth0id: impl Into<String>, name: impl Into<String>) -> UserIdentity {
        UserIdentity {
            auth0id: auth0id.into(),
            name: name.into(),
        }
    }
}

/// The part of a [User] embedded in other responses.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
}
