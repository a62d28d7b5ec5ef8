use budget_repo::user_repo::{User, UserIdentity, UserRepo};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub identity: UserIdentity,
    repo: Arc<dyn UserRepo>,
}

#[allow(dead_code)]
impl TestUser {
    /// An identity that has no stored user yet.
    pub fn unregistered(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let auth0id = "auth0|test-user-".to_owned() + &Uuid::new_v4().to_string();
        TestUser {
            identity: UserIdentity::new(auth0id, "Test User"),
            repo: user_repo.clone(),
        }
    }

    pub async fn new(user_repo: &Arc<dyn UserRepo>) -> TestUser {
        let test_user = Self::unregistered(user_repo);
        let user: User = user_repo
            .find_or_create_user(&test_user.identity)
            .await
            .unwrap();
        info!(auth0id = %user.auth0id, user_id = user.id, "Created user");
        test_user
    }

    pub fn auth0id(&self) -> &str {
        &self.identity.auth0id
    }

    pub async fn delete(&self) {
        self.repo.delete_user(&self.identity.auth0id).await.unwrap()
    }
}
