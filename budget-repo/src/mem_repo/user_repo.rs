use super::MemRepo;
use crate::user_repo::UserRepoError::UserNotFound;
use crate::user_repo::{User, UserIdentity, UserRepo, UserRepoError};
use async_trait::async_trait;

#[async_trait]
impl UserRepo for MemRepo {
    async fn get_user(&self, auth0id: &str) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .user_by_auth0id(auth0id)
            .cloned()
            .ok_or_else(|| UserNotFound(auth0id.to_owned()))
    }

    async fn find_or_create_user(&self, identity: &UserIdentity) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;
        Ok(write_guard.find_or_create_user(identity))
    }

    async fn delete_user(&self, auth0id: &str) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;

        let Some(user_id) = write_guard.user_by_auth0id(auth0id).map(|u| u.id) else {
            return Err(UserNotFound(auth0id.to_owned()));
        };
        write_guard.transactions.retain(|_, t| t.user_id != user_id);
        write_guard.users.remove(&user_id);

        Ok(())
    }
}
