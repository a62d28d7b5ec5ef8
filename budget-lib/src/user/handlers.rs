use crate::error::HandlerError;
use crate::user::UserIdentity;
use actix_web::{web, HttpResponse, Responder};
use budget_repo::user_repo::UserRepo;
use std::sync::Arc;

/// The caller's user record, registered on first use.
#[get("/me")]
pub async fn get_current_user(
    user_repo: web::Data<Arc<dyn UserRepo>>,
    identity: web::ReqData<UserIdentity>,
) -> Result<impl Responder, HandlerError> {
    let user = user_repo.find_or_create_user(&identity).await?;
    Ok(HttpResponse::Ok().json(user.summary()))
}
