use actix_web::{web, Scope};

mod handlers;

pub use budget_repo::user_repo::UserIdentity;

pub fn user_service() -> Scope {
    web::scope("/users").service(handlers::get_current_user)
}
