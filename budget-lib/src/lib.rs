#[macro_use]
extern crate actix_web;

use actix_web::error::JsonPayloadError;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{web, HttpResponse};
use actix_web_httpauth::middleware::HttpAuthentication;
use auth::jwt::JWTAuth;
use budget_repo::Repos;
use place::PlaceService;

pub mod auth;
pub mod config;
pub mod cors;
mod error;
pub mod health;
pub mod list;
pub mod place;
pub mod tracing;
pub mod transaction;
pub mod user;

/// Answers malformed JSON bodies with 400 and the deserializer's message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        ::tracing::error!(req_path = req.path(), %err);
        match err {
            JsonPayloadError::Deserialize(deserialize_err) => {
                let error_body = serde_json::json!({
                    "error": "Unable to parse JSON payload",
                    "detail": format!("{}", deserialize_err),
                });
                actix_web::error::InternalError::from_response(
                    deserialize_err,
                    HttpResponse::BadRequest()
                        .content_type("application/json")
                        .body(error_body.to_string()),
                )
                .into()
            }
            _ => err.into(),
        }
    })
}

/// Registers app data and every route: `/health` and the bearer authenticated `/api` scope.
pub fn app_config_func(jwt_auth: JWTAuth, repos: Repos) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let place_service = PlaceService::new(repos.place_repo);

        cfg.app_data(jwt_auth)
            .app_data(Data::new(repos.transaction_repo))
            .app_data(Data::new(repos.user_repo))
            .app_data(Data::new(place_service))
            .app_data(Data::new(repos.health_check))
            .app_data(json_config())
            .service(health::health)
            .service(
                web::scope("/api")
                    .service(transaction::transaction_service())
                    .service(place::place_service())
                    .service(user::user_service())
                    .wrap(HttpAuthentication::bearer(auth::credentials_validator)),
            );
    }
}
