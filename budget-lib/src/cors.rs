use crate::config::CorsConfig;
use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Allows the configured origins to call the API with a bearer token.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    config
        .origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
