use actix_web::{web, Scope};

mod handlers;
mod service;

pub use service::{PlaceList, PlaceService};

pub fn place_service() -> Scope {
    web::scope("/places")
        .service(handlers::get_all_places)
        .service(handlers::get_place)
        .service(handlers::create_place)
        .service(handlers::update_place)
        .service(handlers::delete_place)
}
