use super::PlaceService;
use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use budget_repo::place_repo::NewPlace;

#[get("")]
pub async fn get_all_places(
    place_service: web::Data<PlaceService>,
) -> Result<impl Responder, HandlerError> {
    let places = place_service.get_all().await?;
    Ok(HttpResponse::Ok().json(places))
}

#[get("/{place_id}")]
pub async fn get_place(
    place_service: web::Data<PlaceService>,
    place_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let place_id = place_id.into_inner();
    let place = place_service
        .get_by_id(place_id)
        .await?
        .ok_or_else(|| HandlerError::NotFound(format!("Place with id {}", place_id)))?;
    Ok(HttpResponse::Ok().json(place))
}

#[post("")]
pub async fn create_place(
    place_service: web::Data<PlaceService>,
    new_place: web::Json<NewPlace>,
) -> Result<impl Responder, HandlerError> {
    let place = place_service.create(new_place.into_inner()).await?;
    Ok(HttpResponse::Created().json(place))
}

#[put("/{place_id}")]
pub async fn update_place(
    place_service: web::Data<PlaceService>,
    place_id: web::Path<i32>,
    updated_place: web::Json<NewPlace>,
) -> Result<impl Responder, HandlerError> {
    let place_id = place_id.into_inner();
    let place = place_service
        .update_by_id(place_id, updated_place.into_inner())
        .await?
        .ok_or_else(|| HandlerError::NotFound(format!("Place with id {}", place_id)))?;
    Ok(HttpResponse::Ok().json(place))
}

#[delete("/{place_id}")]
pub async fn delete_place(
    place_service: web::Data<PlaceService>,
    place_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    place_service.delete_by_id(place_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
