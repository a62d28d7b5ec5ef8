use crate::error::HandlerError;
use crate::list::ItemList;
use crate::user::UserIdentity;
use actix_web::{web, HttpResponse, Responder};
use budget_repo::transaction_repo::{NewTransaction, TransactionRepo};
use std::sync::Arc;

#[get("")]
pub async fn get_all_transactions(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    identity: web::ReqData<UserIdentity>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo
        .get_all_transactions(&identity.auth0id)
        .await?;
    Ok(HttpResponse::Ok().json(ItemList::from(transactions)))
}

#[get("/{transaction_id}")]
pub async fn get_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    identity: web::ReqData<UserIdentity>,
    transaction_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .get_transaction(&identity.auth0id, transaction_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[post("")]
pub async fn create_new_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    identity: web::ReqData<UserIdentity>,
    new_transaction: web::Json<NewTransaction>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .create_new_transaction(&identity.into_inner(), new_transaction.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(transaction))
}

#[put("/{transaction_id}")]
pub async fn update_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    identity: web::ReqData<UserIdentity>,
    transaction_id: web::Path<i32>,
    updated_transaction: web::Json<NewTransaction>,
) -> Result<impl Responder, HandlerError> {
    let transaction = transaction_repo
        .update_transaction(
            &identity.auth0id,
            transaction_id.into_inner(),
            updated_transaction.into_inner(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[delete("/{transaction_id}")]
pub async fn delete_transaction(
    transaction_repo: web::Data<Arc<dyn TransactionRepo>>,
    identity: web::ReqData<UserIdentity>,
    transaction_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    transaction_repo
        .delete_transaction(&identity.auth0id, transaction_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
