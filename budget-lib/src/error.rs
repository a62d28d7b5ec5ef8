use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use budget_repo::place_repo::PlaceRepoError;
use budget_repo::transaction_repo::TransactionRepoError;
use budget_repo::user_repo::UserRepoError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    TransactionRepo(#[from] TransactionRepoError),
    #[error(transparent)]
    PlaceRepo(#[from] PlaceRepoError),
    #[error(transparent)]
    UserRepo(#[from] UserRepoError),
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::NotFound(_)
            | HandlerError::TransactionRepo(TransactionRepoError::TransactionNotFound(_))
            | HandlerError::UserRepo(UserRepoError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            HandlerError::TransactionRepo(TransactionRepoError::PlaceNotFound(_)) => {
                StatusCode::BAD_REQUEST
            }
            HandlerError::PlaceRepo(PlaceRepoError::PlaceInUse(_)) => StatusCode::CONFLICT,
            HandlerError::TransactionRepo(TransactionRepoError::Other(_))
            | HandlerError::PlaceRepo(PlaceRepoError::Other(_))
            | HandlerError::UserRepo(UserRepoError::Other(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            error!(error = format!("{:#}", self), "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(serde_json::json!({ "error": message }))
    }
}
