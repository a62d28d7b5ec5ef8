use crate::user::UserIdentity;
use actix_web::dev::ServiceRequest;
use actix_web::{Error, HttpMessage};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web_httpauth::extractors::{bearer, AuthenticationError};
use actix_web_httpauth::headers::www_authenticate::bearer::Bearer;
use jwt::JWTAuth;
use tracing::warn;
use tracing_actix_web::RootSpan;

pub mod jwt;

/// Validates credentials using [JWTAuth]. If valid, injects the [UserIdentity] into the request
/// and records its subject in the [RootSpan]
pub async fn credentials_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let validated = req
        .app_data::<JWTAuth>()
        .map(|jwt_auth| jwt_auth.validate_token(credentials.token()));

    match validated {
        Some(Ok(identity)) => {
            if let Some(root_span) = req.extensions().get::<RootSpan>() {
                root_span.record("user_id", &identity.auth0id.as_str());
            }
            req.extensions_mut().insert::<UserIdentity>(identity);
            Ok(req)
        }
        Some(Err(err)) => {
            warn!(%err, "Rejected bearer token");
            let challenge = Bearer::build().error(bearer::Error::InvalidToken).finish();
            Err((AuthenticationError::new(challenge).into(), req))
        }
        None => {
            warn!("No JWTAuth registered as app data");
            let challenge = Bearer::build().error(bearer::Error::InvalidToken).finish();
            Err((AuthenticationError::new(challenge).into(), req))
        }
    }
}
