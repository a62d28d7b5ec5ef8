#![allow(dead_code)]

use budget_lib::user::UserIdentity;
use budget_repo::place_repo::Place;
use budget_repo::Repos;
use rstest::*;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

pub mod mock;

macro_rules! build_app {
    ($repos:ident, $identity:expr) => {{
        let place_service = budget_lib::place::PlaceService::new($repos.place_repo.clone());
        let app = App::new()
            .app_data(Data::new($repos.transaction_repo.clone()))
            .app_data(Data::new($repos.user_repo.clone()))
            .app_data(Data::new(place_service))
            .app_data(budget_lib::json_config())
            .wrap(budget_lib::tracing::create_middleware())
            .service(
                actix_web::web::scope("/api")
                    .service(budget_lib::transaction::transaction_service())
                    .service(budget_lib::place::place_service())
                    .service(budget_lib::user::user_service())
                    .wrap(MockAuthentication {
                        identity: $identity,
                    }),
            );
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_transaction {
    (&$service:ident, $new_transaction:expr) => {{
        let request = TestRequest::post()
            .uri("/api/transactions")
            .set_json(&$new_transaction)
            .to_request();
        let response = test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating transaction",
            response.status()
        );
        test::read_body_json(response).await
    }};
}

pub const TEST_PLACE_ID: i32 = 10;
pub const TEST_PLACE_NAME: &str = "Test place";

/// A fresh identity that has no user record yet.
pub fn new_identity() -> UserIdentity {
    let auth0id = "auth0|test-user-".to_owned() + &Uuid::new_v4().to_string();
    UserIdentity::new(auth0id, "Test User")
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> Repos {
    budget_repo::mem_repo::create_repos_with_places(vec![Place::new(
        TEST_PLACE_ID,
        TEST_PLACE_NAME,
        3,
    )])
}

#[fixture]
pub fn identity() -> UserIdentity {
    new_identity()
}
