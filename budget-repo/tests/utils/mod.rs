#![allow(dead_code)]

pub mod generator;
pub mod test_user;

use budget_repo::place_repo::{NewPlace, Place, PlaceRepo};
use budget_repo::Repos;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;
use tracing::{info, warn};

const TEST_CONFIG_FILE: &str = "config_test.toml";

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

/// Builds repos of the given type. PostgreSQL repos need `config_test.toml`; without it the
/// case is skipped by returning `None`.
pub async fn build_repos(repo_type: RepoType) -> Option<Repos> {
    match repo_type {
        RepoType::Mem => Some(budget_repo::mem_repo::create_repos()),
        RepoType::SQLx => {
            let Ok(config) = fs::read_to_string(TEST_CONFIG_FILE) else {
                warn!("{} not found, skipping database test", TEST_CONFIG_FILE);
                return None;
            };
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            let repos = budget_repo::sqlx_repo::create_repos(&config.database_url, 1, true)
                .await
                .unwrap();
            Some(repos)
        }
    }
}

pub struct TestPlace {
    pub place: Place,
    repo: Arc<dyn PlaceRepo>,
}

impl TestPlace {
    pub async fn new(place_repo: &Arc<dyn PlaceRepo>, name: &str) -> TestPlace {
        let place = place_repo
            .create_place(NewPlace::new(name, 3))
            .await
            .unwrap();
        info!(place_id = place.id, "Created place");
        TestPlace {
            place,
            repo: place_repo.clone(),
        }
    }

    pub fn id(&self) -> i32 {
        self.place.id
    }

    pub async fn delete(&self) {
        assert!(self.repo.delete_place(self.place.id).await.unwrap());
    }
}
