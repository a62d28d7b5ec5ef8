use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage for places. Lookups and updates on missing ids return `None` instead of failing,
/// and deleting a missing place is a no-op.
#[async_trait]
pub trait PlaceRepo: Sync + Send {
    async fn get_all_places(&self) -> Result<Vec<Place>, PlaceRepoError>;

    async fn get_place(&self, place_id: i32) -> Result<Option<Place>, PlaceRepoError>;

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, PlaceRepoError>;

    async fn update_place(
        &self,
        place_id: i32,
        updated_place: NewPlace,
    ) -> Result<Option<Place>, PlaceRepoError>;

    /// Returns whether a place was removed. Missing ids are not an error.
    async fn delete_place(&self, place_id: i32) -> Result<bool, PlaceRepoError>;
}

#[derive(Error, Debug)]
pub enum PlaceRepoError {
    #[error("Place with id {0} is still referenced by transactions")]
    PlaceInUse(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Place {
    pub id: i32,
    pub name: String,
    pub rating: i32,
}

impl Place {
    pub fn new(id: i32, name: impl Into<String>, rating: i32) -> Place {
        Place {
            id,
            name: name.into(),
            rating,
        }
    }

    pub fn summary(&self) -> PlaceSummary {
        PlaceSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// The part of a [Place] embedded in transactions.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct PlaceSummary {
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct NewPlace {
    pub name: String,
    pub rating: i32,
}

impl NewPlace {
    pub fn new(name: impl Into<String>, rating: i32) -> NewPlace {
        NewPlace {
            name: name.into(),
            rating,
        }
    }

    pub fn into_place(self, id: i32) -> Place {
        Place {
            id,
            name: self.name,
            rating: self.rating,
        }
    }
}
