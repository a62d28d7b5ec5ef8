use crate::list::ItemList;
use budget_repo::place_repo::{NewPlace, Place, PlaceRepo, PlaceRepoError};
use std::sync::Arc;
use tracing::debug;

pub type PlaceList = ItemList<Place>;

/// Place operations over an injected [PlaceRepo].
#[derive(Clone)]
pub struct PlaceService {
    place_repo: Arc<dyn PlaceRepo>,
}

impl PlaceService {
    pub fn new(place_repo: Arc<dyn PlaceRepo>) -> PlaceService {
        PlaceService { place_repo }
    }

    pub async fn get_all(&self) -> Result<PlaceList, PlaceRepoError> {
        let places = self.place_repo.get_all_places().await?;
        debug!(count = places.len(), "Fetched all places");
        Ok(places.into())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Place>, PlaceRepoError> {
        let place = self.place_repo.get_place(id).await?;
        match &place {
            Some(place) => debug!(id, name = %place.name, rating = place.rating, "Fetched place"),
            None => debug!(id, "Place not found"),
        }
        Ok(place)
    }

    pub async fn create(&self, new_place: NewPlace) -> Result<Place, PlaceRepoError> {
        let place = self.place_repo.create_place(new_place).await?;
        debug!(
            id = place.id,
            name = %place.name,
            rating = place.rating,
            "Created place"
        );
        Ok(place)
    }

    pub async fn update_by_id(
        &self,
        id: i32,
        updated_place: NewPlace,
    ) -> Result<Option<Place>, PlaceRepoError> {
        let place = self.place_repo.update_place(id, updated_place).await?;
        match &place {
            Some(place) => debug!(id, name = %place.name, rating = place.rating, "Updated place"),
            None => debug!(id, "No place to update"),
        }
        Ok(place)
    }

    /// Returns whether a place was removed.
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, PlaceRepoError> {
        let deleted = self.place_repo.delete_place(id).await?;
        if deleted {
            debug!(id, "Deleted place");
        } else {
            debug!(id, "No place to delete");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::PlaceService;
    use budget_repo::mem_repo::create_repos_with_places;
    use budget_repo::place_repo::{NewPlace, Place, PlaceRepoError};
    use budget_repo::transaction_repo::{NewTransaction, TransactionRepo};
    use budget_repo::user_repo::UserIdentity;
    use chrono::{TimeZone, Utc};

    fn seeded_places() -> Vec<Place> {
        vec![
            Place::new(1, "Bakery", 4),
            Place::new(2, "Cinema", 3),
            Place::new(5, "Market", 5),
        ]
    }

    #[actix_rt::test]
    async fn get_all_counts_items() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);

        let list = service.get_all().await.unwrap();
        assert_eq!(list.count, 3);
        assert_eq!(list.items, seeded_places());
    }

    #[actix_rt::test]
    async fn get_all_empty() {
        let repos = create_repos_with_places(Vec::new());
        let service = PlaceService::new(repos.place_repo);

        let list = service.get_all().await.unwrap();
        assert_eq!(list.count, 0);
        assert!(list.items.is_empty());
    }

    #[actix_rt::test]
    async fn get_by_id() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);

        assert_eq!(
            service.get_by_id(2).await.unwrap(),
            Some(Place::new(2, "Cinema", 3))
        );
        assert_eq!(service.get_by_id(3).await.unwrap(), None);
    }

    #[actix_rt::test]
    async fn create_uses_next_id() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);

        let place = service.create(NewPlace::new("Gym", 2)).await.unwrap();
        assert_eq!(place, Place::new(6, "Gym", 2));
        assert_eq!(service.get_all().await.unwrap().count, 4);
    }

    #[actix_rt::test]
    async fn create_in_empty_store() {
        let repos = create_repos_with_places(Vec::new());
        let service = PlaceService::new(repos.place_repo);

        let place = service.create(NewPlace::new("Gym", 2)).await.unwrap();
        assert_eq!(place.id, 1);
    }

    #[actix_rt::test]
    async fn update_by_id() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);

        let updated = service
            .update_by_id(1, NewPlace::new("Bakery & Cafe", 5))
            .await
            .unwrap();
        assert_eq!(updated, Some(Place::new(1, "Bakery & Cafe", 5)));
        assert_eq!(service.get_by_id(1).await.unwrap(), updated);

        let missing = service
            .update_by_id(42, NewPlace::new("Nowhere", 1))
            .await
            .unwrap();
        assert_eq!(missing, None);
        assert_eq!(service.get_all().await.unwrap().count, 3);
    }

    #[actix_rt::test]
    async fn delete_by_id() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);

        assert!(service.delete_by_id(2).await.unwrap());
        assert_eq!(service.get_by_id(2).await.unwrap(), None);
        assert_eq!(service.get_all().await.unwrap().count, 2);

        // missing ids are ignored
        assert!(!service.delete_by_id(2).await.unwrap());
        assert_eq!(service.get_all().await.unwrap().count, 2);
    }

    #[actix_rt::test]
    async fn delete_place_in_use() {
        let repos = create_repos_with_places(seeded_places());
        let service = PlaceService::new(repos.place_repo);
        repos
            .transaction_repo
            .create_new_transaction(
                &UserIdentity::new("auth0|alice", "Alice"),
                NewTransaction::new(-500, Utc.with_ymd_and_hms(2021, 5, 27, 13, 0, 0).unwrap(), 5),
            )
            .await
            .unwrap();

        let result = service.delete_by_id(5).await;
        assert!(matches!(result, Err(PlaceRepoError::PlaceInUse(5))));
        assert!(service.get_by_id(5).await.unwrap().is_some());
    }
}
