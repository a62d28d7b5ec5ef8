use super::MemRepo;
use crate::place_repo::{NewPlace, Place, PlaceRepo, PlaceRepoError};
use async_trait::async_trait;

#[async_trait]
impl PlaceRepo for MemRepo {
    async fn get_all_places(&self) -> Result<Vec<Place>, PlaceRepoError> {
        let read_guard = self.read_lock()?;
        Ok(read_guard.places.values().cloned().collect())
    }

    async fn get_place(&self, place_id: i32) -> Result<Option<Place>, PlaceRepoError> {
        let read_guard = self.read_lock()?;
        Ok(read_guard.places.get(&place_id).cloned())
    }

    async fn create_place(&self, new_place: NewPlace) -> Result<Place, PlaceRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard
            .places
            .keys()
            .next_back()
            .map_or(1, |max_id| max_id + 1);
        let place = new_place.into_place(id);
        write_guard.places.insert(id, place.clone());

        Ok(place)
    }

    async fn update_place(
        &self,
        place_id: i32,
        updated_place: NewPlace,
    ) -> Result<Option<Place>, PlaceRepoError> {
        let mut write_guard = self.write_lock()?;

        let Some(place) = write_guard.places.get_mut(&place_id) else {
            return Ok(None);
        };
        place.name = updated_place.name;
        place.rating = updated_place.rating;

        Ok(Some(place.clone()))
    }

    async fn delete_place(&self, place_id: i32) -> Result<bool, PlaceRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard
            .transactions
            .values()
            .any(|t| t.place_id == place_id)
        {
            return Err(PlaceRepoError::PlaceInUse(place_id));
        }
        Ok(write_guard.places.remove(&place_id).is_some())
    }
}
