use super::{is_foreign_key_violation, SQLxRepo};
use crate::place_repo::{NewPlace, Place, PlaceRepo, PlaceRepoError};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query, query_as};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct PlaceEntry {
    id: i32,
    name: String,
    rating: i32,
}

impl From<PlaceEntry> for Place {
    fn from(value: PlaceEntry) -> Self {
        Place::new(value.id, value.name, value.rating)
    }
}

#[async_trait]
impl PlaceRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn get_all_places(&self) -> Result<Vec<Place>, PlaceRepoError> {
        let places = query_as::<_, PlaceEntry>("SELECT id, name, rating FROM places ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Unable to get places")?
            .into_iter()
            .map(|entry| entry.into())
            .collect();
        Ok(places)
    }

    #[instrument(skip(self))]
    async fn get_place(&self, place_id: i32) -> Result<Option<Place>, PlaceRepoError> {
        let place = query_as::<_, PlaceEntry>("SELECT id, name, rating FROM places WHERE id = $1")
            .bind(place_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get place {}", place_id))?;
        Ok(place.map(|entry| entry.into()))
    }

    #[instrument(skip(self))]
    async fn create_place(&self, new_place: NewPlace) -> Result<Place, PlaceRepoError> {
        let place = query_as::<_, PlaceEntry>(
            "INSERT INTO places(name, rating) VALUES ($1, $2) RETURNING id, name, rating",
        )
        .bind(&new_place.name)
        .bind(new_place.rating)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert place")?;
        Ok(place.into())
    }

    #[instrument(skip(self))]
    async fn update_place(
        &self,
        place_id: i32,
        updated_place: NewPlace,
    ) -> Result<Option<Place>, PlaceRepoError> {
        let place = query_as::<_, PlaceEntry>(
            "UPDATE places SET name = $1, rating = $2 WHERE id = $3 RETURNING id, name, rating",
        )
        .bind(&updated_place.name)
        .bind(updated_place.rating)
        .bind(place_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update place {}", place_id))?;
        Ok(place.map(|entry| entry.into()))
    }

    #[instrument(skip(self))]
    async fn delete_place(&self, place_id: i32) -> Result<bool, PlaceRepoError> {
        match query("DELETE FROM places WHERE id = $1")
            .bind(place_id)
            .execute(&self.pool)
            .await
        {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(e) if is_foreign_key_violation(&e) => Err(PlaceRepoError::PlaceInUse(place_id)),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to delete place {}", place_id))
                .into()),
        }
    }
}
