use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use models::favorite::{Favorite, FavoritePatch};
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::favorite::repository::FavoriteRepository;

/// Process-local repository keeping records in insertion order.
/// Backs the test suites and local runs without a database.
#[derive(Default)]
pub struct InMemoryFavoriteRepository {
    items: RwLock<Vec<Favorite>>,
}

impl InMemoryFavoriteRepository {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize { self.items.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.items.read().await.is_empty() }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavoriteRepository {
    async fn list(&self) -> Result<Vec<Favorite>, ServiceError> {
        Ok(self.items.read().await.clone())
    }

    async fn insert(&self, favorite: Favorite) -> Result<Favorite, ServiceError> {
        let mut items = self.items.write().await;
        if items.iter().any(|f| f.id == favorite.id) {
            return Err(ServiceError::Db(format!("duplicate key _id {}", favorite.id)));
        }
        items.push(favorite.clone());
        Ok(favorite)
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: FavoritePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Favorite>, ServiceError> {
        // lookup and write under one lock
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|f| f.id == id).map(|f| {
            f.apply(patch, now);
            f.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|f| f.id != id);
        Ok(items.len() < before)
    }
}
