use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use models::favorite::{Favorite, FavoritePatch};

use crate::errors::ServiceError;

/// Persistence seam for favorites. Each method is a single store call.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All records in store order.
    async fn list(&self) -> Result<Vec<Favorite>, ServiceError>;
    async fn insert(&self, favorite: Favorite) -> Result<Favorite, ServiceError>;
    /// Apply `patch` to the record atomically and return it as stored
    /// afterwards; `None` if no record has `id`.
    async fn update(
        &self,
        id: ObjectId,
        patch: FavoritePatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Favorite>, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: ObjectId) -> Result<bool, ServiceError>;
}
