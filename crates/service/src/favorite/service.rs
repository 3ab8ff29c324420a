use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::Utc;
use models::favorite::{Favorite, FavoriteView, MODEL_NAME};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::favorite::input::FavoriteInput;
use crate::favorite::repository::FavoriteRepository;

pub const REQUIRED_FIELDS_MSG: &str = "title and creator required";

/// Parse a path id; anything that is not a 24-hex ObjectId is malformed.
pub fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::MalformedId)
}

/// Application service for the favorites collection. Holds no state beyond
/// the shared repository handle.
#[derive(Clone)]
pub struct FavoriteService {
    repo: Arc<dyn FavoriteRepository>,
}

impl FavoriteService {
    pub fn new(repo: Arc<dyn FavoriteRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<FavoriteView>, ServiceError> {
        let items = self.repo.list().await?;
        info!(count = items.len(), "list favorites");
        Ok(items.into_iter().map(FavoriteView::from).collect())
    }

    #[instrument(skip(self, input), fields(title = ?input.title))]
    pub async fn create(&self, input: FavoriteInput) -> Result<FavoriteView, ServiceError> {
        if !input.has_required() {
            return Err(ServiceError::Validation(REQUIRED_FIELDS_MSG.into()));
        }
        let fields = input.into_draft().validate()?;
        let created = self.repo.insert(Favorite::new(fields, Utc::now())).await?;
        info!(id = %created.id, "created favorite");
        Ok(created.into())
    }

    /// Sent fields are validated, then written in one store call; fields
    /// missing from `input` keep their stored value.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: FavoriteInput) -> Result<FavoriteView, ServiceError> {
        let oid = parse_id(id)?;
        let patch = input.into_patch().validate()?;
        let updated = self
            .repo
            .update(oid, patch, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::not_found(MODEL_NAME))?;
        info!(id = %updated.id, "updated favorite");
        Ok(updated.into())
    }

    /// Succeeds whether or not the record existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let oid = parse_id(id)?;
        let removed = self.repo.delete(oid).await?;
        info!(id = %oid, removed, "deleted favorite");
        Ok(())
    }
}
