use std::sync::Arc;

use service::favorite::{FavoriteRepository, FavoriteService};

/// Shared handler state: the one store handle, wrapped in the service.
#[derive(Clone)]
pub struct AppState {
    pub favorites: FavoriteService,
}

impl AppState {
    pub fn new(repo: Arc<dyn FavoriteRepository>) -> Self {
        Self { favorites: FavoriteService::new(repo) }
    }
}
