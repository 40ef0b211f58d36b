use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{FavoriteMovie, UserPreferences};
use crate::services::Catalogue;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Catalogue,
    pub image_base_url: String,
    pub trending_pages: u32,
    pub user: Arc<RwLock<UserState>>,
}

/// Mutable per-deployment user data.
///
/// Preferences and favorites live in process memory; durable multi-user
/// storage is a collaborator this service does not own.
#[derive(Default)]
pub struct UserState {
    pub preferences: UserPreferences,
    pub favorites: HashMap<i64, FavoriteMovie>,
}

impl AppState {
    pub fn new(catalogue: Catalogue, image_base_url: String, trending_pages: u32) -> Self {
        Self {
            catalogue,
            image_base_url,
            trending_pages,
            user: Arc::new(RwLock::new(UserState::default())),
        }
    }
}
