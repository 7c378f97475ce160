pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod testing;

use rocket::{Build, Rocket};
use services::metadata_provider::MetadataProvider;
use services::store::CatalogStore;
use std::sync::Arc;

pub const API_BASE: &str = "/api/youtube";

/// Shared by every request. The store and provider carry their own
/// connection pools; nothing else is mutable.
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub provider: Arc<dyn MetadataProvider>,
    pub max_page_size: i64,
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(API_BASE, api::routes())
        .register("/", api::catchers())
}
