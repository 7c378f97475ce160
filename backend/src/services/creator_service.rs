use crate::error::{CatalogError, Result};
use crate::models::{Creator, PaginatedCreators};
use crate::services::search_service::Pagination;
use crate::services::store::CatalogStore;
use chrono::Utc;
use log::info;

/// Writes the full creator document; creators are not reconciled.
pub async fn upsert_creator(store: &dyn CatalogStore, mut creator: Creator) -> Result<Creator> {
    creator.creator_id = creator.creator_id.trim().to_string();
    if creator.creator_id.is_empty() {
        return Err(CatalogError::validation("creatorId parameter is required"));
    }
    if creator.last_updated.is_empty() {
        creator.last_updated = Utc::now().to_rfc3339();
    }

    store.put_creator(&creator).await?;
    info!("Stored creator {}", creator.creator_id);
    Ok(creator)
}

pub async fn get_creator(store: &dyn CatalogStore, creator_id: &str) -> Result<Creator> {
    store
        .get_creator(creator_id)
        .await?
        .ok_or_else(|| CatalogError::creator_not_found(creator_id))
}

pub async fn list_creators(
    store: &dyn CatalogStore,
    pagination: Pagination,
) -> Result<PaginatedCreators> {
    let pagination = pagination.within_window()?;
    let page = store
        .list_creators(pagination.offset(), pagination.size())
        .await?;

    Ok(PaginatedCreators {
        page: pagination.page,
        size: pagination.size,
        total: page.total,
        creators: page.items,
    })
}
