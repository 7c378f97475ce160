use crate::error::{CatalogError, Result};
use crate::models::{UpsertOutcome, UpsertVideoRequest, Video};
use crate::services::metadata_provider::MetadataProvider;
use crate::services::reconciler::reconcile;
use crate::services::store::{CatalogStore, DeleteOutcome};
use log::{debug, info};

/// Fetches the canonical record for `request.video_id` and stores it.
///
/// Performs at most one store write: an insert for an unknown ID, an update
/// when reconciliation finds a difference, nothing otherwise. Any failure
/// aborts before the write.
pub async fn upsert_video(
    store: &dyn CatalogStore,
    provider: &dyn MetadataProvider,
    request: UpsertVideoRequest,
) -> Result<(UpsertOutcome, Video)> {
    let video_id = required_id(&request.video_id)?;

    let mut incoming = provider.fetch_video(video_id).await?;
    validate_video(&incoming)?;

    incoming.video_id = video_id.to_string();
    incoming.categories = request.categories;

    match store.get_video(video_id).await? {
        None => {
            store.insert_video(&incoming).await?;
            info!("Inserted video {video_id}: {}", incoming.title);
            Ok((UpsertOutcome::Created, incoming))
        }
        Some(existing) => {
            let reconciliation = reconcile(existing, &incoming);
            if reconciliation.changed {
                store.update_video(&reconciliation.merged).await?;
                info!("Updated video {video_id}");
                Ok((UpsertOutcome::Updated, reconciliation.merged))
            } else {
                debug!("Video {video_id} unchanged, skipping write");
                Ok((UpsertOutcome::Unchanged, reconciliation.merged))
            }
        }
    }
}

/// Identifiers are trimmed the same way on every path, so a padded ID
/// addresses the same document it was stored under.
pub fn required_id(video_id: &str) -> Result<&str> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(CatalogError::validation("video_id parameter is required"));
    }
    Ok(video_id)
}

pub fn validate_video(video: &Video) -> Result<()> {
    if video.title.trim().is_empty() {
        return Err(CatalogError::validation("title is required"));
    }
    Ok(())
}

pub async fn get_video(store: &dyn CatalogStore, video_id: &str) -> Result<Video> {
    let video_id = required_id(video_id)?;
    store
        .get_video(video_id)
        .await?
        .ok_or_else(|| CatalogError::video_not_found(video_id))
}

pub async fn delete_video(store: &dyn CatalogStore, video_id: &str) -> Result<()> {
    let video_id = required_id(video_id)?;
    match store.delete_video(video_id).await? {
        DeleteOutcome::Deleted => {
            info!("Deleted video {video_id}");
            Ok(())
        }
        DeleteOutcome::NotFound => Err(CatalogError::video_not_found(video_id)),
    }
}
