use crate::error::{CatalogError, Result};
use crate::services::store::CatalogStore;
use crate::services::video_service::required_id;
use log::info;

pub const CATEGORIES_FIELD: &str = "categories";
pub const MAX_CATEGORY_BUCKETS: u64 = 1000;

/// All category labels present in the catalog, at most [`MAX_CATEGORY_BUCKETS`].
pub async fn list_categories(store: &dyn CatalogStore) -> Result<Vec<String>> {
    store
        .aggregate_distinct_values(CATEGORIES_FIELD, MAX_CATEGORY_BUCKETS)
        .await
}

/// Drops every exact match of `category` from one video and writes it back.
///
/// The write happens even when the label was not present.
pub async fn remove_category(
    store: &dyn CatalogStore,
    video_id: &str,
    category: &str,
) -> Result<Vec<String>> {
    let video_id = required_id(video_id)?;
    if category.is_empty() {
        return Err(CatalogError::validation("category parameter is required"));
    }

    let mut video = store
        .get_video(video_id)
        .await?
        .ok_or_else(|| CatalogError::video_not_found(video_id))?;

    video.categories = without_category(&video.categories, category);
    store.update_video(&video).await?;
    info!("Removed category '{category}' from video {video_id}");

    Ok(video.categories)
}

pub fn without_category(categories: &[String], category: &str) -> Vec<String> {
    categories
        .iter()
        .filter(|c| c.as_str() != category)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{stored_video, MemoryStore};

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn removes_only_exact_matches() {
        let categories = labels(&["banner", "comedy", "music"]);
        assert_eq!(without_category(&categories, "comedy"), ["banner", "music"]);
        assert_eq!(without_category(&categories, "Comedy"), categories);
        assert_eq!(without_category(&categories, "jazz"), categories);
    }

    #[test]
    fn removes_every_duplicate() {
        let categories = labels(&["music", "banner", "music"]);
        assert_eq!(without_category(&categories, "music"), ["banner"]);
    }

    #[tokio::test]
    async fn removal_touches_only_the_target_video() {
        let store = MemoryStore::with_videos(vec![
            stored_video("a", "A", &["banner", "comedy", "music"]),
            stored_video("b", "B", &["comedy"]),
        ]);

        let remaining = remove_category(&store, "a", "comedy")
            .await
            .expect("removal succeeds");

        assert_eq!(remaining, ["banner", "music"]);
        assert_eq!(
            store.stored("a").expect("video a").categories,
            ["banner", "music"]
        );
        assert_eq!(store.stored("b").expect("video b").categories, ["comedy"]);
    }

    #[tokio::test]
    async fn absent_label_still_writes() {
        let store = MemoryStore::with_videos(vec![stored_video("a", "A", &["banner"])]);

        let remaining = remove_category(&store, "a", "jazz")
            .await
            .expect("removal succeeds");

        assert_eq!(remaining, ["banner"]);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn unknown_video_is_not_found() {
        let store = MemoryStore::default();

        let err = remove_category(&store, "ghost", "banner").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn lists_distinct_labels_across_videos() {
        let store = MemoryStore::with_videos(vec![
            stored_video("a", "A", &["banner", "music"]),
            stored_video("b", "B", &["music", "comedy"]),
        ]);

        let categories = list_categories(&store).await.expect("aggregation succeeds");
        assert_eq!(categories, ["banner", "music", "comedy"]);
    }

    #[tokio::test]
    async fn failed_write_keeps_the_label() {
        let store = MemoryStore::with_videos(vec![stored_video("a", "A", &["banner", "comedy"])]);
        store.fail_writes();

        let err = remove_category(&store, "a", "comedy").await.unwrap_err();

        assert!(matches!(err, CatalogError::Store(_)));
        assert_eq!(store.writes(), 0);
        assert_eq!(
            store.stored("a").expect("video a").categories,
            ["banner", "comedy"]
        );
    }
}
