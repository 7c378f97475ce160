use crate::error::Result;
use crate::models::{Creator, Video};
use async_trait::async_trait;

pub const VIDEOS_INDEX: &str = "videos";
pub const CREATORS_INDEX: &str = "creators";

/// Fields covered by free-text video search.
pub const SEARCH_FIELDS: [&str; 4] = ["title", "description", "tags", "categories"];

/// Result of a delete addressed by document ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// One page of matches and the full match count.
#[derive(Debug, Clone, Default)]
pub struct SearchPage<T> {
    pub total: u64,
    pub items: Vec<T>,
}

/// Uniform operations against the document store backing the catalog.
///
/// Writes replace the whole document addressed by its ID and are visible
/// to reads issued right after they return. `get_*` returns `Ok(None)` for
/// an absent document; errors are reserved for store faults.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Makes sure the catalog collections exist, creating empty ones if needed.
    async fn ensure_collections(&self) -> Result<()>;

    async fn get_video(&self, video_id: &str) -> Result<Option<Video>>;

    async fn insert_video(&self, video: &Video) -> Result<()>;

    async fn update_video(&self, video: &Video) -> Result<()>;

    async fn delete_video(&self, video_id: &str) -> Result<DeleteOutcome>;

    /// Multi-field match over [`SEARCH_FIELDS`].
    async fn search_videos(&self, query: &str, from: u64, size: u64) -> Result<SearchPage<Video>>;

    async fn search_videos_by_category(
        &self,
        category: &str,
        from: u64,
        size: u64,
    ) -> Result<SearchPage<Video>>;

    /// Distinct values of `field` across all videos, at most `max_buckets` of them.
    async fn aggregate_distinct_values(&self, field: &str, max_buckets: u64)
        -> Result<Vec<String>>;

    async fn get_creator(&self, creator_id: &str) -> Result<Option<Creator>>;

    async fn put_creator(&self, creator: &Creator) -> Result<()>;

    async fn list_creators(&self, from: u64, size: u64) -> Result<SearchPage<Creator>>;
}
