use crate::error::{CatalogError, Result};
use crate::models::{PaginatedVideos, Video};
use crate::services::store::CatalogStore;
use log::debug;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const BANNER_CATEGORY: &str = "banner";
/// Deepest `from + size` the store will page to (`index.max_result_window`).
pub const MAX_RESULT_WINDOW: u64 = 10_000;

/// A 1-based page request, already coerced to sane values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
}

impl Pagination {
    /// Missing or non-positive values fall back to page 1 / size 10; `size`
    /// is then capped at `max_size`.
    pub fn new(page: Option<i64>, size: Option<i64>, max_size: i64) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let size = size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(max_size.max(1));
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size) as u64
    }

    pub fn size(&self) -> u64 {
        self.size as u64
    }

    /// Rejects pages the store would refuse to serve.
    pub fn within_window(self) -> Result<Self> {
        if self.offset().saturating_add(self.size()) > MAX_RESULT_WINDOW {
            return Err(CatalogError::validation(format!(
                "page {} of size {} is beyond the first {MAX_RESULT_WINDOW} results",
                self.page, self.size
            )));
        }
        Ok(self)
    }
}

pub async fn search_videos(
    store: &dyn CatalogStore,
    query: &str,
    pagination: Pagination,
) -> Result<PaginatedVideos> {
    if query.trim().is_empty() {
        return Err(CatalogError::validation("query parameter is required"));
    }
    let pagination = pagination.within_window()?;

    let page = store
        .search_videos(query, pagination.offset(), pagination.size())
        .await?;
    debug!(
        "Search '{query}' page {} returned {} of {} videos",
        pagination.page,
        page.items.len(),
        page.total
    );

    Ok(PaginatedVideos {
        page: pagination.page,
        size: pagination.size,
        total: page.total,
        videos: page.items,
    })
}

pub async fn videos_by_category(
    store: &dyn CatalogStore,
    category: &str,
    pagination: Pagination,
) -> Result<PaginatedVideos> {
    if category.trim().is_empty() {
        return Err(CatalogError::validation("category parameter is required"));
    }
    let pagination = pagination.within_window()?;

    let page = store
        .search_videos_by_category(category, pagination.offset(), pagination.size())
        .await?;

    Ok(PaginatedVideos {
        page: pagination.page,
        size: pagination.size,
        total: page.total,
        videos: page.items,
    })
}

/// First page of the fixed "banner" category.
pub async fn banner_videos(store: &dyn CatalogStore) -> Result<Vec<Video>> {
    let page = store
        .search_videos_by_category(BANNER_CATEGORY, 0, DEFAULT_PAGE_SIZE as u64)
        .await?;
    Ok(page.items)
}
