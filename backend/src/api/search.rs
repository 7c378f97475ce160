use crate::error::CatalogError;
use crate::models::{BannerResponse, PaginatedVideos, SearchVideosRequest};
use crate::services::search_service::{self, Pagination};
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{get, post, State};

#[post("/search", data = "<request>")]
pub async fn search_videos(
    state: &State<AppState>,
    request: Json<SearchVideosRequest>,
) -> Result<Json<PaginatedVideos>, CatalogError> {
    let request = request.into_inner();
    let pagination = Pagination::new(request.page, request.size, state.max_page_size);

    let result =
        search_service::search_videos(state.store.as_ref(), &request.query, pagination).await?;
    Ok(Json(result))
}

#[get("/videos/category/<category>?<page>&<size>")]
pub async fn videos_by_category(
    state: &State<AppState>,
    category: &str,
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Json<PaginatedVideos>, CatalogError> {
    let pagination = Pagination::new(page, size, state.max_page_size);

    let result =
        search_service::videos_by_category(state.store.as_ref(), category, pagination).await?;
    Ok(Json(result))
}

#[get("/banner")]
pub async fn banner_videos(state: &State<AppState>) -> Result<Json<BannerResponse>, CatalogError> {
    let videos = search_service::banner_videos(state.store.as_ref()).await?;
    Ok(Json(BannerResponse { videos }))
}
