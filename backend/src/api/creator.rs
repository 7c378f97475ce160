use crate::error::CatalogError;
use crate::models::{Creator, CreatorResponse, PaginatedCreators};
use crate::services::creator_service;
use crate::services::search_service::Pagination;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{get, post, State};

#[post("/creator", data = "<creator>")]
pub async fn upsert_creator(
    state: &State<AppState>,
    creator: Json<Creator>,
) -> Result<Json<CreatorResponse>, CatalogError> {
    let creator = creator_service::upsert_creator(state.store.as_ref(), creator.into_inner()).await?;
    Ok(Json(CreatorResponse { creator }))
}

#[get("/creator/<creator_id>")]
pub async fn get_creator(
    state: &State<AppState>,
    creator_id: &str,
) -> Result<Json<CreatorResponse>, CatalogError> {
    let creator = creator_service::get_creator(state.store.as_ref(), creator_id).await?;
    Ok(Json(CreatorResponse { creator }))
}

#[get("/creators?<page>&<size>")]
pub async fn list_creators(
    state: &State<AppState>,
    page: Option<i64>,
    size: Option<i64>,
) -> Result<Json<PaginatedCreators>, CatalogError> {
    let pagination = Pagination::new(page, size, state.max_page_size);
    let creators = creator_service::list_creators(state.store.as_ref(), pagination).await?;
    Ok(Json(creators))
}
