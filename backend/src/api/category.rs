use crate::error::CatalogError;
use crate::models::{CategoriesResponse, RemoveCategoryResponse};
use crate::services::category_service;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{delete, get, State};

#[get("/categories")]
pub async fn list_categories(
    state: &State<AppState>,
) -> Result<Json<CategoriesResponse>, CatalogError> {
    let categories = category_service::list_categories(state.store.as_ref()).await?;
    Ok(Json(CategoriesResponse { categories }))
}

#[delete("/videos/<video_id>/category?<category>")]
pub async fn remove_category(
    state: &State<AppState>,
    video_id: &str,
    category: Option<String>,
) -> Result<Json<RemoveCategoryResponse>, CatalogError> {
    let category = category.unwrap_or_default();
    let categories =
        category_service::remove_category(state.store.as_ref(), video_id, &category).await?;

    Ok(Json(RemoveCategoryResponse {
        status: "Category removed successfully".to_string(),
        categories,
    }))
}
