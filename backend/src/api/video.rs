use crate::error::CatalogError;
use crate::models::{
    StatusResponse, UpsertOutcome, UpsertVideoRequest, UpsertVideoResponse, VideoResponse,
};
use crate::services::video_service;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{delete, get, post, State};

#[post("/video", data = "<request>")]
pub async fn upsert_video(
    state: &State<AppState>,
    request: Json<UpsertVideoRequest>,
) -> Result<Json<UpsertVideoResponse>, CatalogError> {
    let (outcome, video) = video_service::upsert_video(
        state.store.as_ref(),
        state.provider.as_ref(),
        request.into_inner(),
    )
    .await?;

    let status = match outcome {
        UpsertOutcome::Created => "Video inserted successfully",
        UpsertOutcome::Updated => "Video updated successfully",
        UpsertOutcome::Unchanged => "Video already up to date",
    };

    Ok(Json(UpsertVideoResponse {
        status: status.to_string(),
        outcome,
        video_id: video.video_id,
    }))
}

#[get("/video/<video_id>")]
pub async fn get_video(
    state: &State<AppState>,
    video_id: &str,
) -> Result<Json<VideoResponse>, CatalogError> {
    let video = video_service::get_video(state.store.as_ref(), video_id).await?;
    Ok(Json(VideoResponse { video }))
}

#[delete("/video/<video_id>")]
pub async fn delete_video(
    state: &State<AppState>,
    video_id: &str,
) -> Result<Json<StatusResponse>, CatalogError> {
    video_service::delete_video(state.store.as_ref(), video_id).await?;
    Ok(Json(StatusResponse {
        status: "Video deleted successfully".to_string(),
    }))
}
