use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// A catalogued video, keyed by its externally assigned `videoId`.
///
/// `likes` and `dislikes` stay optional: an absent count is not the same
/// thing as zero and survives a round trip through the store as `null`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
    pub likes: Option<i64>,
    pub views_count: String,
    pub upload_date: String,
    pub video_category: String,
    pub description: String,
    pub dislikes: Option<i64>,
    pub is_short: bool,
    pub creator_details: CreatorDetails,
    pub last_updated: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatorDetails {
    pub name: String,
    #[serde(alias = "channerlLink")]
    pub channel_link: String,
    pub subscribers_count: i64,
    pub profile_pic: String,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Creator {
    pub creator_id: String,
    pub name: String,
    #[serde(alias = "channerlLink")]
    pub channel_link: String,
    pub subscribers_count: i64,
    pub profile_pic: String,
    pub last_updated: String,
}

/// Envelope returned by the external video metadata provider.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VideoEnvelope {
    pub status: bool,
    pub data: Option<Video>,
    pub message: serde_json::Value,
}

impl Default for VideoEnvelope {
    fn default() -> Self {
        Self {
            status: true,
            data: None,
            message: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertVideoRequest {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertVideoResponse {
    pub status: String,
    pub outcome: UpsertOutcome,
    pub video_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResponse {
    pub video: Video,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchVideosRequest {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One page of videos plus the full match count.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedVideos {
    pub page: i64,
    pub size: i64,
    pub total: u64,
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BannerResponse {
    pub videos: Vec<Video>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveCategoryResponse {
    pub status: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatorResponse {
    pub creator: Creator,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedCreators {
    pub page: i64,
    pub size: i64,
    pub total: u64,
    pub creators: Vec<Creator>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(skip, default = "default_error_status")]
    pub status: Status,
    pub error: String,
    pub message: String,
}

fn default_error_status() -> Status {
    Status::BadRequest
}

impl ErrorResponse {
    pub fn new(status: Status, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
