pub mod category;
pub mod creator;
pub mod search;
pub mod video;

use crate::models::ErrorResponse;
use rocket::http::Status;
use rocket::{catch, catchers, routes, Catcher, Route};

pub fn routes() -> Vec<Route> {
    routes![
        video::upsert_video,
        video::get_video,
        video::delete_video,
        search::search_videos,
        search::videos_by_category,
        search::banner_videos,
        category::list_categories,
        category::remove_category,
        creator::upsert_creator,
        creator::get_creator,
        creator::list_creators,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![bad_request, not_found, unprocessable, internal_error]
}

#[catch(400)]
fn bad_request() -> ErrorResponse {
    ErrorResponse::new(Status::BadRequest, "bad_request", "error parsing request body")
}

#[catch(404)]
fn not_found() -> ErrorResponse {
    ErrorResponse::new(Status::NotFound, "not_found", "requested resource not found")
}

#[catch(422)]
fn unprocessable() -> ErrorResponse {
    ErrorResponse::new(
        Status::UnprocessableEntity,
        "bad_request",
        "request body does not match the expected shape",
    )
}

#[catch(500)]
fn internal_error() -> ErrorResponse {
    ErrorResponse::new(
        Status::InternalServerError,
        "internal_error",
        "internal server error",
    )
}
