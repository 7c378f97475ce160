use crate::models::{Thumbnail, Video};
use log::debug;

/// Outcome of comparing a stored video against a freshly fetched one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub changed: bool,
    pub merged: Video,
}

/// Compares `incoming` against `existing` field by field.
///
/// Every field that differs is overwritten with the incoming value; equal
/// fields are left untouched. `changed` tells the caller whether a store
/// write is needed at all.
pub fn reconcile(existing: Video, incoming: &Video) -> Reconciliation {
    let mut merged = existing;
    let mut changed = false;

    macro_rules! merge_field {
        ($field:ident, $label:literal) => {
            if merged.$field != incoming.$field {
                debug!("{} has changed for {}, updating...", $label, incoming.video_id);
                merged.$field = incoming.$field.clone();
                changed = true;
            }
        };
    }

    merge_field!(video_id, "Video ID");
    merge_field!(title, "Title");
    if !thumbnails_equal(&merged.thumbnails, &incoming.thumbnails) {
        debug!("Thumbnails have changed for {}, updating...", incoming.video_id);
        merged.thumbnails = incoming.thumbnails.clone();
        changed = true;
    }
    // Option equality keeps None distinct from Some(0).
    merge_field!(likes, "Likes count");
    merge_field!(views_count, "Views count");
    merge_field!(upload_date, "Upload date");
    merge_field!(video_category, "Video category");
    merge_field!(description, "Description");
    merge_field!(dislikes, "Dislikes count");
    merge_field!(is_short, "IsShort flag");
    merge_field!(creator_details, "Creator details");
    merge_field!(last_updated, "Last updated timestamp");
    merge_field!(categories, "Categories");

    Reconciliation { changed, merged }
}

/// Positional equality: same length and every thumbnail equal at the same index.
pub fn thumbnails_equal(a: &[Thumbnail], b: &[Thumbnail]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}
