pub mod category_service;
pub mod creator_service;
pub mod elasticsearch_service;
pub mod metadata_provider;
pub mod reconciler;
pub mod search_service;
pub mod store;
pub mod video_service;
