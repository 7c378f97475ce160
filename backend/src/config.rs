use crate::services::elasticsearch_service::ElasticsearchStore;
use crate::services::metadata_provider::HttpMetadataProvider;
use crate::services::store::CatalogStore;
use crate::AppState;
use anyhow::Result;
use elasticsearch::{
    auth::Credentials,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    Elasticsearch,
};
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_METADATA_PROVIDER_URL: &str = "https://yig-video-downloader-backend.vercel.app/get_youtube_video_info?url=https://www.youtube.com/watch?v={video_id}&details=true";

lazy_static! {
    pub static ref ELASTICSEARCH_URL: String =
        env::var("ELASTICSEARCH_URL").unwrap_or_else(|_| "http://localhost:9200".to_string());
    pub static ref ELASTICSEARCH_USERNAME: Option<String> =
        env::var("ELASTICSEARCH_USERNAME").ok().filter(|v| !v.is_empty());
    pub static ref ELASTICSEARCH_PASSWORD: Option<String> =
        env::var("ELASTICSEARCH_PASSWORD").ok().filter(|v| !v.is_empty());
    pub static ref STORE_TIMEOUT_SECS: u64 = parse_or(env::var("STORE_TIMEOUT_SECS").ok(), 10);
    pub static ref METADATA_PROVIDER_URL: String = env::var("METADATA_PROVIDER_URL")
        .unwrap_or_else(|_| DEFAULT_METADATA_PROVIDER_URL.to_string());
    pub static ref PROVIDER_TIMEOUT_SECS: u64 =
        parse_or(env::var("PROVIDER_TIMEOUT_SECS").ok(), 15);
    pub static ref MAX_PAGE_SIZE: i64 = parse_or(env::var("MAX_PAGE_SIZE").ok(), 100);
    pub static ref CORS_ALLOWED_ORIGINS: String =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());
    pub static ref LOG_LEVEL: String = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
}

/// Parses an optional environment value, falling back on absence or garbage.
pub fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn init_logger() {
    let level = LevelFilter::from_str(&LOG_LEVEL).unwrap_or(LevelFilter::Info);
    Builder::new().filter_level(level).init();
    info!("Starting video catalog backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_elasticsearch_client() -> Result<Elasticsearch> {
    let es_url = &*ELASTICSEARCH_URL;
    info!("Connecting to Elasticsearch at: {es_url}");

    let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(es_url.parse()?))
        .timeout(Duration::from_secs(*STORE_TIMEOUT_SECS));

    if let (Some(username), Some(password)) =
        (ELASTICSEARCH_USERNAME.as_ref(), ELASTICSEARCH_PASSWORD.as_ref())
    {
        builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
    }

    Ok(Elasticsearch::new(builder.build()?))
}

pub async fn create_app_state() -> Result<AppState> {
    let store = ElasticsearchStore::new(create_elasticsearch_client()?);

    if let Err(e) = store.ensure_collections().await {
        warn!("Catalog collections not ready yet, retrying on first request: {e}");
    }

    let provider = HttpMetadataProvider::new(
        &METADATA_PROVIDER_URL,
        Duration::from_secs(*PROVIDER_TIMEOUT_SECS),
    )?;

    Ok(AppState {
        store: Arc::new(store),
        provider: Arc::new(provider),
        max_page_size: *MAX_PAGE_SIZE,
    })
}

pub fn allowed_origins(setting: &str) -> AllowedOrigins {
    let origins: Vec<&str> = setting
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();

    if origins.is_empty() || origins.contains(&"*") {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&origins)
    }
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(allowed_origins(&CORS_ALLOWED_ORIGINS))
        .allowed_methods(
            vec![
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Options,
            ]
            .into_iter()
            .map(From::from)
            .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
        ]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_invalid_values() {
        assert_eq!(parse_or::<u64>(None, 10), 10);
        assert_eq!(parse_or::<u64>(Some("abc".to_string()), 10), 10);
        assert_eq!(parse_or::<u64>(Some(" 25 ".to_string()), 10), 25);
        assert_eq!(parse_or::<i64>(Some("-1".to_string()), 100), -1);
    }

    #[test]
    fn wildcard_or_empty_setting_allows_any_origin() {
        assert_eq!(allowed_origins("*"), AllowedOrigins::all());
        assert_eq!(allowed_origins(""), AllowedOrigins::all());
        assert_eq!(
            allowed_origins("http://localhost:8080, https://catalog.example"),
            AllowedOrigins::some_exact(&["http://localhost:8080", "https://catalog.example"])
        );
    }
}
