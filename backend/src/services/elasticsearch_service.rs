use crate::error::{CatalogError, Result};
use crate::models::{Creator, Video};
use crate::services::store::{
    CatalogStore, DeleteOutcome, SearchPage, CREATORS_INDEX, SEARCH_FIELDS, VIDEOS_INDEX,
};
use async_trait::async_trait;
use elasticsearch::http::response::Response;
use elasticsearch::http::StatusCode;
use elasticsearch::indices::{IndicesCreateParts, IndicesExistsParts};
use elasticsearch::params::Refresh;
use elasticsearch::{DeleteParts, Elasticsearch, GetParts, IndexParts, SearchParts};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::OnceCell;

const DISTINCT_VALUES_AGG: &str = "distinct_values";

/// Catalog store backed by an Elasticsearch/OpenSearch cluster.
///
/// The client is cheap to clone and pools its own connections, so a single
/// instance is shared by every in-flight request.
pub struct ElasticsearchStore {
    client: Elasticsearch,
    collections_ready: OnceCell<()>,
}

impl ElasticsearchStore {
    pub fn new(client: Elasticsearch) -> Self {
        Self {
            client,
            collections_ready: OnceCell::new(),
        }
    }

    async fn ready(&self) -> Result<()> {
        self.collections_ready
            .get_or_try_init(|| async {
                self.create_index_if_missing(VIDEOS_INDEX, video_mappings())
                    .await?;
                self.create_index_if_missing(CREATORS_INDEX, creator_mappings())
                    .await
            })
            .await
            .map(|_| ())
    }

    async fn create_index_if_missing(&self, index: &str, mappings: Value) -> Result<()> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        let status = exists.status_code();
        if status.is_success() {
            return Ok(());
        }
        if status != StatusCode::NOT_FOUND {
            return Err(CatalogError::Store(format!(
                "checking index '{index}' failed with status {status}"
            )));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(json!({ "mappings": mappings }))
            .send()
            .await?;

        if response.status_code().is_success() {
            info!("Elasticsearch index '{index}' created.");
            return Ok(());
        }

        let status = response.status_code();
        let response_text = response.text().await.unwrap_or_default();
        if response_text.contains("resource_already_exists_exception") {
            info!("Elasticsearch index '{index}' already exists.");
            Ok(())
        } else {
            error!("Failed to create Elasticsearch index '{index}': {response_text}");
            Err(CatalogError::Store(format!(
                "creating index '{index}' failed with status {status}"
            )))
        }
    }

    async fn get_document<T: DeserializeOwned>(&self, index: &str, id: &str) -> Result<Option<T>> {
        self.ready().await?;

        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .send()
            .await?;

        if response.status_code() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: GetEnvelope<T> = checked(response, "get").await?.json().await?;
        Ok(envelope.into_source())
    }

    async fn put_document<T: Serialize + Sync>(&self, index: &str, id: &str, doc: &T) -> Result<()> {
        self.ready().await?;

        let body = serde_json::to_value(doc)
            .map_err(|e| CatalogError::Store(format!("error encoding document {id}: {e}")))?;

        let response = self
            .client
            .index(IndexParts::IndexId(index, id))
            .refresh(Refresh::True)
            .body(body)
            .send()
            .await?;

        checked(response, "index").await?;
        debug!("Wrote document {id} to '{index}'");
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<DeleteOutcome> {
        self.ready().await?;

        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .refresh(Refresh::True)
            .send()
            .await?;

        if response.status_code() == StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome::NotFound);
        }

        checked(response, "delete").await?;
        Ok(DeleteOutcome::Deleted)
    }

    async fn search_documents<T: DeserializeOwned>(
        &self,
        index: &str,
        body: Value,
    ) -> Result<SearchPage<T>> {
        self.ready().await?;

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await?;

        let envelope: SearchEnvelope<T> = checked(response, "search").await?.json().await?;
        Ok(envelope.into_page())
    }
}

#[async_trait]
impl CatalogStore for ElasticsearchStore {
    async fn ensure_collections(&self) -> Result<()> {
        self.ready().await
    }

    async fn get_video(&self, video_id: &str) -> Result<Option<Video>> {
        self.get_document(VIDEOS_INDEX, video_id).await
    }

    async fn insert_video(&self, video: &Video) -> Result<()> {
        self.put_document(VIDEOS_INDEX, &video.video_id, video)
            .await
    }

    async fn update_video(&self, video: &Video) -> Result<()> {
        self.put_document(VIDEOS_INDEX, &video.video_id, video)
            .await
    }

    async fn delete_video(&self, video_id: &str) -> Result<DeleteOutcome> {
        self.delete_document(VIDEOS_INDEX, video_id).await
    }

    async fn search_videos(&self, query: &str, from: u64, size: u64) -> Result<SearchPage<Video>> {
        let page = self
            .search_documents(VIDEOS_INDEX, video_search_query(query, from, size))
            .await?;
        debug!("Search '{query}' matched {} videos", page.total);
        Ok(page)
    }

    async fn search_videos_by_category(
        &self,
        category: &str,
        from: u64,
        size: u64,
    ) -> Result<SearchPage<Video>> {
        self.search_documents(VIDEOS_INDEX, category_query(category, from, size))
            .await
    }

    async fn aggregate_distinct_values(
        &self,
        field: &str,
        max_buckets: u64,
    ) -> Result<Vec<String>> {
        self.ready().await?;

        let response = self
            .client
            .search(SearchParts::Index(&[VIDEOS_INDEX]))
            .body(distinct_values_query(field, max_buckets))
            .send()
            .await?;

        let envelope: AggregationEnvelope = checked(response, "aggregation").await?.json().await?;
        Ok(envelope.bucket_keys(DISTINCT_VALUES_AGG))
    }

    async fn get_creator(&self, creator_id: &str) -> Result<Option<Creator>> {
        self.get_document(CREATORS_INDEX, creator_id).await
    }

    async fn put_creator(&self, creator: &Creator) -> Result<()> {
        self.put_document(CREATORS_INDEX, &creator.creator_id, creator)
            .await
    }

    async fn list_creators(&self, from: u64, size: u64) -> Result<SearchPage<Creator>> {
        self.search_documents(CREATORS_INDEX, match_all_query(from, size))
            .await
    }
}

/// Turns a non-success response into a store error carrying its status text.
async fn checked(response: Response, action: &str) -> Result<Response> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }
    let response_text = response.text().await.unwrap_or_default();
    error!("Elasticsearch {action} failed with {status}: {response_text}");
    Err(CatalogError::Store(format!("{action} failed: {status}")))
}

fn video_mappings() -> Value {
    json!({
        "properties": {
            "videoId": { "type": "keyword" },
            "title": { "type": "text" },
            "description": { "type": "text" },
            "categories": {
                "type": "text",
                "fields": { "keyword": { "type": "keyword", "ignore_above": 256 } }
            },
            "viewsCount": { "type": "keyword" },
            "uploadDate": { "type": "keyword" },
            "lastUpdated": { "type": "keyword" }
        }
    })
}

fn creator_mappings() -> Value {
    json!({
        "properties": {
            "creatorId": { "type": "keyword" },
            "name": { "type": "text" },
            "lastUpdated": { "type": "keyword" }
        }
    })
}

pub fn video_search_query(query: &str, from: u64, size: u64) -> Value {
    json!({
        "from": from,
        "size": size,
        "query": {
            "multi_match": {
                "query": query,
                "fields": SEARCH_FIELDS
            }
        },
        "track_total_hits": true
    })
}

pub fn category_query(category: &str, from: u64, size: u64) -> Value {
    json!({
        "from": from,
        "size": size,
        "query": {
            "match": { "categories": category }
        },
        "track_total_hits": true
    })
}

/// Term aggregation on the keyword sub-field; text fields cannot be bucketed directly.
pub fn distinct_values_query(field: &str, max_buckets: u64) -> Value {
    json!({
        "size": 0,
        "aggs": {
            DISTINCT_VALUES_AGG: {
                "terms": {
                    "field": format!("{field}.keyword"),
                    "size": max_buckets
                }
            }
        }
    })
}

fn match_all_query(from: u64, size: u64) -> Value {
    json!({
        "from": from,
        "size": size,
        "query": { "match_all": {} },
        "track_total_hits": true
    })
}

/// `hits.total` is a bare number on older clusters and `{value, relation}` on newer ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64 },
}

impl TotalHits {
    pub fn value(self) -> u64 {
        match self {
            TotalHits::Count(value) | TotalHits::Object { value } => value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetEnvelope<T> {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<T>,
}

impl<T> GetEnvelope<T> {
    fn into_source(self) -> Option<T> {
        if self.found {
            self.source
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope<T> {
    hits: HitsEnvelope<T>,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope<T> {
    #[serde(default)]
    total: Option<TotalHits>,
    #[serde(default = "Vec::new")]
    hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
struct Hit<T> {
    #[serde(rename = "_source")]
    source: T,
}

impl<T> SearchEnvelope<T> {
    pub fn into_page(self) -> SearchPage<T> {
        let items: Vec<T> = self.hits.hits.into_iter().map(|hit| hit.source).collect();
        let total = self
            .hits
            .total
            .map(TotalHits::value)
            .unwrap_or(items.len() as u64);
        SearchPage { total, items }
    }
}

#[derive(Debug, Deserialize)]
pub struct AggregationEnvelope {
    #[serde(default)]
    aggregations: HashMap<String, BucketAggregation>,
}

#[derive(Debug, Deserialize)]
struct BucketAggregation {
    #[serde(default)]
    buckets: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    key: Value,
}

impl AggregationEnvelope {
    pub fn bucket_keys(self, name: &str) -> Vec<String> {
        self.aggregations
            .get(name)
            .map(|agg| {
                agg.buckets
                    .iter()
                    .map(|bucket| match &bucket.key {
                        Value::String(key) => key.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
