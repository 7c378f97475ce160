//! In-memory doubles for the store and the metadata provider.

use crate::error::{CatalogError, Result};
use crate::models::{Creator, Thumbnail, Video};
use crate::services::metadata_provider::MetadataProvider;
use crate::services::store::{CatalogStore, DeleteOutcome, SearchPage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Keeps documents in insertion order and counts every write.
#[derive(Default)]
pub struct MemoryStore {
    videos: Mutex<Vec<Video>>,
    creators: Mutex<Vec<Creator>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn with_videos(videos: Vec<Video>) -> Self {
        let store = Self::default();
        *store.videos.lock().unwrap() = videos;
        store
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn stored(&self, video_id: &str) -> Option<Video> {
        self.videos
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.video_id == video_id)
            .cloned()
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CatalogError::Store("503 Service Unavailable".to_string()));
        }
        Ok(())
    }

    fn record_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::Store("index failed: 500".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn put_video(&self, video: &Video) -> Result<()> {
        self.record_write()?;
        let mut videos = self.videos.lock().unwrap();
        match videos.iter_mut().find(|v| v.video_id == video.video_id) {
            Some(slot) => *slot = video.clone(),
            None => videos.push(video.clone()),
        }
        Ok(())
    }

    fn page(&self, matches: Vec<Video>, from: u64, size: u64) -> SearchPage<Video> {
        SearchPage {
            total: matches.len() as u64,
            items: matches
                .into_iter()
                .skip(from as usize)
                .take(size as usize)
                .collect(),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ensure_collections(&self) -> Result<()> {
        self.check_read()
    }

    async fn get_video(&self, video_id: &str) -> Result<Option<Video>> {
        self.check_read()?;
        Ok(self.stored(video_id))
    }

    async fn insert_video(&self, video: &Video) -> Result<()> {
        self.put_video(video)
    }

    async fn update_video(&self, video: &Video) -> Result<()> {
        self.put_video(video)
    }

    async fn delete_video(&self, video_id: &str) -> Result<DeleteOutcome> {
        self.check_read()?;
        let mut videos = self.videos.lock().unwrap();
        match videos.iter().position(|v| v.video_id == video_id) {
            Some(pos) => {
                videos.remove(pos);
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(DeleteOutcome::Deleted)
            }
            None => Ok(DeleteOutcome::NotFound),
        }
    }

    async fn search_videos(&self, query: &str, from: u64, size: u64) -> Result<SearchPage<Video>> {
        self.check_read()?;
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let matches = self
            .videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| {
                let haystack = format!(
                    "{} {} {}",
                    v.title,
                    v.description,
                    v.categories.join(" ")
                )
                .to_lowercase();
                terms.iter().any(|t| haystack.contains(t.as_str()))
            })
            .cloned()
            .collect();
        Ok(self.page(matches, from, size))
    }

    async fn search_videos_by_category(
        &self,
        category: &str,
        from: u64,
        size: u64,
    ) -> Result<SearchPage<Video>> {
        self.check_read()?;
        let matches = self
            .videos
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.categories.iter().any(|c| c.eq_ignore_ascii_case(category)))
            .cloned()
            .collect();
        Ok(self.page(matches, from, size))
    }

    async fn aggregate_distinct_values(
        &self,
        field: &str,
        max_buckets: u64,
    ) -> Result<Vec<String>> {
        self.check_read()?;
        let mut distinct: Vec<String> = Vec::new();
        for video in self.videos.lock().unwrap().iter() {
            let values = match field {
                "categories" => video.categories.clone(),
                _ => Vec::new(),
            };
            for value in values {
                if !distinct.contains(&value) {
                    distinct.push(value);
                }
            }
        }
        distinct.truncate(max_buckets as usize);
        Ok(distinct)
    }

    async fn get_creator(&self, creator_id: &str) -> Result<Option<Creator>> {
        self.check_read()?;
        Ok(self
            .creators
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.creator_id == creator_id)
            .cloned())
    }

    async fn put_creator(&self, creator: &Creator) -> Result<()> {
        self.record_write()?;
        let mut creators = self.creators.lock().unwrap();
        match creators.iter_mut().find(|c| c.creator_id == creator.creator_id) {
            Some(slot) => *slot = creator.clone(),
            None => creators.push(creator.clone()),
        }
        Ok(())
    }

    async fn list_creators(&self, from: u64, size: u64) -> Result<SearchPage<Creator>> {
        self.check_read()?;
        let creators = self.creators.lock().unwrap();
        Ok(SearchPage {
            total: creators.len() as u64,
            items: creators
                .iter()
                .skip(from as usize)
                .take(size as usize)
                .cloned()
                .collect(),
        })
    }
}

/// Serves canned provider records and counts fetches.
#[derive(Default)]
pub struct StubProvider {
    records: Mutex<HashMap<String, Video>>,
    fetches: AtomicUsize,
}

impl StubProvider {
    pub fn with(video_id: &str, video: Video) -> Self {
        let provider = Self::default();
        provider.set(video_id, video);
        provider
    }

    pub fn set(&self, video_id: &str, video: Video) {
        self.records
            .lock()
            .unwrap()
            .insert(video_id.to_string(), video);
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_video(&self, video_id: &str) -> Result<Video> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(video_id)
            .cloned()
            .ok_or_else(|| CatalogError::Upstream(format!("no record for {video_id}")))
    }
}

/// A provider record as it arrives: no ID and no categories attached.
pub fn provider_video(title: &str) -> Video {
    Video {
        title: title.to_string(),
        thumbnails: vec![Thumbnail {
            url: "https://i.ytimg.com/vi/x/default.jpg".to_string(),
            width: 120,
            height: 90,
        }],
        likes: Some(42),
        views_count: "1,234 views".to_string(),
        upload_date: "2024-03-01".to_string(),
        video_category: "Pets & Animals".to_string(),
        description: format!("{title} description"),
        last_updated: "2024-03-02T10:00:00Z".to_string(),
        ..Video::default()
    }
}

pub fn stored_video(video_id: &str, title: &str, categories: &[&str]) -> Video {
    Video {
        video_id: video_id.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        ..provider_video(title)
    }
}
