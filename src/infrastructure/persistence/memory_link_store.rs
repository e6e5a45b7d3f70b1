//! In-process link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::domain::entities::{LinkRecord, sort_newest_first};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkStore;

/// A stored link with its own click cell.
#[derive(Debug)]
struct StoredLink {
    original_url: String,
    clicks: AtomicU64,
    created_at: DateTime<Utc>,
}

impl StoredLink {
    fn snapshot(&self, code: &str, clicks: u64) -> LinkRecord {
        LinkRecord::new(
            code.to_string(),
            self.original_url.clone(),
            clicks,
            self.created_at,
        )
    }
}

/// Link store held in a sharded concurrent map.
///
/// Each record owns an `AtomicU64` counter, so an increment never holds a
/// map lock and redirects on different codes never contend. Nothing survives
/// a restart; use it for development and tests.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, Arc<StoredLink>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store (not durable)");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn get(&self, code: &str) -> Option<Arc<StoredLink>> {
        self.links.get(code).map(|entry| Arc::clone(entry.value()))
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, code: &str, original_url: &str) -> Result<LinkRecord, LinkError> {
        match self.links.entry(code.to_string()) {
            Entry::Occupied(_) => Err(LinkError::DuplicateCode(code.to_string())),
            Entry::Vacant(slot) => {
                let stored = Arc::new(StoredLink {
                    original_url: original_url.to_string(),
                    clicks: AtomicU64::new(0),
                    created_at: Utc::now(),
                });
                let record = stored.snapshot(code, 0);
                slot.insert(stored);
                Ok(record)
            }
        }
    }

    async fn find_and_increment(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        Ok(self.get(code).map(|stored| {
            let clicks = stored.clicks.fetch_add(1, Ordering::AcqRel) + 1;
            stored.snapshot(code, clicks)
        }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        Ok(self.get(code).map(|stored| {
            let clicks = stored.clicks.load(Ordering::Acquire);
            stored.snapshot(code, clicks)
        }))
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, LinkError> {
        let mut records: Vec<LinkRecord> = self
            .links
            .iter()
            .map(|entry| {
                let stored = entry.value();
                stored.snapshot(entry.key(), stored.clicks.load(Ordering::Acquire))
            })
            .collect();

        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
