//! Link record entity: the short code mapping and its click counter.

use chrono::{DateTime, Utc};

/// A shortened URL together with its usage statistics.
///
/// Values of this type are snapshots. The store owns the live record; a
/// `LinkRecord` handed to a caller never changes underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub short_code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a record snapshot.
    pub fn new(
        short_code: String,
        original_url: String,
        clicks: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            clicks,
            created_at,
        }
    }

    /// Creates the initial state of a freshly shortened link.
    pub fn fresh(short_code: String, original_url: String) -> Self {
        Self::new(short_code, original_url, 0, Utc::now())
    }
}

/// Orders records newest first, breaking ties by short code.
///
/// Used by every store so that `list_all` output is stable across backends.
pub fn sort_newest_first(records: &mut [LinkRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.short_code.cmp(&b.short_code))
    });
}
