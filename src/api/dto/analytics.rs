//! DTOs for link analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;

/// Usage statistics for one short link.
///
/// The same shape is used for single-link lookups and for list entries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub original_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub creation_date: DateTime<Utc>,
}

impl From<LinkRecord> for AnalyticsResponse {
    fn from(record: LinkRecord) -> Self {
        Self {
            original_url: record.original_url,
            short_url: record.short_code,
            clicks: record.clicks,
            creation_date: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_maps_fields() {
        let now = Utc::now();
        let record = LinkRecord::new("abc1234".into(), "https://a.test".into(), 4, now);

        let body = serde_json::to_value(AnalyticsResponse::from(record)).unwrap();

        assert_eq!(body["originalUrl"], "https://a.test");
        assert_eq!(body["shortUrl"], "abc1234");
        assert_eq!(body["clicks"], 4);
        assert!(body["creationDate"].is_string());
    }
}
