//! Redis implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::domain::entities::{LinkRecord, sort_newest_first};
use crate::domain::error::LinkError;
use crate::domain::repositories::LinkStore;

/// Creates the hash and indexes it, unless the key already exists.
///
/// KEYS: link hash, creation index. ARGV: url, created millis, code.
static INSERT_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 1 then
            return 0
        end
        redis.call('HSET', KEYS[1], 'original_url', ARGV[1], 'clicks', 0, 'created_at', ARGV[2])
        redis.call('ZADD', KEYS[2], ARGV[2], ARGV[3])
        return 1
        "#,
    )
});

/// Increments clicks only when the hash exists; `HINCRBY` alone would
/// create it.
///
/// KEYS: link hash. Returns nil or `{url, clicks, created millis}`.
static INCREMENT_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
        if redis.call('EXISTS', KEYS[1]) == 0 then
            return nil
        end
        local clicks = redis.call('HINCRBY', KEYS[1], 'clicks', 1)
        local fields = redis.call('HMGET', KEYS[1], 'original_url', 'created_at')
        return {fields[1], clicks, fields[2]}
        "#,
    )
});

/// Hash fields in the order [`LinkFields`] expects them.
const LINK_FIELDS: [&str; 3] = ["original_url", "clicks", "created_at"];

type LinkFields = (Option<String>, Option<u64>, Option<i64>);

/// Redis-backed link store.
///
/// Each link is a hash `link:{code}`; `links:by_created` is a sorted set of
/// codes scored by creation time. Insert and increment run as Lua scripts,
/// which Redis executes atomically, so neither can interleave with another
/// client's write.
pub struct RedisLinkStore {
    conn: ConnectionManager,
    key_prefix: String,
    index_key: String,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::StoreUnavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, LinkError> {
        Self::connect_with_namespace(redis_url, "").await
    }

    /// Like [`RedisLinkStore::connect`], with every key prefixed by
    /// `namespace`. Stores in different namespaces share nothing.
    pub async fn connect_with_namespace(
        redis_url: &str,
        namespace: &str,
    ) -> Result<Self, LinkError> {
        info!("Connecting to Redis link store");

        let client = Client::open(redis_url)
            .map_err(|e| LinkError::store(format!("Failed to create Redis client: {e}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| LinkError::store(format!("Failed to connect to Redis: {e}")))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| LinkError::store(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis");

        Ok(Self {
            conn: manager,
            key_prefix: format!("{namespace}link:"),
            index_key: format!("{namespace}links:by_created"),
        })
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, LinkError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| LinkError::store(format!("invalid created_at timestamp {millis}")))
}

fn record_from_fields(code: &str, fields: LinkFields) -> Result<Option<LinkRecord>, LinkError> {
    match fields {
        (Some(url), clicks, Some(created)) => Ok(Some(LinkRecord::new(
            code.to_string(),
            url,
            clicks.unwrap_or_default(),
            millis_to_datetime(created)?,
        ))),
        (None, _, _) => Ok(None),
        (Some(_), _, None) => Err(LinkError::store(format!(
            "link {code} is missing created_at"
        ))),
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn insert(&self, code: &str, original_url: &str) -> Result<LinkRecord, LinkError> {
        let mut conn = self.conn.clone();
        let created_millis = Utc::now().timestamp_millis();

        let inserted: i64 = INSERT_SCRIPT
            .key(self.build_key(code))
            .key(&self.index_key)
            .arg(original_url)
            .arg(created_millis)
            .arg(code)
            .invoke_async(&mut conn)
            .await
            .map_err(LinkError::store)?;

        if inserted == 0 {
            return Err(LinkError::DuplicateCode(code.to_string()));
        }

        debug!("Redis INSERT: {}", code);
        Ok(LinkRecord::new(
            code.to_string(),
            original_url.to_string(),
            0,
            millis_to_datetime(created_millis)?,
        ))
    }

    async fn find_and_increment(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        let mut conn = self.conn.clone();

        let result: Option<(String, u64, i64)> = INCREMENT_SCRIPT
            .key(self.build_key(code))
            .invoke_async(&mut conn)
            .await
            .map_err(LinkError::store)?;

        result
            .map(|(url, clicks, created)| {
                Ok(LinkRecord::new(
                    code.to_string(),
                    url,
                    clicks,
                    millis_to_datetime(created)?,
                ))
            })
            .transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, LinkError> {
        let mut conn = self.conn.clone();

        let fields: LinkFields = redis::cmd("HMGET")
            .arg(self.build_key(code))
            .arg(&LINK_FIELDS[..])
            .query_async(&mut conn)
            .await
            .map_err(LinkError::store)?;

        record_from_fields(code, fields)
    }

    async fn list_all(&self) -> Result<Vec<LinkRecord>, LinkError> {
        let mut conn = self.conn.clone();

        let codes: Vec<String> = redis::cmd("ZREVRANGE")
            .arg(&self.index_key)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await
            .map_err(LinkError::store)?;

        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for code in &codes {
            pipe.cmd("HMGET").arg(self.build_key(code)).arg(&LINK_FIELDS[..]);
        }

        let rows: Vec<LinkFields> = pipe
            .query_async(&mut conn)
            .await
            .map_err(LinkError::store)?;

        let mut records = Vec::with_capacity(rows.len());
        for (code, fields) in codes.iter().zip(rows) {
            match record_from_fields(code, fields)? {
                Some(record) => records.push(record),
                None => warn!("Index entry {} has no link hash", code),
            }
        }

        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_fields_complete() {
        let record = record_from_fields(
            "abc1234",
            (
                Some("https://a.test".to_string()),
                Some(3),
                Some(1_700_000_000_000),
            ),
        )
        .unwrap()
        .unwrap();

        assert_eq!(record.short_code, "abc1234");
        assert_eq!(record.original_url, "https://a.test");
        assert_eq!(record.clicks, 3);
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_record_from_fields_missing_hash() {
        let record = record_from_fields("nope", (None, None, None)).unwrap();
        assert!(record.is_none());
    }

    #[test]
    fn test_record_from_fields_missing_created_at() {
        let result = record_from_fields("bad", (Some("https://a.test".into()), Some(0), None));
        assert!(matches!(result, Err(LinkError::StoreUnavailable(_))));
    }
}
