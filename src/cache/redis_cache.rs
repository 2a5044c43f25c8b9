//! Redis cache implementation.
//!
//! Each entry is a Redis hash with three fields, the layout used by the
//! ASP.NET Core Redis distributed cache:
//!
//! - `absexp`: absolute deadline in .NET ticks, `-1` when unset
//! - `sldexp`: sliding window in .NET ticks, `-1` when unset
//! - `data`: the cached payload
//!
//! Keeping that layout lets this service read and refresh entries written by
//! an existing deployment. Expiration itself is delegated to Redis `EXPIRE`,
//! which every read re-arms when a sliding window is present.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use super::{keys, CacheError, DistributedCache, EntryOptions, Result};

const ABSOLUTE_EXPIRATION_FIELD: &str = "absexp";
const SLIDING_EXPIRATION_FIELD: &str = "sldexp";
const DATA_FIELD: &str = "data";
const NOT_PRESENT: i64 = -1;

const TICKS_PER_MILLISECOND: i64 = 10_000;
const TICKS_PER_SECOND: i64 = 10_000_000;
/// Ticks between 0001-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Maps Redis errors to CacheError.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        CacheError::Connection(err.to_string())
    } else {
        CacheError::Operation(err.to_string())
    }
}

/// Redis cache backend using a connection manager for reconnects.
#[derive(Clone)]
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
    instance_name: String,
}

impl RedisCache {
    /// Connects to the Redis server at `url`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the server cannot be reached.
    pub async fn connect(url: &str, instance_name: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            instance_name: instance_name.into(),
        })
    }

    fn physical_key(&self, key: &str) -> String {
        keys::instance_key(&self.instance_name, key)
    }

    /// Re-arms the TTL of a key from its stored expiration fields.
    async fn rearm(
        &self,
        conn: &mut redis::aio::ConnectionManager,
        key: &str,
        absexp: Option<i64>,
        sldexp: Option<i64>,
    ) -> Result<()> {
        let sliding = present(sldexp);
        if sliding.is_none() {
            return Ok(());
        }

        if let Some(seconds) = expiration_seconds(now_ticks(), present(absexp), sliding) {
            let _: () = redis::cmd("EXPIRE")
                .arg(key)
                .arg(seconds)
                .query_async(conn)
                .await
                .map_err(map_redis_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl DistributedCache for RedisCache {
    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let physical = self.physical_key(key);

        let (absexp, sldexp, data): (Option<i64>, Option<i64>, Option<Vec<u8>>) =
            redis::cmd("HMGET")
                .arg(&physical)
                .arg(ABSOLUTE_EXPIRATION_FIELD)
                .arg(SLIDING_EXPIRATION_FIELD)
                .arg(DATA_FIELD)
                .query_async(&mut conn)
                .await
                .map_err(map_redis_error)?;

        match &data {
            Some(_) => {
                debug!(key, "Cache hit");
                self.rearm(&mut conn, &physical, absexp, sldexp).await?;
            }
            None => debug!(key, "Cache miss"),
        }

        Ok(data.map(payload_text))
    }

    async fn set_string(&self, key: &str, value: &str, options: &EntryOptions) -> Result<()> {
        let mut conn = self.conn.clone();
        let physical = self.physical_key(key);
        let now = now_ticks();

        let absolute = options
            .absolute_expiration
            .map(|d| now.saturating_add(duration_ticks(d)));
        let sliding = options.sliding_expiration.map(duration_ticks);

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("HSET")
            .arg(&physical)
            .arg(ABSOLUTE_EXPIRATION_FIELD)
            .arg(absolute.unwrap_or(NOT_PRESENT))
            .arg(SLIDING_EXPIRATION_FIELD)
            .arg(sliding.unwrap_or(NOT_PRESENT))
            .arg(DATA_FIELD)
            .arg(value)
            .ignore();

        match expiration_seconds(now, absolute, sliding) {
            Some(seconds) => pipe.cmd("EXPIRE").arg(&physical).arg(seconds).ignore(),
            None => pipe.cmd("PERSIST").arg(&physical).ignore(),
        };

        let _: () = pipe.query_async(&mut conn).await.map_err(map_redis_error)?;

        debug!(key, "Cached value");
        Ok(())
    }

    async fn refresh(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let physical = self.physical_key(key);

        let (absexp, sldexp): (Option<i64>, Option<i64>) = redis::cmd("HMGET")
            .arg(&physical)
            .arg(ABSOLUTE_EXPIRATION_FIELD)
            .arg(SLIDING_EXPIRATION_FIELD)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        self.rearm(&mut conn, &physical, absexp, sldexp).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.physical_key(key))
            .await
            .map_err(map_redis_error)?;
        debug!(key, "Removed cache key");
        Ok(())
    }
}

fn now_ticks() -> i64 {
    chrono::Utc::now().timestamp_millis() * TICKS_PER_MILLISECOND + UNIX_EPOCH_TICKS
}

/// Converts a Duration to .NET ticks, saturating at `i64::MAX`.
fn duration_ticks(d: Duration) -> i64 {
    i64::try_from(d.as_millis())
        .unwrap_or(i64::MAX)
        .saturating_mul(TICKS_PER_MILLISECOND)
}

/// Turns a stored payload into text, replacing invalid UTF-8 sequences.
///
/// A mangled payload then fails to decode and is treated as a miss upstream
/// rather than failing the read.
fn payload_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn present(field: Option<i64>) -> Option<i64> {
    field.filter(|&ticks| ticks != NOT_PRESENT)
}

/// Seconds until a key written or refreshed at `now` should expire.
///
/// The sliding window is capped by the time left before the absolute
/// deadline. Never returns less than one second.
fn expiration_seconds(now: i64, absolute: Option<i64>, sliding: Option<i64>) -> Option<i64> {
    let remaining = absolute.map(|deadline| deadline.saturating_sub(now) / TICKS_PER_SECOND);
    let window = sliding.map(|ticks| ticks / TICKS_PER_SECOND);

    let seconds = match (remaining, window) {
        (Some(r), Some(w)) => r.min(w),
        (Some(r), None) => r,
        (None, Some(w)) => w,
        (None, None) => return None,
    };
    Some(seconds.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60 * TICKS_PER_SECOND;

    #[test]
    fn test_ticks_for_known_date() {
        // 2000-01-01T00:00:00Z
        let millennium = chrono::DateTime::from_timestamp(946_684_800, 0).unwrap();
        assert_eq!(
            millennium.timestamp_millis() * TICKS_PER_MILLISECOND + UNIX_EPOCH_TICKS,
            630_822_816_000_000_000
        );
    }

    #[test]
    fn test_expiration_seconds_sliding_only() {
        assert_eq!(expiration_seconds(0, None, Some(5 * MINUTE)), Some(300));
    }

    #[test]
    fn test_expiration_seconds_absolute_caps_sliding() {
        let now = now_ticks();
        assert_eq!(
            expiration_seconds(now, Some(now + 2 * MINUTE), Some(5 * MINUTE)),
            Some(120)
        );
    }

    #[test]
    fn test_expiration_seconds_none_when_persistent() {
        assert_eq!(expiration_seconds(0, None, None), None);
    }

    #[test]
    fn test_expiration_seconds_floor_is_one() {
        let now = now_ticks();
        assert_eq!(expiration_seconds(now, Some(now - MINUTE), None), Some(1));
    }

    #[test]
    fn test_present_filters_sentinel() {
        assert_eq!(present(Some(NOT_PRESENT)), None);
        assert_eq!(present(Some(42)), Some(42));
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_duration_ticks_saturates() {
        assert_eq!(duration_ticks(Duration::from_secs(300)), 5 * MINUTE);
        assert_eq!(duration_ticks(Duration::from_secs(u64::MAX)), i64::MAX);
    }

    #[test]
    fn test_expiration_seconds_huge_window_does_not_overflow() {
        let now = now_ticks();
        let huge = duration_ticks(Duration::from_secs(u64::MAX));
        let absolute = now.saturating_add(huge);

        assert_eq!(
            expiration_seconds(now, None, Some(huge)),
            Some(i64::MAX / TICKS_PER_SECOND)
        );
        assert_eq!(
            expiration_seconds(now, Some(absolute), Some(huge)),
            Some((i64::MAX - now) / TICKS_PER_SECOND)
        );
    }

    #[test]
    fn test_payload_text_keeps_valid_utf8() {
        let payload = r#"{"Id":1,"Name":"Crème"}"#;
        assert_eq!(payload_text(payload.as_bytes().to_vec()), payload);
    }

    #[test]
    fn test_invalid_utf8_payload_becomes_undecodable_text() {
        let mut bytes = vec![0xff, 0xfe];
        bytes.extend_from_slice(br#"{"Id":1}"#);

        let text = payload_text(bytes);

        assert!(text.starts_with("\u{FFFD}\u{FFFD}"));
        assert!(crate::codec::decode_product(&text).is_err());
    }
}
