use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::user::errors::SessionStoreError;
use crate::user::ports::SessionStore;

/// Session store backed by a Redis connection manager.
///
/// The manager reconnects on its own and is cheap to clone, so each call
/// works on its own handle.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl: Option<Duration>,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("connection", &"ConnectionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RedisSessionStore {
    /// Connect to Redis.
    ///
    /// # Arguments
    /// * `redis_url` - Connection URL, e.g. `redis://127.0.0.1:6379`
    /// * `ttl` - Expiry applied to every session record; `None` keeps them until evicted
    ///
    /// # Errors
    /// * `ConnectionFailed` - URL is invalid or the server is unreachable
    pub async fn connect(redis_url: &str, ttl: Option<Duration>) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            SessionStoreError::ConnectionFailed(format!("Failed to create Redis client: {e}"))
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            SessionStoreError::ConnectionFailed(format!("Failed to connect to Redis: {e}"))
        })?;

        tracing::info!(ttl_seconds = ?ttl.map(|t| t.as_secs()), "Connected to Redis session store");

        Ok(Self { conn, ttl })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn store(&self, key: &str, email: &str) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();

        match self.ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, email, ttl.as_secs())
                .await
                .map_err(|e| SessionStoreError::WriteFailed(format!("Redis SETEX failed: {e}")))?,
            None => conn
                .set::<_, _, ()>(key, email)
                .await
                .map_err(|e| SessionStoreError::WriteFailed(format!("Redis SET failed: {e}")))?,
        }

        tracing::debug!("Session recorded");

        Ok(())
    }

    async fn find(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self.conn.clone();

        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| SessionStoreError::ReadFailed(format!("Redis GET failed: {e}")))
    }
}
