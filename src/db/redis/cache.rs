use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::AppError;
use crate::error::AppResult;
use crate::models::{MovieId, MovieList};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    MovieSearch(String),
    MovieDetails(MovieId),
    MovieList(MovieList, u32),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::MovieSearch(query) => write!(f, "tmdb:search:{}", query.trim().to_lowercase()),
            CacheKey::MovieDetails(id) => write!(f, "tmdb:movie:{}", id),
            CacheKey::MovieList(list, page) => write!(f, "tmdb:list:{}:{}", list, page),
        }
    }
}

/// Opens a Redis client for the provider response cache.
///
/// Only the URL is validated here; connections are made lazily.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// A serialized value waiting to be stored
struct PendingWrite {
    key: String,
    value: String,
    ttl: u64,
}

/// Outcome counts of the background writer over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub stored: usize,
    pub failed: usize,
}

/// Read-through cache for metadata provider responses, backed by Redis.
///
/// Writes go through an unbounded queue drained by one background task, so a
/// slow or unreachable Redis never delays a response.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    queue: mpsc::UnboundedSender<PendingWrite>,
}

/// Owner of the background writer task
pub struct CacheWriterHandle {
    stop: oneshot::Sender<()>,
    task: JoinHandle<WriterStats>,
}

impl CacheWriterHandle {
    /// Stops the writer after it has stored everything already queued, and
    /// returns once the task has exited.
    pub async fn shutdown(self) -> WriterStats {
        let _ = self.stop.send(());
        match self.task.await {
            Ok(stats) => {
                tracing::info!(stored = stats.stored, failed = stats.failed, "Cache writer stopped");
                stats
            }
            Err(e) => {
                tracing::error!(error = %e, "Cache writer task aborted");
                WriterStats::default()
            }
        }
    }
}

impl Cache {
    /// Creates the cache and spawns its background writer
    pub async fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (queue, pending) = mpsc::unbounded_channel();
        let (stop, stopped) = oneshot::channel();

        let task = tokio::spawn(drain_writes(redis_client.clone(), pending, stopped));

        (Self { redis_client, queue }, CacheWriterHandle { stop, task })
    }

    /// Looks up and deserializes a cached value, `None` on a miss
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key.to_string()).await?;

        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| AppError::Internal(format!("Corrupt cache entry {}: {}", key, e)))
    }

    /// Queues a value for storage with the given TTL in seconds.
    ///
    /// Failures are logged by the writer and never reach the caller.
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let value = match serde_json::to_string(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Cache value not serializable");
                return;
            }
        };

        let write = PendingWrite {
            key: key.to_string(),
            value,
            ttl,
        };
        if self.queue.send(write).is_err() {
            tracing::warn!(key = %key, "Cache writer already stopped, dropping write");
        }
    }
}

/// Stores queued writes until told to stop, then flushes what is left.
///
/// Live `Cache` clones keep the queue open, so the flush only takes what is
/// already queued.
async fn drain_writes(
    client: Client,
    mut pending: mpsc::UnboundedReceiver<PendingWrite>,
    mut stopped: oneshot::Receiver<()>,
) -> WriterStats {
    tracing::debug!("Cache writer started");
    let mut stats = WriterStats::default();

    loop {
        tokio::select! {
            Some(write) = pending.recv() => store(&client, write, &mut stats).await,
            _ = &mut stopped => break,
        }
    }

    while let Ok(write) = pending.try_recv() {
        store(&client, write, &mut stats).await;
    }
    stats
}

async fn store(client: &Client, write: PendingWrite, stats: &mut WriterStats) {
    match set_with_ttl(client, &write).await {
        Ok(()) => stats.stored += 1,
        Err(e) => {
            stats.failed += 1;
            tracing::error!(key = %write.key, error = %e, "Cache write failed");
        }
    }
}

async fn set_with_ttl(client: &Client, write: &PendingWrite) -> redis::RedisResult<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    conn.set_ex(&write.key, &write.value, write.ttl).await
}
