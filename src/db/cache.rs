use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::AppResult;

/// Keys for cached catalogue data.
///
/// Each variant renders to a namespaced string so that entries with different
/// parameters never collide: trending windows are keyed by language and page
/// count, searches by language, query and page. Query text is used exactly as
/// received, so "Matrix" and "matrix" are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Trending { language: String, max_pages: u32 },
    Search { language: String, query: String, page: u32 },
    Genres { language: String },
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Trending { language, max_pages } => {
                write!(f, "movies:trending:{}:pages={}", language, max_pages)
            }
            CacheKey::Search { language, query, page } => {
                write!(f, "search:{}:{}:{}", language, query, page)
            }
            CacheKey::Genres { language } => write!(f, "genres:{}", language),
        }
    }
}

/// Key-value store with TTL, holding serialized payloads.
///
/// The store is a collaborator: Redis in production, an in-memory map in
/// tests. Implementations only deal in strings; (de)serialization lives in
/// [`Cache`].
#[async_trait::async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl: u64) -> AppResult<()>;
}

/// Message for asynchronous cache writes
struct CacheWriteMessage {
    key: String,
    value: String,
    ttl: u64,
}

/// Cache handler for storing and retrieving catalogue data.
///
/// Reads go straight to the store; writes are handed to a background task so
/// cache population never blocks a response. A failed write is logged and
/// dropped, the caller already has the fresh value.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
    write_tx: mpsc::UnboundedSender<CacheWriteMessage>,
}

/// Handle for gracefully shutting down the cache writer
pub struct CacheWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl CacheWriterHandle {
    /// Initiates a graceful shutdown of the cache writer
    ///
    /// Sends a shutdown signal to the writer task and waits for it to flush
    /// all pending writes to the store.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Cache writer shutdown signal sent");
    }
}

impl Cache {
    /// Creates a new Cache instance with an async write background task
    pub async fn new(store: Arc<dyn CacheStore>) -> (Self, CacheWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let writer_store = store.clone();
        tokio::spawn(async move {
            Self::cache_writer_task(writer_store, write_rx, shutdown_rx).await;
        });

        let cache = Self { store, write_tx };
        let handle = CacheWriterHandle { shutdown_tx };

        (cache, handle)
    }

    /// Background task that processes cache write messages
    ///
    /// Continuously receives cache write requests from the channel and writes
    /// them to the store. On shutdown signal, drains the remaining queued
    /// messages before exiting.
    async fn cache_writer_task(
        store: Arc<dyn CacheStore>,
        mut write_rx: mpsc::UnboundedReceiver<CacheWriteMessage>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::debug!("Cache writer task started");

        loop {
            tokio::select! {
                msg = write_rx.recv() => {
                    match msg {
                        Some(msg) => {
                            if let Err(e) = store.set(&msg.key, msg.value, msg.ttl).await {
                                tracing::error!(error = %e, key = %msg.key, "Failed to write to cache");
                            }
                        }
                        // All senders dropped, nothing left to write
                        None => break,
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Cache writer shutting down, flushing remaining writes");

                    while let Ok(msg) = write_rx.try_recv() {
                        if let Err(e) = store.set(&msg.key, msg.value, msg.ttl).await {
                            tracing::error!(error = %e, "Failed to flush cache write during shutdown");
                        }
                    }

                    tracing::info!("Cache writer task stopped");
                    break;
                }
            }
        }
    }

    /// Retrieves a JSON-serialized value from the cache by key.
    ///
    /// An absent or empty entry is a miss. An entry that no longer decodes as
    /// `T` is logged and also treated as a miss, so the caller refetches
    /// instead of receiving an error.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let cached = self.store.get(&key.to_string()).await?;

        match cached {
            Some(json) if !json.is_empty() => match serde_json::from_str(&json) {
                Ok(data) => Ok(Some(data)),
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Undecodable cache entry, treating as miss");
                    Ok(None)
                }
            },
            _ => Ok(None),
        }
    }

    /// Stores a value in the cache asynchronously without blocking.
    ///
    /// Serializes the value and hands it to the background writer. Returns
    /// immediately; a serialization or store failure is logged, never
    /// surfaced.
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Cache serialization error");
                return;
            }
        };

        self.send_write(key, json, ttl);
    }

    /// Retrieves a raw cached payload without deserializing it.
    ///
    /// Passthrough counterpart to [`get_json`](Self::get_json) for callers
    /// that cache pre-rendered payloads.
    pub async fn get_raw(&self, key: &CacheKey) -> AppResult<Option<String>> {
        let cached = self.store.get(&key.to_string()).await?;
        Ok(cached.filter(|s| !s.is_empty()))
    }

    /// Stores an already-rendered payload asynchronously without blocking
    pub fn set_raw_in_background(&self, key: &CacheKey, value: String, ttl: u64) {
        self.send_write(key, value, ttl);
    }

    fn send_write(&self, key: &CacheKey, value: String, ttl: u64) {
        let msg = CacheWriteMessage {
            key: key.to_string(),
            value,
            ttl,
        };

        if let Err(e) = self.write_tx.send(msg) {
            tracing::error!(error = %e, "Failed to send cache write message");
        }
    }
}
