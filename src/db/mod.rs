pub mod cache;
pub mod macros;
pub mod memory;
pub mod redis;

pub use cache::{Cache, CacheKey, CacheStore, CacheWriterHandle};
pub use memory::MemoryStore;
pub use redis::{create_redis_client, RedisStore};
