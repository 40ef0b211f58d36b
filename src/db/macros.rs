/// A macro to simplify cache-through reads.
///
/// Checks whether a value is present in the cache. If found, it returns the
/// cached value. If not found, it executes the provided block to compute the
/// value, stores the result in the cache, and returns it.
///
/// A block error propagates immediately and nothing is stored, so failures
/// are never served from cache. The fresh value is returned regardless of
/// whether the store accepts the write.
///
/// # Arguments
/// * `$cache`: The cache instance, with `get_json` and `set_in_background` methods.
/// * `$key`: The [`CacheKey`](crate::db::CacheKey) under which the value lives.
/// * `$ttl`: The time-to-live for the cached value in seconds.
/// * `$block`: The block to execute when the value is not in cache.
///
/// # Example
/// ```rust,no_run
/// # use nexus_api::cached;
/// # use nexus_api::db::{Cache, CacheKey};
/// # use nexus_api::error::AppResult;
/// # async fn fetch_from_upstream() -> AppResult<Vec<String>> { unimplemented!() }
/// # async fn demo(cache: Cache, cache_key: CacheKey) -> AppResult<Vec<String>> {
/// let movies = cached!(cache, cache_key, 3600, async move {
///     fetch_from_upstream().await
/// });
/// # movies
/// # }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        // Attempt to get the value from cache
        if let Some(cached) = $cache.get_json(&$key).await? {
            Ok(cached)
        } else {
            // If not in cache, execute the block to compute the value
            let value = $block.await?;
            // Store the computed value in cache
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
