/// Read-through caching around an async provider call.
///
/// Returns the cached value when present. Otherwise awaits `$block`, queues
/// its result for a background write and returns it. A failed cache read is
/// logged and treated as a miss, so an unreachable Redis never fails a call.
///
/// # Arguments
/// * `$cache`: a [`Cache`](crate::db::Cache)
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) of the value
/// * `$ttl`: time-to-live in seconds
/// * `$block`: future computing the value on a miss
///
/// # Example
/// ```rust,ignore
/// async fn details(&self, id: MovieId) -> AppResult<TmdbMovie> {
///     cached!(self.cache, CacheKey::MovieDetails(id), DETAILS_CACHE_TTL, async move {
///         self.get_json(&format!("movie/{}", id), &[]).await
///     })
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            lookup => {
                if let Err(e) = lookup {
                    ::tracing::warn!(error = %e, key = %key, "Cache read failed, fetching directly");
                }
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
