//! Movie metadata sources.
//!
//! The recommendation core never talks to a provider; the services layer
//! pulls catalog data through this trait and hands plain [`Movie`] values to
//! the engine.
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId, MovieList},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Concurrent detail fetches allowed when a provider sets no limit
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// Full details of one movie, including credits, keywords and reviews
    async fn movie_details(&self, id: MovieId) -> AppResult<Movie>;

    /// One page (1-based) of a curated list. Entries carry summary data only.
    async fn list_movies(&self, list: MovieList, page: u32) -> AppResult<Vec<Movie>>;

    /// Fetch details for several movies in parallel
    ///
    /// At most [`max_concurrency`](Self::max_concurrency) lookups are in
    /// flight at once. Results keep the order of `ids`; failed lookups are
    /// logged and skipped. Fails only if every lookup failed.
    async fn movie_details_batch(&self, ids: Vec<MovieId>) -> AppResult<Vec<Movie>> {
        let permits = Arc::new(Semaphore::new(self.max_concurrency().max(1)));
        let mut tasks = Vec::with_capacity(ids.len());

        for id in ids {
            let provider = self.clone_for_task();
            let permits = Arc::clone(&permits);
            let task = tokio::spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|e| {
                    AppError::Internal(format!("Failed to acquire fetch permit: {}", e))
                })?;
                provider.movie_details(id).await
            });
            tasks.push((id, task));
        }

        let mut results = Vec::new();
        let mut errors = Vec::new();

        for (id, task) in tasks {
            match task.await {
                Ok(Ok(movie)) => results.push(movie),
                Ok(Err(e)) => {
                    tracing::error!(error = %e, movie_id = %id, "Movie details fetch failed");
                    errors.push(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, movie_id = %id, "Task join error");
                    errors.push(AppError::Internal(e.to_string()));
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(
                success_count = results.len(),
                error_count = errors.len(),
                provider = self.name(),
                "Partial movie details fetch failure"
            );
        }

        if results.is_empty() && !errors.is_empty() {
            return Err(AppError::ExternalApi(
                "Failed to fetch any movie details".to_string(),
            ));
        }

        Ok(results)
    }

    /// Upper bound on concurrent requests in batch fetches
    fn max_concurrency(&self) -> usize {
        DEFAULT_MAX_CONCURRENCY
    }

    /// Clone provider for parallel task execution
    fn clone_for_task(&self) -> Box<dyn MetadataProvider>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Serves details for ids below 100, fails the rest
    #[derive(Clone)]
    struct PartialProvider;

    #[async_trait::async_trait]
    impl MetadataProvider for PartialProvider {
        async fn search_movies(&self, _query: &str) -> AppResult<Vec<Movie>> {
            Ok(Vec::new())
        }

        async fn movie_details(&self, id: MovieId) -> AppResult<Movie> {
            if id.0 < 100 {
                Ok(Movie::new(id.0, &format!("Movie {}", id.0)))
            } else {
                Err(AppError::NotFound(format!("movie {}", id)))
            }
        }

        async fn list_movies(&self, _list: MovieList, _page: u32) -> AppResult<Vec<Movie>> {
            Ok(Vec::new())
        }

        fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
            Box::new(self.clone())
        }

        fn name(&self) -> &'static str {
            "partial"
        }
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_skips_failures() {
        let ids = vec![MovieId(3), MovieId(500), MovieId(1), MovieId(2)];
        let movies = PartialProvider.movie_details_batch(ids).await.unwrap();

        let ids: Vec<MovieId> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MovieId(3), MovieId(1), MovieId(2)]);
    }

    #[tokio::test]
    async fn test_batch_fails_when_everything_fails() {
        let result = PartialProvider
            .movie_details_batch(vec![MovieId(100), MovieId(200)])
            .await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let movies = PartialProvider.movie_details_batch(Vec::new()).await.unwrap();
        assert!(movies.is_empty());
    }

    /// Records how many lookups run at the same time
    #[derive(Clone)]
    struct CountingProvider {
        limit: usize,
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl MetadataProvider for CountingProvider {
        async fn search_movies(&self, _query: &str) -> AppResult<Vec<Movie>> {
            Ok(Vec::new())
        }

        async fn movie_details(&self, id: MovieId) -> AppResult<Movie> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(Movie::new(id.0, &format!("Movie {}", id.0)))
        }

        async fn list_movies(&self, _list: MovieList, _page: u32) -> AppResult<Vec<Movie>> {
            Ok(Vec::new())
        }

        fn max_concurrency(&self) -> usize {
            self.limit
        }

        fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
            Box::new(self.clone())
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn counting(limit: usize) -> CountingProvider {
        CountingProvider {
            limit,
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_batch_respects_concurrency_limit() {
        let provider = counting(3);
        let ids: Vec<MovieId> = (1..=40).map(MovieId).collect();

        let movies = provider.movie_details_batch(ids).await.unwrap();

        assert_eq!(movies.len(), 40);
        assert!(provider.peak.load(Ordering::SeqCst) <= 3);
        assert!(provider.peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_batch_zero_limit_still_progresses() {
        let provider = counting(0);
        let ids: Vec<MovieId> = (1..=5).map(MovieId).collect();

        let movies = provider.movie_details_batch(ids).await.unwrap();

        assert_eq!(movies.len(), 5);
        assert_eq!(provider.peak.load(Ordering::SeqCst), 1);
    }
}
