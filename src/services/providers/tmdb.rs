/// TMDB (The Movie Database) provider
///
/// Search, curated lists and full movie details from the TMDB v3 API. Every
/// response is cached in Redis in its raw wire shape and converted to
/// [`Movie`] on the way out.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Movie, MovieId, MovieList, TmdbMovie, TmdbPage},
    services::providers::{MetadataProvider, DEFAULT_MAX_CONCURRENCY},
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const LIST_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 604800; // 1 week

/// Extra sub-resources requested with movie details
const DETAILS_APPENDS: &str = "credits,keywords,reviews";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
    max_concurrency: usize,
}

impl TmdbProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Caps concurrent TMDB requests during batch fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    /// GET a TMDB resource and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {}", path)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn search_page(&self, query: &str) -> AppResult<TmdbPage<TmdbMovie>> {
        cached!(
            self.cache,
            CacheKey::MovieSearch(query.to_string()),
            SEARCH_CACHE_TTL,
            async move {
                self.get_json(
                    "search/movie",
                    &[("query", query), ("include_adult", "false")],
                )
                .await
            }
        )
    }

    async fn details(&self, id: MovieId) -> AppResult<TmdbMovie> {
        cached!(
            self.cache,
            CacheKey::MovieDetails(id),
            DETAILS_CACHE_TTL,
            async move {
                self.get_json(
                    &format!("movie/{}", id),
                    &[("append_to_response", DETAILS_APPENDS)],
                )
                .await
            }
        )
    }

    async fn list_page(&self, list: MovieList, page: u32) -> AppResult<TmdbPage<TmdbMovie>> {
        cached!(
            self.cache,
            CacheKey::MovieList(list, page),
            LIST_CACHE_TTL,
            async move {
                let page = page.to_string();
                self.get_json(list.path(), &[("page", page.as_str())]).await
            }
        )
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page = self.search_page(query).await?;
        let movies: Vec<Movie> = page.results.into_iter().map(Movie::from).collect();

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<Movie> {
        let movie = Movie::from(self.details(id).await?);

        tracing::debug!(
            movie_id = %id,
            reviews = movie.reviews.len(),
            keywords = movie.keywords.len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(movie)
    }

    async fn list_movies(&self, list: MovieList, page: u32) -> AppResult<Vec<Movie>> {
        if page == 0 {
            return Err(AppError::InvalidInput("Pages start at 1".to_string()));
        }

        let page_data = self.list_page(list, page).await?;

        tracing::info!(
            list = %list,
            page = page,
            results = page_data.results.len(),
            provider = "tmdb",
            "Movie list fetched"
        );

        Ok(page_data.results.into_iter().map(Movie::from).collect())
    }

    fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
