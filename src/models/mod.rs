use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

mod movie;
mod recommendation;
mod watchlist;

pub use movie::{Genre, Movie, MovieId, Review};
pub use recommendation::{
    Recommendation, ResolvedTitle, ReviewSentiment, SentimentLabel, SentimentRecommendation,
    SentimentReport, Strategy, UserRatings,
};
pub use watchlist::Watchlist;

/// Curated movie lists exposed by the metadata provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieList {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
    TrendingDay,
    TrendingWeek,
}

impl MovieList {
    /// Provider path for this list, relative to the API root
    pub fn path(&self) -> &'static str {
        match self {
            MovieList::Popular => "movie/popular",
            MovieList::TopRated => "movie/top_rated",
            MovieList::NowPlaying => "movie/now_playing",
            MovieList::Upcoming => "movie/upcoming",
            MovieList::TrendingDay => "trending/movie/day",
            MovieList::TrendingWeek => "trending/movie/week",
        }
    }
}

impl Display for MovieList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MovieList::Popular => "popular",
            MovieList::TopRated => "top_rated",
            MovieList::NowPlaying => "now_playing",
            MovieList::Upcoming => "upcoming",
            MovieList::TrendingDay => "trending_day",
            MovieList::TrendingWeek => "trending_week",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged list response (search, popular, top rated, trending, reviews)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
}

/// Raw movie payload from TMDB.
///
/// List endpoints return a flat summary (`genre_ids`), the details endpoint
/// returns nested `genres`, `credits`, `keywords` and `reviews`. Some cached
/// payloads carry a flattened `cast`/`director` instead of `credits`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub keywords: Option<TmdbKeywords>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub cast: Option<Vec<TmdbCastEntry>>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub reviews: Option<TmdbPage<TmdbReview>>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub original_language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbGenre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbKeywords {
    #[serde(default)]
    pub keywords: Vec<TmdbNamed>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbNamed {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbNamed>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

/// Flat cast entry: either `{"name": ..}` or a bare string
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TmdbCastEntry {
    Named { name: String },
    Plain(String),
}

impl TmdbCastEntry {
    fn into_name(self) -> String {
        match self {
            TmdbCastEntry::Named { name } => name,
            TmdbCastEntry::Plain(name) => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbReview {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<TmdbMovie> for Movie {
    fn from(raw: TmdbMovie) -> Self {
        let genres = if raw.genres.is_empty() {
            raw.genre_ids
                .into_iter()
                .map(|id| Genre {
                    id,
                    name: String::new(),
                })
                .collect()
        } else {
            raw.genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect()
        };

        let keywords = raw
            .keywords
            .map(|k| k.keywords.into_iter().map(|k| k.name).collect())
            .unwrap_or_default();

        // Prefer nested credits, fall back to the flattened shape
        let (credit_cast, credit_director) = match raw.credits {
            Some(credits) => {
                let director = credits
                    .crew
                    .into_iter()
                    .find(|member| member.job.as_deref() == Some("Director"))
                    .map(|member| member.name);
                let cast: Vec<String> = credits.cast.into_iter().map(|c| c.name).collect();
                (cast, director)
            }
            None => (Vec::new(), None),
        };

        let cast = if credit_cast.is_empty() {
            raw.cast
                .unwrap_or_default()
                .into_iter()
                .map(TmdbCastEntry::into_name)
                .collect()
        } else {
            credit_cast
        };

        let director = credit_director.or(raw.director).filter(|d| !d.trim().is_empty());

        let reviews = raw
            .reviews
            .map(|page| {
                page.results
                    .into_iter()
                    .map(|r| Review {
                        author: r.author.unwrap_or_else(|| "Anonymous".to_string()),
                        content: r.content.unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let release_date = raw
            .release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Movie {
            id: MovieId(raw.id),
            title: raw.title,
            genres,
            overview: raw.overview.filter(|o| !o.trim().is_empty()),
            keywords,
            cast,
            director,
            rating: raw.vote_average,
            vote_count: raw.vote_count,
            popularity: raw.popularity,
            release_date,
            runtime: raw.runtime.filter(|r| *r > 0),
            original_language: raw.original_language,
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_list_paths() {
        assert_eq!(MovieList::Popular.path(), "movie/popular");
        assert_eq!(MovieList::TrendingWeek.path(), "trending/movie/week");
        assert_eq!(format!("{}", MovieList::TopRated), "top_rated");
    }

    #[test]
    fn test_details_payload_to_movie() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "A hacker learns the truth about reality.",
            "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
            "keywords": {"keywords": [{"id": 1, "name": "simulation"}]},
            "credits": {
                "cast": [{"name": "Keanu Reeves"}, {"name": "Carrie-Anne Moss"}],
                "crew": [{"name": "Joel Silver", "job": "Producer"}, {"name": "Lana Wachowski", "job": "Director"}]
            },
            "reviews": {"page": 1, "results": [{"author": "critic", "content": "Great fun."}, {"content": "Loved it."}]},
            "vote_average": 8.2,
            "vote_count": 25000,
            "release_date": "1999-03-30",
            "runtime": 136,
            "original_language": "en"
        }"#;

        let raw: TmdbMovie = serde_json::from_str(json).unwrap();
        let movie: Movie = raw.into();

        assert_eq!(movie.id, MovieId(603));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.genres[1].name, "Science Fiction");
        assert_eq!(movie.keywords, vec!["simulation".to_string()]);
        assert_eq!(movie.cast, vec!["Keanu Reeves", "Carrie-Anne Moss"]);
        assert_eq!(movie.director.as_deref(), Some("Lana Wachowski"));
        assert_eq!(movie.reviews.len(), 2);
        assert_eq!(movie.reviews[1].author, "Anonymous");
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(movie.runtime, Some(136));
    }

    #[test]
    fn test_flat_cast_and_director() {
        let json = r#"{
            "id": 1,
            "title": "Flat",
            "cast": [{"name": "Actor One"}, "Actor Two"],
            "director": "Someone"
        }"#;

        let movie: Movie = serde_json::from_str::<TmdbMovie>(json).unwrap().into();
        assert_eq!(movie.cast, vec!["Actor One", "Actor Two"]);
        assert_eq!(movie.director.as_deref(), Some("Someone"));
    }

    #[test]
    fn test_empty_credits_fall_back_to_flat_cast() {
        let json = r#"{
            "id": 2,
            "title": "Mixed",
            "credits": {"cast": [], "crew": []},
            "cast": ["Fallback Actor"]
        }"#;

        let movie: Movie = serde_json::from_str::<TmdbMovie>(json).unwrap().into();
        assert_eq!(movie.cast, vec!["Fallback Actor"]);
        assert_eq!(movie.director, None);
    }

    #[test]
    fn test_list_summary_to_movie() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "genre_ids": [28, 878],
            "release_date": "",
            "overview": "  ",
            "runtime": 0
        }"#;

        let movie: Movie = serde_json::from_str::<TmdbMovie>(json).unwrap().into();
        assert_eq!(movie.genres.iter().map(|g| g.id).collect::<Vec<_>>(), vec![28, 878]);
        assert!(movie.genres.iter().all(|g| g.name.is_empty()));
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.overview, None);
        assert_eq!(movie.runtime, None);
    }

    #[test]
    fn test_page_deserialization_defaults() {
        let page: TmdbPage<TmdbMovie> = serde_json::from_str(r#"{"page": 2}"#).unwrap();
        assert_eq!(page.page, 2);
        assert!(page.results.is_empty());
    }
}
