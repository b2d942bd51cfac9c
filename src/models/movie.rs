use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// TMDB movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A genre as an id/name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// A critic or user review excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub content: String,
}

/// Canonical movie record consumed by the recommendation engine.
///
/// Every provider-specific shape is converted into this one at the boundary
/// (see `models::TmdbMovie`), so the engine never branches on field layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Billing-ordered cast names
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub director: Option<String>,
    /// Vote average on a 0-10 scale
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Movie {
    /// Creates a movie with only the required fields set
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
            genres: Vec::new(),
            overview: None,
            keywords: Vec::new(),
            cast: Vec::new(),
            director: None,
            rating: None,
            vote_count: None,
            popularity: None,
            release_date: None,
            runtime: None,
            original_language: None,
            reviews: Vec::new(),
        }
    }

    /// Release year, if the release date is known
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// Synopsis text, empty when absent
    pub fn overview_text(&self) -> &str {
        self.overview.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(603)), "603");
    }

    #[test]
    fn test_movie_id_serializes_as_number() {
        let json = serde_json::to_string(&MovieId(27205)).unwrap();
        assert_eq!(json, "27205");
    }

    #[test]
    fn test_release_year() {
        let mut movie = Movie::new(1, "Inception");
        assert_eq!(movie.release_year(), None);

        movie.release_date = NaiveDate::from_ymd_opt(2010, 7, 15);
        assert_eq!(movie.release_year(), Some(2010));
    }

    #[test]
    fn test_movie_deserializes_with_missing_optional_fields() {
        let movie: Movie = serde_json::from_str(r#"{"id": 7, "title": "Bare"}"#).unwrap();
        assert_eq!(movie.id, MovieId(7));
        assert!(movie.genres.is_empty());
        assert_eq!(movie.overview_text(), "");
    }
}
