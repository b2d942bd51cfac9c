//! Side-by-side comparison of a handful of movies.

use serde::Serialize;

use crate::models::{Movie, MovieId};

/// Genres shown per movie in a comparison row
const ROW_GENRES: usize = 3;

/// One movie's column in a comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub votes: u32,
    /// Rounded to one decimal
    pub popularity: f64,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
}

impl From<&Movie> for ComparisonRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.release_year(),
            rating: movie.rating.unwrap_or(0.0),
            votes: movie.vote_count.unwrap_or(0),
            popularity: (movie.popularity.unwrap_or(0.0) * 10.0).round() / 10.0,
            runtime: movie.runtime,
            genres: movie
                .genres
                .iter()
                .filter(|g| !g.name.is_empty())
                .take(ROW_GENRES)
                .map(|g| g.name.clone())
                .collect(),
        }
    }
}

/// What two movies have in common
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSimilarities {
    /// Shared genre names, in the first movie's order
    pub shared_genres: Vec<String>,
    /// Shared cast members, in the first movie's billing order
    pub shared_cast: Vec<String>,
    /// Absolute rating gap; a missing rating counts as 0
    pub rating_difference: f64,
    /// `None` when either release year is unknown
    pub years_apart: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieComparison {
    pub movies: Vec<ComparisonRow>,
    /// Only set when exactly two movies are compared
    pub similarities: Option<PairSimilarities>,
}

pub fn similarities(first: &Movie, second: &Movie) -> PairSimilarities {
    let mut shared_genres: Vec<String> = Vec::new();
    for genre in &first.genres {
        let shared = !genre.name.is_empty()
            && second.genres.iter().any(|g| g.name == genre.name)
            && !shared_genres.contains(&genre.name);
        if shared {
            shared_genres.push(genre.name.clone());
        }
    }

    let mut shared_cast: Vec<String> = Vec::new();
    for member in &first.cast {
        if second.cast.contains(member) && !shared_cast.contains(member) {
            shared_cast.push(member.clone());
        }
    }

    let years_apart = match (first.release_year(), second.release_year()) {
        (Some(a), Some(b)) => Some(a.abs_diff(b)),
        _ => None,
    };

    PairSimilarities {
        shared_genres,
        shared_cast,
        rating_difference: (first.rating.unwrap_or(0.0) - second.rating.unwrap_or(0.0)).abs(),
        years_apart,
    }
}

pub fn compare(movies: &[Movie]) -> MovieComparison {
    let similarities = match movies {
        [first, second] => Some(similarities(first, second)),
        _ => None,
    };

    MovieComparison {
        movies: movies.iter().map(ComparisonRow::from).collect(),
        similarities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use chrono::NaiveDate;

    fn genre(id: u32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn heat() -> Movie {
        let mut movie = Movie::new(949, "Heat");
        movie.genres = vec![
            genre(80, "Crime"),
            genre(18, "Drama"),
            genre(28, "Action"),
            genre(53, "Thriller"),
        ];
        movie.cast = vec!["Al Pacino".to_string(), "Robert De Niro".to_string()];
        movie.rating = Some(7.9);
        movie.vote_count = Some(7000);
        movie.popularity = Some(45.678);
        movie.release_date = NaiveDate::from_ymd_opt(1995, 12, 15);
        movie.runtime = Some(170);
        movie
    }

    fn irishman() -> Movie {
        let mut movie = Movie::new(398978, "The Irishman");
        movie.genres = vec![genre(18, "Drama"), genre(80, "Crime"), genre(36, "History")];
        movie.cast = vec![
            "Robert De Niro".to_string(),
            "Al Pacino".to_string(),
            "Joe Pesci".to_string(),
        ];
        movie.rating = Some(7.6);
        movie.release_date = NaiveDate::from_ymd_opt(2019, 11, 1);
        movie
    }

    #[test]
    fn test_row_from_movie() {
        let row = ComparisonRow::from(&heat());
        assert_eq!(row.year, Some(1995));
        assert_eq!(row.popularity, 45.7);
        assert_eq!(row.runtime, Some(170));
        assert_eq!(row.genres, vec!["Crime", "Drama", "Action"]);

        let bare = ComparisonRow::from(&Movie::new(1, "Unknown"));
        assert_eq!(bare.rating, 0.0);
        assert_eq!(bare.votes, 0);
        assert_eq!(bare.year, None);
        assert!(bare.genres.is_empty());
    }

    #[test]
    fn test_pair_similarities() {
        let found = similarities(&heat(), &irishman());
        assert_eq!(found.shared_genres, vec!["Crime", "Drama"]);
        assert_eq!(found.shared_cast, vec!["Al Pacino", "Robert De Niro"]);
        assert!((found.rating_difference - 0.3).abs() < 1e-9);
        assert_eq!(found.years_apart, Some(24));
    }

    #[test]
    fn test_unknown_year_and_rating() {
        let found = similarities(&heat(), &Movie::new(2, "Mystery"));
        assert!(found.shared_genres.is_empty());
        assert!((found.rating_difference - 7.9).abs() < 1e-9);
        assert_eq!(found.years_apart, None);
    }

    #[test]
    fn test_similarities_only_for_pairs() {
        let pair = compare(&[heat(), irishman()]);
        assert_eq!(pair.movies.len(), 2);
        assert!(pair.similarities.is_some());

        let three = compare(&[heat(), irishman(), Movie::new(3, "Third")]);
        assert_eq!(three.movies.len(), 3);
        assert!(three.similarities.is_none());
    }
}
