//! Attribute filters over the prepared catalog.

use crate::models::Movie;

/// Conjunction of optional movie attribute constraints.
///
/// Unset fields don't constrain. Year and decade bounds exclude movies with
/// no release date; runtime bounds exclude movies with no runtime. Missing
/// rating and vote counts are read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    /// First year of a decade, e.g. 1990
    pub decade: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub min_votes: Option<u32>,
    pub min_runtime: Option<u32>,
    pub max_runtime: Option<u32>,
    pub languages: Vec<String>,
    pub genre_ids: Vec<u32>,
    pub genre_names: Vec<String>,
    pub actors: Vec<String>,
    pub director: Option<String>,
    pub min_popularity: Option<f64>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        self.matches_year(movie)
            && self.matches_quality(movie)
            && self.matches_runtime(movie)
            && self.matches_language(movie)
            && self.matches_genres(movie)
            && self.matches_people(movie)
    }

    /// Movies passing every constraint, in input order
    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        movies.iter().filter(|m| self.matches(m)).collect()
    }

    fn year_bounds(&self) -> (Option<i32>, Option<i32>) {
        let (decade_min, decade_max) = match self.decade {
            Some(decade) => (Some(decade), Some(decade.saturating_add(9))),
            None => (None, None),
        };
        let min = match (self.min_year, decade_min) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let max = match (self.max_year, decade_max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        (min, max)
    }

    fn matches_year(&self, movie: &Movie) -> bool {
        let (min, max) = self.year_bounds();
        if min.is_none() && max.is_none() {
            return true;
        }
        let Some(year) = movie.release_year() else {
            return false;
        };
        min.map_or(true, |m| year >= m) && max.map_or(true, |m| year <= m)
    }

    fn matches_quality(&self, movie: &Movie) -> bool {
        let rating = movie.rating.unwrap_or(0.0);
        let votes = movie.vote_count.unwrap_or(0);
        let popularity = movie.popularity.unwrap_or(0.0);

        self.min_rating.map_or(true, |m| rating >= m)
            && self.max_rating.map_or(true, |m| rating <= m)
            && self.min_votes.map_or(true, |m| votes >= m)
            && self.min_popularity.map_or(true, |m| popularity >= m)
    }

    fn matches_runtime(&self, movie: &Movie) -> bool {
        if self.min_runtime.is_none() && self.max_runtime.is_none() {
            return true;
        }
        let Some(runtime) = movie.runtime else {
            return false;
        };
        self.min_runtime.map_or(true, |m| runtime >= m)
            && self.max_runtime.map_or(true, |m| runtime <= m)
    }

    fn matches_language(&self, movie: &Movie) -> bool {
        if self.languages.is_empty() {
            return true;
        }
        movie
            .original_language
            .as_deref()
            .is_some_and(|lang| self.languages.iter().any(|l| l.eq_ignore_ascii_case(lang)))
    }

    fn matches_genres(&self, movie: &Movie) -> bool {
        if self.genre_ids.is_empty() && self.genre_names.is_empty() {
            return true;
        }
        let by_id = movie.genres.iter().any(|g| self.genre_ids.contains(&g.id));
        let by_name = movie.genres.iter().any(|g| {
            !g.name.is_empty()
                && self
                    .genre_names
                    .iter()
                    .any(|name| name.to_lowercase() == g.name.to_lowercase())
        });
        by_id || by_name
    }

    fn matches_people(&self, movie: &Movie) -> bool {
        let cast_ok = self.actors.is_empty()
            || movie.cast.iter().any(|member| {
                let member = member.to_lowercase();
                self.actors.iter().any(|a| a.to_lowercase() == member)
            });

        let director_ok = match self.director.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(wanted) => movie
                .director
                .as_deref()
                .is_some_and(|d| d.to_lowercase() == wanted.to_lowercase()),
        };

        cast_ok && director_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use chrono::NaiveDate;

    fn movie(id: u64, year: Option<i32>) -> Movie {
        let mut movie = Movie::new(id, format!("Movie {}", id));
        movie.release_date = year.and_then(|y| NaiveDate::from_ymd_opt(y, 6, 1));
        movie
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let movies = vec![movie(1, None), movie(2, Some(1999))];
        assert_eq!(MovieFilter::default().apply(&movies).len(), 2);
    }

    #[test]
    fn test_year_range_excludes_undated() {
        let movies = vec![movie(1, None), movie(2, Some(1999)), movie(3, Some(2005))];
        let filter = MovieFilter {
            min_year: Some(1995),
            max_year: Some(2000),
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_decade() {
        let movies = vec![movie(1, Some(1989)), movie(2, Some(1990)), movie(3, Some(1999)), movie(4, Some(2000))];
        let filter = MovieFilter {
            decade: Some(1990),
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_decade_at_integer_limit() {
        let movies = vec![movie(1, Some(1990))];
        let filter = MovieFilter {
            decade: Some(i32::MAX),
            ..Default::default()
        };
        assert_eq!(filter.year_bounds(), (Some(i32::MAX), Some(i32::MAX)));
        assert!(filter.apply(&movies).is_empty());
    }

    #[test]
    fn test_rating_and_votes() {
        let mut good = movie(1, None);
        good.rating = Some(8.1);
        good.vote_count = Some(5000);
        let mut obscure = movie(2, None);
        obscure.rating = Some(9.0);
        obscure.vote_count = Some(3);
        let unrated = movie(3, None);

        let movies = vec![good, obscure, unrated];
        let filter = MovieFilter {
            min_rating: Some(7.5),
            min_votes: Some(100),
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_runtime_excludes_unknown() {
        let mut short = movie(1, None);
        short.runtime = Some(85);
        let mut long = movie(2, None);
        long.runtime = Some(190);
        let unknown = movie(3, None);

        let movies = vec![short, long, unknown];
        let filter = MovieFilter {
            max_runtime: Some(120),
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_genres_by_id_or_name() {
        let mut action = movie(1, None);
        action.genres = vec![Genre { id: 28, name: "Action".to_string() }];
        let mut summary = movie(2, None);
        summary.genres = vec![Genre { id: 35, name: String::new() }];
        let mut drama = movie(3, None);
        drama.genres = vec![Genre { id: 18, name: "Drama".to_string() }];

        let movies = vec![action, summary, drama];
        let filter = MovieFilter {
            genre_ids: vec![35],
            genre_names: vec!["action".to_string()],
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_people_and_language() {
        let mut a = movie(1, None);
        a.cast = vec!["Keanu Reeves".to_string()];
        a.director = Some("Lana Wachowski".to_string());
        a.original_language = Some("en".to_string());
        let mut b = movie(2, None);
        b.cast = vec!["Keanu Reeves".to_string()];
        b.director = Some("Chad Stahelski".to_string());
        b.original_language = Some("en".to_string());

        let movies = vec![a, b];
        let filter = MovieFilter {
            actors: vec!["keanu reeves".to_string()],
            director: Some("LANA WACHOWSKI".to_string()),
            languages: vec!["EN".to_string()],
            ..Default::default()
        };
        let ids: Vec<u64> = filter.apply(&movies).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1]);
    }
}
