use serde::{Deserialize, Serialize};

use super::{Movie, MovieId, UserRatings};

/// Personal watchlist with watched history and ratings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Watchlist {
    /// Movies queued to watch
    pub queued: Vec<Movie>,
    /// Movies already watched, oldest first
    pub watched: Vec<Movie>,
    /// Ratings recorded when marking movies as watched, keyed by title
    pub ratings: UserRatings,
}

impl Watchlist {
    /// Creates an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a movie. Returns `false` if it was already queued.
    pub fn add(&mut self, movie: Movie) -> bool {
        if self.queued.iter().any(|m| m.id == movie.id) {
            return false;
        }
        self.queued.push(movie);
        true
    }

    /// Removes a movie from the queue. Returns `false` if it wasn't queued.
    pub fn remove(&mut self, id: MovieId) -> bool {
        let before = self.queued.len();
        self.queued.retain(|m| m.id != id);
        self.queued.len() != before
    }

    /// Moves a queued movie to the watched list, recording the rating if given.
    ///
    /// Returns the watched movie, or `None` if it wasn't queued.
    pub fn mark_watched(&mut self, id: MovieId, rating: Option<f64>) -> Option<&Movie> {
        let position = self.queued.iter().position(|m| m.id == id)?;
        let movie = self.queued.remove(position);

        if let Some(rating) = rating {
            self.ratings.insert(movie.title.clone(), rating.clamp(0.0, 10.0));
        }

        self.watched.push(movie);
        self.watched.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_watchlist() {
        let watchlist = Watchlist::new();
        assert!(watchlist.queued.is_empty());
        assert!(watchlist.watched.is_empty());
        assert!(watchlist.ratings.is_empty());
    }

    #[test]
    fn test_add_duplicate_movie() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.add(Movie::new(603, "The Matrix")));
        assert!(!watchlist.add(Movie::new(603, "The Matrix")));
        assert_eq!(watchlist.queued.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut watchlist = Watchlist::new();
        watchlist.add(Movie::new(603, "The Matrix"));
        assert!(watchlist.remove(MovieId(603)));
        assert!(!watchlist.remove(MovieId(603)));
        assert!(watchlist.queued.is_empty());
    }

    #[test]
    fn test_mark_watched_records_rating() {
        let mut watchlist = Watchlist::new();
        watchlist.add(Movie::new(603, "The Matrix"));
        watchlist.add(Movie::new(27205, "Inception"));

        let watched = watchlist.mark_watched(MovieId(603), Some(9.0)).unwrap();
        assert_eq!(watched.title, "The Matrix");
        assert_eq!(watchlist.queued.len(), 1);
        assert_eq!(watchlist.watched.len(), 1);
        assert_eq!(watchlist.ratings.get("The Matrix"), Some(&9.0));
    }

    #[test]
    fn test_mark_watched_without_rating() {
        let mut watchlist = Watchlist::new();
        watchlist.add(Movie::new(27205, "Inception"));
        assert!(watchlist.mark_watched(MovieId(27205), None).is_some());
        assert!(watchlist.ratings.is_empty());
    }

    #[test]
    fn test_mark_watched_unknown_movie() {
        let mut watchlist = Watchlist::new();
        assert!(watchlist.mark_watched(MovieId(1), Some(5.0)).is_none());
    }
}
