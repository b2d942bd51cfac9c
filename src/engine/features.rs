//! Composition of a movie into the bag-of-terms text indexed by TF-IDF.

use crate::models::Movie;

/// How many times the title is repeated to upweight it
const TITLE_REPEAT: usize = 3;

/// Only the top-billed cast members contribute
const MAX_CAST: usize = 5;

/// Builds the lower-cased feature string for a movie.
///
/// Field order: title (repeated), genre names, overview, keywords, top cast,
/// director. Missing or blank fields are skipped without placeholders.
pub fn compose(movie: &Movie) -> String {
    let mut parts: Vec<&str> = Vec::new();

    let title = movie.title.trim();
    if !title.is_empty() {
        parts.extend(std::iter::repeat(title).take(TITLE_REPEAT));
    }

    parts.extend(movie.genres.iter().map(|g| g.name.as_str()));

    if let Some(overview) = movie.overview.as_deref() {
        parts.push(overview);
    }

    parts.extend(movie.keywords.iter().map(String::as_str));
    parts.extend(movie.cast.iter().take(MAX_CAST).map(String::as_str));

    if let Some(director) = movie.director.as_deref() {
        parts.push(director);
    }

    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
