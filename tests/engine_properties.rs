use cinematch_api::{
    engine::{resolver, sentiment, RecommendationEngine},
    models::{Genre, Movie, MovieId, UserRatings},
};

fn movie(id: u64, title: &str, genre: &str, overview: &str) -> Movie {
    let mut movie = Movie::new(id, title);
    movie.genres = vec![Genre {
        id: 0,
        name: genre.to_string(),
    }];
    movie.overview = Some(overview.to_string());
    movie
}

fn scenario() -> Vec<Movie> {
    vec![
        movie(1, "Alpha One", "Action", "A hero fights villains"),
        movie(2, "Alpha Two", "Action", "A hero fights villains again"),
        movie(3, "Beta", "Comedy", "A funny clown performs tricks"),
    ]
}

fn larger_catalog() -> Vec<Movie> {
    vec![
        movie(1, "Space Siege", "Science Fiction", "Marines defend a station from aliens"),
        movie(2, "Space Siege II", "Science Fiction", "Marines defend a colony from aliens"),
        movie(3, "Harbor Blues", "Drama", "A fisherman mourns his brother"),
        movie(4, "Harbor Nights", "Drama", "A fisherman searches for his brother"),
        movie(5, "Station Zero", "Science Fiction", "Aliens board a station"),
        movie(6, "Desert Road", "Western", "A courier crosses the desert"),
        movie(7, "Desert Road Home", "Western", "A courier returns across the desert"),
    ]
}

fn prepared(corpus: Vec<Movie>) -> RecommendationEngine {
    let mut engine = RecommendationEngine::default();
    engine.prepare(corpus);
    engine
}

#[test]
fn test_seed_is_never_recommended() {
    let engine = prepared(larger_catalog());
    for movie in engine.movies().to_vec() {
        let recs = engine.recommend_by_title(&movie.title, 10);
        assert!(recs.iter().all(|r| r.id != movie.id), "{} recommended itself", movie.title);
    }
}

#[test]
fn test_result_size_and_score_bounds() {
    let engine = prepared(larger_catalog());
    for n in 0..10 {
        let recs = engine.recommend_by_title("Harbor Blues", n);
        assert!(recs.len() <= n);
        assert!(recs.iter().all(|r| (-1.0..=1.0).contains(&r.score)));
    }
}

#[test]
fn test_exact_title_resolves_with_full_confidence() {
    let corpus = larger_catalog();
    for (position, movie) in corpus.iter().enumerate() {
        for query in [movie.title.clone(), movie.title.to_uppercase(), movie.title.to_lowercase()] {
            let found = resolver::resolve(&query, &corpus).unwrap();
            assert_eq!(found.confidence, 1.0);
            assert_eq!(corpus[found.position].title, movie.title);
            // Titles here are unique, so the position is the movie's own
            assert_eq!(found.position, position);
        }
    }
}

#[test]
fn test_empty_ratings_give_nothing() {
    let engine = prepared(larger_catalog());
    assert!(engine.recommend_collaborative(&UserRatings::new(), 10).is_empty());
}

#[test]
fn test_liked_titles_never_returned() {
    let engine = prepared(larger_catalog());
    let ratings: UserRatings = [
        ("Space Siege".to_string(), 9.0),
        ("Harbor Nights".to_string(), 4.0),
        ("Desert Road".to_string(), 7.5),
    ]
    .into_iter()
    .collect();

    let recs = engine.recommend_collaborative(&ratings, 10);
    assert!(!recs.is_empty());
    for rec in &recs {
        assert!(!ratings.contains_key(&rec.title), "{} was already rated", rec.title);
    }
}

#[test]
fn test_prepare_is_idempotent() {
    let mut engine = prepared(larger_catalog());
    let first = engine.recommend_by_title("Space Siege", 4);
    engine.prepare(larger_catalog());
    let second = engine.recommend_by_title("Space Siege", 4);
    assert_eq!(first, second);
}

#[test]
fn test_near_duplicate_outranks_other_genre() {
    let engine = prepared(scenario());
    let recs = engine.recommend_by_title("Alpha One", 2);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].id, MovieId(2));
    assert_eq!(recs[1].id, MovieId(3));
}

#[test]
fn test_lowercase_title_resolves_exactly() {
    let found = resolver::resolve("alpha one", &scenario()).unwrap();
    assert_eq!(found.position, 0);
    assert_eq!(found.confidence, 1.0);
}

#[test]
fn test_misspelled_title_resolves_fuzzily() {
    // normalized "alph1 ones" vs "alpha one": LCS 8 over 19 characters
    let found = resolver::resolve("Alph1 Ones", &scenario()).unwrap();
    assert_eq!(found.position, 0);
    assert!((found.confidence - 16.0 / 19.0).abs() < 1e-12);
    assert!(found.confidence >= resolver::MIN_CONFIDENCE && found.confidence < 1.0);

    let engine = prepared(scenario());
    assert_eq!(engine.resolve_title("Alph1 Ones").map(|r| r.id), Some(MovieId(1)));
}

#[test]
fn test_overview_only_sentiment() {
    let mut item = Movie::new(10, "Uplift");
    item.overview = Some("This movie is wonderful and inspiring".to_string());

    let report = sentiment::score(&item);
    assert!(report.review_scores.is_empty());
    assert!(report.overview_polarity > 0.0);
    assert_eq!(report.overall, report.overview_polarity);
}

#[test]
fn test_hybrid_with_only_ratings_is_scaled_collaborative() {
    // Neutral overviews keep every sentiment below the hybrid floor
    let engine = prepared(larger_catalog());
    let ratings: UserRatings = [("Space Siege".to_string(), 8.0), ("Harbor Blues".to_string(), 9.0)]
        .into_iter()
        .collect();
    let n = 3;

    let hybrid = engine.recommend_hybrid(None, Some(&ratings), n);
    let collaborative = engine.recommend_collaborative(&ratings, 2 * n);

    assert_eq!(hybrid.len(), n);
    for (h, c) in hybrid.iter().zip(collaborative.iter()) {
        assert_eq!(h.id, c.id);
        assert_eq!(h.title, c.title);
        assert!((h.score - 0.3 * c.score).abs() < 1e-12);
    }
}

#[test]
fn test_unprepared_and_empty_engines_return_nothing() {
    let engine = RecommendationEngine::default();
    assert!(engine.recommend_by_title("Alpha One", 5).is_empty());

    let engine = prepared(Vec::new());
    assert!(engine.recommend_by_title("Alpha One", 5).is_empty());
    assert!(engine.recommend_by_sentiment(-1.0, 5).is_empty());
    assert!(engine.recommend_hybrid(Some("Alpha One"), None, 5).is_empty());
}
