//! Lexicon-based sentiment scoring.
//!
//! Each lexicon hit contributes a `(polarity, subjectivity)` assessment.
//! A preceding intensifier ("very", "really", ...) scales it, and a negator
//! within the last three tokens flips and halves the polarity. The text score
//! is the mean of all assessments; text without any hit scores `(0, 0)`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{Movie, ReviewSentiment, SentimentLabel, SentimentRecommendation, SentimentReport};

/// Reviews considered per movie
const MAX_REVIEWS: usize = 5;

/// Review text is truncated to this many characters before scoring
const MAX_REVIEW_CHARS: usize = 1000;

const EXCERPT_CHARS: usize = 200;

const OVERVIEW_WEIGHT: f64 = 0.3;
const REVIEW_WEIGHT: f64 = 0.7;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

static LEXICON: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    [
        // positive
        ("amazing", (0.6, 0.9)),
        ("awesome", (1.0, 1.0)),
        ("beautiful", (0.85, 1.0)),
        ("beautifully", (0.85, 1.0)),
        ("best", (1.0, 0.3)),
        ("better", (0.5, 0.5)),
        ("brave", (0.8, 1.0)),
        ("brilliant", (0.9, 1.0)),
        ("brilliantly", (0.9, 1.0)),
        ("captivating", (0.6, 0.8)),
        ("charming", (0.5, 0.8)),
        ("clever", (0.5, 0.8)),
        ("compelling", (0.4, 0.6)),
        ("delightful", (1.0, 1.0)),
        ("enjoy", (0.4, 0.5)),
        ("enjoyable", (0.4, 0.5)),
        ("enjoyed", (0.4, 0.5)),
        ("engaging", (0.4, 0.6)),
        ("entertaining", (0.5, 0.5)),
        ("epic", (0.3, 0.7)),
        ("excellent", (1.0, 1.0)),
        ("exciting", (0.3, 0.8)),
        ("fantastic", (0.4, 0.9)),
        ("favorite", (0.5, 1.0)),
        ("fresh", (0.3, 0.5)),
        ("friendly", (0.375, 0.5)),
        ("fun", (0.3, 0.2)),
        ("funny", (0.25, 1.0)),
        ("glorious", (0.6, 0.9)),
        ("good", (0.7, 0.6)),
        ("gorgeous", (0.7, 0.9)),
        ("great", (0.8, 0.75)),
        ("gripping", (0.4, 0.6)),
        ("happy", (0.8, 1.0)),
        ("heartfelt", (0.6, 0.8)),
        ("heartwarming", (0.6, 0.8)),
        ("hilarious", (0.5, 0.6)),
        ("hopeful", (0.5, 0.7)),
        ("impressive", (1.0, 1.0)),
        ("incredible", (0.9, 0.9)),
        ("inspiring", (0.5, 0.5)),
        ("inspirational", (0.5, 0.5)),
        ("interesting", (0.5, 0.5)),
        ("joyful", (0.8, 0.9)),
        ("kind", (0.6, 0.9)),
        ("legendary", (0.5, 0.8)),
        ("love", (0.5, 0.6)),
        ("loved", (0.7, 0.8)),
        ("lovely", (0.5, 0.75)),
        ("magical", (0.5, 0.8)),
        ("magnificent", (1.0, 1.0)),
        ("masterpiece", (0.8, 0.9)),
        ("memorable", (0.5, 0.6)),
        ("nice", (0.6, 1.0)),
        ("outstanding", (0.5, 0.7)),
        ("perfect", (1.0, 1.0)),
        ("perfectly", (1.0, 1.0)),
        ("pleasant", (0.7, 0.9)),
        ("powerful", (0.3, 1.0)),
        ("remarkable", (0.75, 0.75)),
        ("rich", (0.375, 0.625)),
        ("satisfying", (0.5, 0.6)),
        ("smart", (0.2, 0.6)),
        ("special", (0.36, 0.57)),
        ("strong", (0.43, 0.73)),
        ("stunning", (0.5, 1.0)),
        ("successful", (0.75, 0.95)),
        ("superb", (1.0, 1.0)),
        ("sweet", (0.35, 0.65)),
        ("thrilling", (0.4, 0.8)),
        ("touching", (0.5, 0.7)),
        ("triumphant", (0.6, 0.8)),
        ("unique", (0.375, 1.0)),
        ("uplifting", (0.6, 0.7)),
        ("warm", (0.6, 0.6)),
        ("witty", (0.5, 0.8)),
        ("wonderful", (1.0, 1.0)),
        ("wonderfully", (1.0, 1.0)),
        // negative
        ("angry", (-0.5, 1.0)),
        ("annoying", (-0.4, 0.8)),
        ("awful", (-1.0, 1.0)),
        ("bad", (-0.7, 0.67)),
        ("bland", (-0.3, 0.5)),
        ("boring", (-1.0, 1.0)),
        ("broken", (-0.4, 0.4)),
        ("brutal", (-0.875, 0.9)),
        ("confusing", (-0.3, 0.5)),
        ("corrupt", (-0.5, 0.5)),
        ("cruel", (-1.0, 1.0)),
        ("dangerous", (-0.6, 0.9)),
        ("dark", (-0.15, 0.4)),
        ("dead", (-0.2, 0.4)),
        ("deadly", (-0.2, 0.6)),
        ("desperate", (-0.6, 0.9)),
        ("disappointed", (-0.75, 0.75)),
        ("disappointing", (-0.6, 0.7)),
        ("dull", (-0.3, 0.5)),
        ("evil", (-1.0, 1.0)),
        ("forgettable", (-0.4, 0.6)),
        ("frightening", (-0.3, 0.6)),
        ("grim", (-0.5, 0.7)),
        ("hate", (-0.8, 0.9)),
        ("hated", (-0.9, 0.7)),
        ("horrible", (-1.0, 1.0)),
        ("lifeless", (-0.5, 0.6)),
        ("lonely", (-0.1, 0.4)),
        ("mediocre", (-0.5, 0.6)),
        ("mess", (-0.2, 0.4)),
        ("painful", (-0.7, 0.9)),
        ("pointless", (-0.5, 1.0)),
        ("poor", (-0.4, 0.6)),
        ("predictable", (-0.1, 0.6)),
        ("sad", (-0.5, 1.0)),
        ("scary", (-0.5, 1.0)),
        ("sinister", (-0.5, 0.7)),
        ("stupid", (-0.8, 1.0)),
        ("tedious", (-0.5, 0.7)),
        ("terrible", (-1.0, 1.0)),
        ("terrifying", (-1.0, 1.0)),
        ("tragic", (-0.75, 0.75)),
        ("ugly", (-0.7, 1.0)),
        ("violent", (-0.8, 0.9)),
        ("weak", (-0.375, 0.625)),
        ("wicked", (-0.5, 0.9)),
        ("worse", (-0.4, 0.6)),
        ("worst", (-1.0, 1.0)),
        // mildly subjective
        ("little", (-0.1875, 0.5)),
        ("mysterious", (-0.25, 0.75)),
        ("new", (0.136, 0.454)),
        ("old", (0.1, 0.2)),
        ("real", (0.2, 0.3)),
        ("strange", (-0.05, 0.15)),
        ("true", (0.35, 0.65)),
        ("young", (0.1, 0.4)),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("absolutely", 1.4),
        ("extremely", 1.5),
        ("highly", 1.3),
        ("incredibly", 1.4),
        ("really", 1.3),
        ("remarkably", 1.3),
        ("so", 1.3),
        ("super", 1.3),
        ("truly", 1.2),
        ("very", 1.3),
    ]
    .into_iter()
    .collect()
});

/// Polarity in [-1, 1] and subjectivity in [0, 1] of a text span
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextSentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

fn is_negator(token: &str) -> bool {
    matches!(token, "not" | "no" | "never" | "nothing" | "nor" | "cannot" | "without")
        || token.ends_with("n't")
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('’', "'"))
}

/// Scores a free-text span.
pub fn analyze(text: &str) -> TextSentiment {
    let mut polarities = Vec::new();
    let mut subjectivities = Vec::new();

    let mut intensity = 1.0;
    let mut negation_left = 0usize;

    for token in tokens(text) {
        if is_negator(&token) {
            negation_left = NEGATION_WINDOW;
            continue;
        }

        if let Some(&factor) = INTENSIFIERS.get(token.as_str()) {
            intensity *= factor;
            continue;
        }

        if let Some(&(polarity, subjectivity)) = LEXICON.get(token.as_str()) {
            let mut polarity = polarity * intensity;
            if negation_left > 0 {
                polarity *= NEGATION_FACTOR;
            }
            polarities.push(polarity.clamp(-1.0, 1.0));
            subjectivities.push((subjectivity * intensity).clamp(0.0, 1.0));
            negation_left = 0;
        } else {
            negation_left = negation_left.saturating_sub(1);
        }

        intensity = 1.0;
    }

    if polarities.is_empty() {
        return TextSentiment::default();
    }

    TextSentiment {
        polarity: mean(&polarities).clamp(-1.0, 1.0),
        subjectivity: mean(&subjectivities).clamp(0.0, 1.0),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn excerpt(content: &str) -> String {
    if content.chars().count() > EXCERPT_CHARS {
        let head: String = content.chars().take(EXCERPT_CHARS).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Full sentiment breakdown of a movie's overview and first reviews.
///
/// `overall` is the overview polarity when there are no scored reviews,
/// otherwise `0.3 * overview + 0.7 * mean(reviews)`.
pub fn score(movie: &Movie) -> SentimentReport {
    let overview = analyze(movie.overview_text());

    let review_scores: Vec<ReviewSentiment> = movie
        .reviews
        .iter()
        .take(MAX_REVIEWS)
        .filter(|r| !r.content.trim().is_empty())
        .map(|review| {
            let truncated: String = review.content.chars().take(MAX_REVIEW_CHARS).collect();
            ReviewSentiment {
                author: review.author.clone(),
                polarity: analyze(&truncated).polarity,
                excerpt: excerpt(&review.content),
            }
        })
        .collect();

    let (average_review_polarity, overall) = if review_scores.is_empty() {
        (0.0, overview.polarity)
    } else {
        let polarities: Vec<f64> = review_scores.iter().map(|r| r.polarity).collect();
        let average = mean(&polarities);
        (
            average,
            OVERVIEW_WEIGHT * overview.polarity + REVIEW_WEIGHT * average,
        )
    };

    SentimentReport {
        overview_polarity: overview.polarity,
        overview_subjectivity: overview.subjectivity,
        review_scores,
        average_review_polarity,
        overall,
        label: SentimentLabel::from_score(overall),
    }
}

/// Movies whose overall sentiment is at least `min_sentiment`, sorted by
/// `(sentiment, rating)` descending, at most `n` of them.
pub fn rank(corpus: &[Movie], min_sentiment: f64, n: usize) -> Vec<SentimentRecommendation> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<SentimentRecommendation> = corpus
        .iter()
        .filter_map(|movie| {
            let overall = score(movie).overall;
            (overall >= min_sentiment).then(|| SentimentRecommendation {
                id: movie.id,
                title: movie.title.clone(),
                sentiment: overall,
                rating: movie.rating.unwrap_or(0.0),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.sentiment
            .total_cmp(&a.sentiment)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
    ranked.truncate(n);
    ranked
}
