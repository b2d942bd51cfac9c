use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::MovieId;

/// User-supplied ratings keyed by movie title (0-10 scale)
pub type UserRatings = BTreeMap<String, f64>;

/// One ranked recommendation.
///
/// Scores are only comparable within a single strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub score: f64,
}

/// Entry of the sentiment ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecommendation {
    pub id: MovieId,
    pub title: String,
    pub sentiment: f64,
    pub rating: f64,
}

/// Outcome of resolving a user-typed title against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTitle {
    pub id: MovieId,
    pub title: String,
    pub confidence: f64,
}

/// Which strategy produced a content recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Content,
    Keyword,
}

/// Display label for a sentiment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Maps a polarity to its label using strict thresholds in descending order
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            SentimentLabel::VeryPositive
        } else if score > 0.1 {
            SentimentLabel::Positive
        } else if score > -0.1 {
            SentimentLabel::Neutral
        } else if score > -0.3 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::VeryNegative
        }
    }
}

/// Polarity of a single review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSentiment {
    pub author: String,
    pub polarity: f64,
    pub excerpt: String,
}

/// Full sentiment breakdown for one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub overview_polarity: f64,
    pub overview_subjectivity: f64,
    pub review_scores: Vec<ReviewSentiment>,
    pub average_review_polarity: f64,
    pub overall: f64,
    pub label: SentimentLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds_are_strict() {
        assert_eq!(SentimentLabel::from_score(0.31), SentimentLabel::VeryPositive);
        assert_eq!(SentimentLabel::from_score(0.3), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.1), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.3), SentimentLabel::VeryNegative);
        assert_eq!(SentimentLabel::from_score(-1.0), SentimentLabel::VeryNegative);
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(serde_json::to_string(&Strategy::Keyword).unwrap(), "\"keyword\"");
        assert_eq!(
            serde_json::to_string(&SentimentLabel::VeryPositive).unwrap(),
            "\"very_positive\""
        );
    }
}
