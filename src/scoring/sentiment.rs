//! Keyword-count sentiment. Each list entry is matched as a whole word, so an
//! entry listed twice counts twice.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScoringError};

pub const POSITIVE_WORDS: [&str; 13] = [
    "love", "great", "amazing", "excellent", "perfect", "awesome", "wonderful", "fantastic",
    "best", "good", "happy", "satisfied", "excellent",
];

pub const NEGATIVE_WORDS: [&str; 12] = [
    "hate", "bad", "terrible", "awful", "horrible", "worst", "disappointing", "poor", "broken",
    "useless", "angry", "unsatisfied",
];

const BASE_CONFIDENCE: u32 = 50;
const CONFIDENCE_PER_WORD: u32 = 10;
const WINNER_CAP: u32 = 90;
const CONFIDENCE_CAP: u32 = 95;

static POSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(&POSITIVE_WORDS));
static NEGATIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| compile(&NEGATIVE_WORDS));

fn compile(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        // ASCII word boundaries; the words are plain lowercase ASCII literals
        .map(|w| Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(w))))
        .collect::<std::result::Result<Vec<_>, _>>()
        .expect("keyword patterns are valid regexes")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SentimentInput {
    #[serde(default)]
    pub review_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    #[serde(rename = "confidence")]
    pub confidence_percent: u32,
    #[serde(skip)]
    pub positive_count: u32,
    #[serde(skip)]
    pub negative_count: u32,
}

fn count_matches(patterns: &[Regex], text: &str) -> u32 {
    patterns.iter().map(|re| re.find_iter(text).count() as u32).sum()
}

fn winner_confidence(count: u32) -> u32 {
    WINNER_CAP.min(BASE_CONFIDENCE.saturating_add(count.saturating_mul(CONFIDENCE_PER_WORD)))
}

pub fn analyze(input: &SentimentInput) -> Result<SentimentResult> {
    if input.review_text.trim().is_empty() {
        return Err(ScoringError::validation("Review text is required"));
    }

    let text = input.review_text.to_lowercase();
    let positive_count = count_matches(&POSITIVE_PATTERNS, &text);
    let negative_count = count_matches(&NEGATIVE_PATTERNS, &text);

    let (sentiment, confidence) = if positive_count > negative_count {
        (Sentiment::Positive, winner_confidence(positive_count))
    } else if negative_count > positive_count {
        (Sentiment::Negative, winner_confidence(negative_count))
    } else {
        (Sentiment::Neutral, BASE_CONFIDENCE)
    };

    Ok(SentimentResult {
        sentiment,
        confidence_percent: confidence.min(CONFIDENCE_CAP),
        positive_count,
        negative_count,
    })
}

pub fn interpretation(result: &SentimentResult) -> String {
    let verdict = match result.sentiment {
        Sentiment::Positive => "✅ Customer is satisfied!",
        Sentiment::Negative => "⚠️ Customer is unhappy!",
        Sentiment::Neutral => "➖ Mixed feedback",
    };
    format!(
        "This review is {} ({}% confidence). {}",
        result.sentiment, result.confidence_percent, verdict
    )
}
