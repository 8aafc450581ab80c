//! Nearest-neighbour style product recommendations over a fixed catalog.

use serde::{Deserialize, Serialize};

use super::round_half_up;
use super::validation::FieldChecks;
use crate::error::{Result, ScoringError};

pub const DEFAULT_K: usize = 5;

const CATEGORY_WEIGHT: f64 = 50.0;
const PRICE_WEIGHT: f64 = 30.0;
const PRICE_WINDOW: f64 = 50.0;
const RATING_WEIGHT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub name: &'static str,
    pub category: &'static str,
    pub price: f64,
    pub rating: f64,
}

pub static CATALOG: [Product; 8] = [
    Product { name: "Wireless Headphones", category: "electronics", price: 79.99, rating: 4.5 },
    Product { name: "Phone Case", category: "accessories", price: 19.99, rating: 4.2 },
    Product { name: "Charging Cable", category: "electronics", price: 12.99, rating: 4.0 },
    Product { name: "Screen Protector", category: "accessories", price: 9.99, rating: 4.3 },
    Product { name: "Portable Charger", category: "electronics", price: 49.99, rating: 4.6 },
    Product { name: "Bluetooth Speaker", category: "electronics", price: 59.99, rating: 4.4 },
    Product { name: "USB Hub", category: "electronics", price: 29.99, rating: 4.1 },
    Product { name: "Phone Mount", category: "accessories", price: 15.99, rating: 4.0 },
];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RecommendationInput {
    pub purchased_categories: Vec<String>,
    #[serde(default)]
    pub price_range: Option<f64>,
    #[serde(default)]
    pub k: Option<usize>,
}

impl RecommendationInput {
    pub fn k(&self) -> usize {
        self.k.unwrap_or(DEFAULT_K)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    #[serde(rename = "match")]
    pub match_percent: String,
    #[serde(skip)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<Recommendation>,
}

fn similarity(product: &Product, categories: &[String], price_range: Option<f64>) -> f64 {
    let mut score = 0.0;
    if categories.iter().any(|c| c == product.category) {
        score += CATEGORY_WEIGHT;
    }
    // A zero price range counts as "not given".
    if let Some(target) = price_range.filter(|p| *p != 0.0) {
        if (product.price - target).abs() < PRICE_WINDOW {
            score += PRICE_WEIGHT;
        }
    }
    score + product.rating * RATING_WEIGHT
}

pub fn recommend(input: &RecommendationInput, k: usize) -> Result<RecommendationResult> {
    if input.purchased_categories.is_empty() {
        return Err(ScoringError::validation(
            "purchased_categories must be a non-empty array",
        ));
    }
    if let Some(price_range) = input.price_range {
        FieldChecks::new().finite("price_range", price_range).finish()?;
    }

    let mut scored: Vec<(&Product, f64)> = CATALOG
        .iter()
        .map(|p| (p, similarity(p, &input.purchased_categories, input.price_range)))
        .collect();

    // sort_by is stable, so ties keep catalog order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let recommendations = scored
        .into_iter()
        .take(k)
        .map(|(product, score)| Recommendation {
            name: product.name.to_string(),
            price: product.price,
            rating: product.rating,
            match_percent: format!("{}%", round_half_up(score)),
            score,
        })
        .collect();

    Ok(RecommendationResult { recommendations })
}

pub fn interpretation(input: &RecommendationInput, k: usize) -> String {
    format!(
        "Based on your purchase history ({}), here are your top {} recommended products.",
        input.purchased_categories.join(", "),
        k
    )
}
