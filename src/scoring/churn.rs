//! Decision-tree style churn scoring: a fixed set of additive rules over a
//! customer's purchase history, mapped onto a risk tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::factors::{Bucket, Effect, FactorContribution, RangeOp, Tally};
use super::validation::FieldChecks;
use crate::error::Result;

const RECENCY: [Bucket; 2] = [
    Bucket::new(RangeOp::GreaterThan(12.0), Effect::Add(35.0)),
    Bucket::new(RangeOp::GreaterThan(6.0), Effect::Add(20.0)),
];

const PURCHASES: [Bucket; 2] = [
    Bucket::new(RangeOp::LessThan(5.0), Effect::Add(25.0)),
    Bucket::new(RangeOp::LessThan(10.0), Effect::Add(10.0)),
];

const COMPLAINT_WEIGHT: Effect = Effect::AddPerUnit(15.0);

const ENGAGEMENT: [Bucket; 2] = [
    Bucket::new(RangeOp::LessThan(20.0), Effect::Add(25.0)),
    Bucket::new(RangeOp::LessThan(50.0), Effect::Add(10.0)),
];

const MAX_PROBABILITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChurnInput {
    pub months_since_last_purchase: u32,
    pub total_purchases: u32,
    pub customer_complaints: u32,
    /// Percentage, 0-100
    pub email_engagement_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_total(total: f64) -> Self {
        if total > 60.0 {
            RiskLevel::High
        } else if total > 35.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnResult {
    pub churn_probability: u32,
    pub risk_level: RiskLevel,
    pub factors: Vec<FactorContribution>,
}

pub fn score(input: &ChurnInput) -> Result<ChurnResult> {
    FieldChecks::new()
        .within("email_engagement_rate", input.email_engagement_rate, 0.0, 100.0)
        .finish()?;

    let mut tally = Tally::new(0.0);
    tally.apply_first_match("Recency", input.months_since_last_purchase as f64, &RECENCY);
    tally.apply_first_match("Purchases", input.total_purchases as f64, &PURCHASES);
    if input.customer_complaints > 0 {
        tally.apply(
            "Complaints",
            format!("{} complaints, effect: {}", input.customer_complaints, COMPLAINT_WEIGHT),
            COMPLAINT_WEIGHT,
            input.customer_complaints as u64,
        );
    }
    tally.apply_first_match("Engagement", input.email_engagement_rate, &ENGAGEMENT);

    let total = tally.score();
    Ok(ChurnResult {
        churn_probability: (total as u32).min(MAX_PROBABILITY),
        risk_level: RiskLevel::from_total(total),
        factors: tally.into_factors(),
    })
}

pub fn interpretation(result: &ChurnResult) -> String {
    let advice = match result.risk_level {
        RiskLevel::High => "⚠️ Recommend immediate retention action.",
        RiskLevel::Medium | RiskLevel::Low => "Customer is stable.",
    };
    format!(
        "Churn Probability: {}%. Risk Level: {}. {}",
        result.churn_probability, result.risk_level, advice
    )
}
