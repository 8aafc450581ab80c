//! Dynamic pricing as a chain of multiplicative adjustments applied to the
//! base price.

use serde::{Deserialize, Serialize};

use super::factors::{Bucket, Effect, FactorContribution, RangeOp, Tally};
use super::round_half_up;
use super::validation::FieldChecks;
use crate::error::{Result, ScoringError};

const DEMAND_FACTORS: [(&str, f64); 4] = [
    ("low", 0.85),
    ("medium", 1.0),
    ("high", 1.15),
    ("very-high", 1.25),
];

const DAY_FACTORS: [(&str, f64); 7] = [
    ("monday", 0.95),
    ("tuesday", 0.95),
    ("wednesday", 1.0),
    ("thursday", 1.0),
    ("friday", 1.1),
    ("saturday", 1.15),
    ("sunday", 1.05),
];

const UNDERCUT_BY_COMPETITOR: f64 = 0.98;
const PRICED_BELOW_COMPETITOR: f64 = 1.02;

const INVENTORY: [Bucket; 2] = [
    Bucket::new(RangeOp::LessThan(10.0), Effect::Multiply(1.1)),
    Bucket::new(RangeOp::GreaterThan(100.0), Effect::Multiply(0.9)),
];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PricingInput {
    pub base_price: f64,
    pub competitor_price: f64,
    pub inventory_level: u32,
    /// low, medium, high or very-high; anything else leaves the price alone
    pub demand_level: String,
    /// Day name, any case; anything else leaves the price alone
    pub day_of_week: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub optimal_price: f64,
    pub base_price: f64,
    #[serde(rename = "revenue_impact")]
    pub revenue_impact_percent: i64,
    pub factors: Vec<FactorContribution>,
}

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(name, _)| *name == key).map(|(_, f)| *f)
}

pub fn demand_factor(level: &str) -> f64 {
    lookup(&DEMAND_FACTORS, level).unwrap_or(1.0)
}

pub fn day_factor(day: &str) -> f64 {
    lookup(&DAY_FACTORS, &day.to_lowercase()).unwrap_or(1.0)
}

pub fn optimize(input: &PricingInput) -> Result<PricingResult> {
    FieldChecks::new()
        .finite("base_price", input.base_price)
        .finite("competitor_price", input.competitor_price)
        .finish()?;

    let mut chain = Tally::new(1.0);

    let demand = demand_factor(&input.demand_level);
    chain.apply(
        "Demand",
        format!("'{}' -> x{}", input.demand_level, demand),
        Effect::Multiply(demand),
        1,
    );

    let competitor = if input.competitor_price > input.base_price {
        UNDERCUT_BY_COMPETITOR
    } else {
        PRICED_BELOW_COMPETITOR
    };
    chain.apply(
        "Competitor",
        format!(
            "competitor ${} vs base ${} -> x{}",
            input.competitor_price, input.base_price, competitor
        ),
        Effect::Multiply(competitor),
        1,
    );

    chain.apply_first_match("Inventory", input.inventory_level as f64, &INVENTORY);

    let day = day_factor(&input.day_of_week);
    chain.apply(
        "Day of week",
        format!("'{}' -> x{}", input.day_of_week, day),
        Effect::Multiply(day),
        1,
    );

    let multiplier = chain.score();
    let optimal_price = round_half_up(input.base_price * multiplier * 100.0) / 100.0;
    if !optimal_price.is_finite() {
        return Err(ScoringError::unexpected("optimal price is not a finite number"));
    }

    Ok(PricingResult {
        optimal_price,
        base_price: input.base_price,
        revenue_impact_percent: round_half_up((multiplier - 1.0) * 100.0) as i64,
        factors: chain.into_factors(),
    })
}

pub fn interpretation(input: &PricingInput, result: &PricingResult) -> String {
    let sign = if result.revenue_impact_percent > 0 { "+" } else { "" };
    format!(
        "Optimal Price: ${:.2} ({}{}% revenue impact). Factors: {} demand, {} items in stock, competitors at ${}",
        result.optimal_price,
        sign,
        result.revenue_impact_percent,
        input.demand_level,
        input.inventory_level,
        input.competitor_price
    )
}
