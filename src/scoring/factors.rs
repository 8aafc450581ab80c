use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    GreaterThan(f64),
    Outside(f64, f64), // value < low || value > high
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::Outside(low, high) => value < *low || value > *high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::Outside(low, high) => write!(f, "<{} or >{}", low, high),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Add(f64),
    Multiply(f64),
    AddPerUnit(f64),
}

impl Effect {
    /// Apply effect to score. `units` only matters for per-unit effects.
    pub fn apply(&self, score: f64, units: u64) -> f64 {
        match self {
            Effect::Add(n) => score + n,
            Effect::Multiply(n) => score * n,
            Effect::AddPerUnit(n) => score + (n * units as f64),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Add(n) => write!(f, "{:+}", n),
            Effect::Multiply(n) => write!(f, "x{}", n),
            Effect::AddPerUnit(n) => write!(f, "{:+} per unit", n),
        }
    }
}

/// A threshold paired with the effect it triggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub range: RangeOp,
    pub effect: Effect,
}

impl Bucket {
    pub const fn new(range: RangeOp, effect: Effect) -> Self {
        Self { range, effect }
    }
}

/// One step of a scoring chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Demand", "Inventory"
    pub description: String, // e.g. "'high' -> x1.15"
    pub before: f64,
    pub after: f64,
}

/// Running score plus the record of every factor that moved it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    score: f64,
    factors: Vec<FactorContribution>,
}

impl Tally {
    pub fn new(base: f64) -> Self {
        Self {
            score: base,
            factors: Vec::new(),
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn factors(&self) -> &[FactorContribution] {
        &self.factors
    }

    pub fn into_factors(self) -> Vec<FactorContribution> {
        self.factors
    }

    /// Apply an effect unconditionally and record it.
    pub fn apply(&mut self, label: &str, description: String, effect: Effect, units: u64) {
        let before = self.score;
        self.score = effect.apply(before, units);
        self.factors.push(FactorContribution {
            label: label.to_string(),
            description,
            before,
            after: self.score,
        });
    }

    /// Apply the first bucket whose range matches `value`. Nothing is recorded
    /// when no bucket matches.
    pub fn apply_first_match(&mut self, label: &str, value: f64, buckets: &[Bucket]) {
        if let Some(bucket) = buckets.iter().find(|b| b.range.matches(value)) {
            let description = format!("{} matched '{}' -> {}", value, bucket.range, bucket.effect);
            self.apply(label, description, bucket.effect, 1);
        }
    }

    /// Apply every bucket whose range matches `value`, in order.
    pub fn apply_all_matches(&mut self, label: &str, value: f64, buckets: &[Bucket]) {
        for bucket in buckets.iter().filter(|b| b.range.matches(value)) {
            let description = format!("{} matched '{}' -> {}", value, bucket.range, bucket.effect);
            self.apply(label, description, bucket.effect, 1);
        }
    }
}
