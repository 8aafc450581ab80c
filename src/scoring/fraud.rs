//! Rule-based transaction risk. Rules stack and the total is not clamped.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::factors::{Bucket, Effect, FactorContribution, RangeOp, Tally};
use super::validation::FieldChecks;
use crate::error::Result;

const AMOUNT: [Bucket; 2] = [
    Bucket::new(RangeOp::GreaterThan(1000.0), Effect::Add(20.0)),
    Bucket::new(RangeOp::GreaterThan(5000.0), Effect::Add(20.0)),
];

const AGE: [Bucket; 1] = [Bucket::new(RangeOp::Outside(18.0, 80.0), Effect::Add(10.0))];

const DORMANCY: [Bucket; 2] = [
    Bucket::new(RangeOp::GreaterThan(365.0), Effect::Add(15.0)),
    Bucket::new(RangeOp::GreaterThan(730.0), Effect::Add(15.0)),
];

const NEW_DEVICE: Effect = Effect::Add(25.0);
const LOCATION_MISMATCH: Effect = Effect::Add(25.0);

const FRAUD_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FraudInput {
    pub transaction_amount: f64,
    pub customer_age: u32,
    pub days_since_last_purchase: u32,
    pub is_new_device: bool,
    pub location_mismatch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Block,
    Approve,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Block => f.write_str("BLOCK"),
            Decision::Approve => f.write_str("APPROVE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudResult {
    pub risk_score: u32,
    pub is_fraud: bool,
    pub recommendation: Decision,
    pub factors: Vec<FactorContribution>,
}

pub fn check(input: &FraudInput) -> Result<FraudResult> {
    FieldChecks::new()
        .finite("transaction_amount", input.transaction_amount)
        .finish()?;

    let mut tally = Tally::new(0.0);
    tally.apply_all_matches("Amount", input.transaction_amount, &AMOUNT);
    tally.apply_all_matches("Age", input.customer_age as f64, &AGE);
    tally.apply_all_matches("Dormancy", input.days_since_last_purchase as f64, &DORMANCY);
    if input.is_new_device {
        tally.apply("Device", "new device".to_string(), NEW_DEVICE, 1);
    }
    if input.location_mismatch {
        tally.apply("Location", "location mismatch".to_string(), LOCATION_MISMATCH, 1);
    }

    let risk_score = tally.score() as u32;
    let is_fraud = risk_score > FRAUD_THRESHOLD;
    Ok(FraudResult {
        risk_score,
        is_fraud,
        recommendation: if is_fraud {
            Decision::Block
        } else {
            Decision::Approve
        },
        factors: tally.into_factors(),
    })
}

pub fn interpretation(result: &FraudResult) -> String {
    let note = if result.is_fraud {
        "⚠️ This transaction needs manual review."
    } else {
        "✅ Transaction appears legitimate."
    };
    format!(
        "Fraud Risk Score: {}%. Recommendation: {}. {}",
        result.risk_score, result.recommendation, note
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(amount: f64, age: u32, days: u32, new_device: bool, mismatch: bool) -> FraudInput {
        FraudInput {
            transaction_amount: amount,
            customer_age: age,
            days_since_last_purchase: days,
            is_new_device: new_device,
            location_mismatch: mismatch,
        }
    }

    #[test]
    fn test_every_rule_stacks_past_100() {
        // 20 + 20 + 0 + 15 + 15 + 25 + 25
        let result = check(&input(6000.0, 35, 800, true, true)).unwrap();
        assert_eq!(result.risk_score, 120);
        assert!(result.is_fraud);
        assert_eq!(result.recommendation, Decision::Block);
    }

    #[test]
    fn test_clean_transaction() {
        let result = check(&input(50.0, 35, 10, false, false)).unwrap();
        assert_eq!(result.risk_score, 0);
        assert!(!result.is_fraud);
        assert_eq!(result.recommendation, Decision::Approve);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 25 + 25 = 50 -> not fraud
        let result = check(&input(10.0, 35, 10, true, true)).unwrap();
        assert_eq!(result.risk_score, 50);
        assert!(!result.is_fraud);

        // + age 10 -> 60
        let result = check(&input(10.0, 17, 10, true, true)).unwrap();
        assert_eq!(result.risk_score, 60);
        assert!(result.is_fraud);
    }

    #[test]
    fn test_age_band_edges() {
        assert_eq!(check(&input(10.0, 18, 0, false, false)).unwrap().risk_score, 0);
        assert_eq!(check(&input(10.0, 80, 0, false, false)).unwrap().risk_score, 0);
        assert_eq!(check(&input(10.0, 81, 0, false, false)).unwrap().risk_score, 10);
    }

    #[test]
    fn test_amount_and_dormancy_edges() {
        assert_eq!(check(&input(1000.0, 35, 365, false, false)).unwrap().risk_score, 0);
        assert_eq!(check(&input(1000.01, 35, 366, false, false)).unwrap().risk_score, 35);
        assert_eq!(check(&input(5000.0, 35, 730, false, false)).unwrap().risk_score, 35);
        assert_eq!(check(&input(5001.0, 35, 731, false, false)).unwrap().risk_score, 70);
    }

    #[test]
    fn test_breakdown_stacks_matching_buckets() {
        let result = check(&input(6000.0, 35, 800, true, true)).unwrap();
        let labels: Vec<_> = result.factors.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Amount", "Amount", "Dormancy", "Dormancy", "Device", "Location"]
        );
        assert_eq!(result.factors.last().unwrap().after, 120.0);

        let result = check(&input(50.0, 35, 10, false, false)).unwrap();
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        assert!(check(&input(f64::INFINITY, 35, 0, false, false))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_idempotent() {
        let request = input(2500.0, 85, 400, true, false);
        assert_eq!(check(&request).unwrap(), check(&request).unwrap());
    }

    #[test]
    fn test_interpretation() {
        let result = check(&input(6000.0, 35, 800, true, true)).unwrap();
        assert_eq!(
            interpretation(&result),
            "Fraud Risk Score: 120%. Recommendation: BLOCK. ⚠️ This transaction needs manual review."
        );
        let result = check(&input(50.0, 35, 10, false, false)).unwrap();
        assert_eq!(
            interpretation(&result),
            "Fraud Risk Score: 0%. Recommendation: APPROVE. ✅ Transaction appears legitimate."
        );
    }

    #[test]
    fn test_serializes_wire_names() {
        let result = check(&input(6000.0, 35, 800, true, true)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["risk_score"], 120);
        assert_eq!(json["is_fraud"], true);
        assert_eq!(json["recommendation"], "BLOCK");
        assert_eq!(json["factors"].as_array().unwrap().len(), 6);
    }
}
