pub mod churn;
pub mod factors;
pub mod fraud;
pub mod pricing;
pub mod recommend;
pub mod sentiment;
pub mod trend;
pub mod validation;

pub use churn::{ChurnInput, ChurnResult, RiskLevel};
pub use factors::{Bucket, Effect, FactorContribution, RangeOp, Tally};
pub use fraud::{Decision, FraudInput, FraudResult};
pub use pricing::{PricingInput, PricingResult};
pub use recommend::{Product, Recommendation, RecommendationInput, RecommendationResult, CATALOG};
pub use sentiment::{Sentiment, SentimentInput, SentimentResult};
pub use trend::{TrendInput, TrendResult};
pub use validation::FieldChecks;

/// Round half toward positive infinity: 2.5 -> 3, -2.5 -> -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
