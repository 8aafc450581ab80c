//! Registry of the six demo models and the glue that turns a scorer's result
//! into the response envelope shared by the HTTP API and the CLI.

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::error::{Result, ScoringError};
use crate::scoring::{
    churn, fraud, pricing, recommend, sentiment, trend, ChurnInput, ChurnResult, FraudInput,
    FraudResult, PricingInput, PricingResult, RecommendationInput, RecommendationResult,
    SentimentInput, SentimentResult, TrendInput, TrendResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Model {
    DecisionTree,
    Knn,
    LinearRegression,
    NaiveBayes,
    NeuralNetwork,
    Svm,
}

impl Model {
    pub const ALL: [Model; 6] = [
        Model::LinearRegression,
        Model::NaiveBayes,
        Model::Knn,
        Model::Svm,
        Model::DecisionTree,
        Model::NeuralNetwork,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Model::DecisionTree => "decision-tree",
            Model::Knn => "knn",
            Model::LinearRegression => "linear-regression",
            Model::NaiveBayes => "naive-bayes",
            Model::NeuralNetwork => "neural-network",
            Model::Svm => "svm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Model::DecisionTree => "Churn Prediction",
            Model::Knn => "Product Recommendations",
            Model::LinearRegression => "Sales Forecasting",
            Model::NaiveBayes => "Sentiment Analysis",
            Model::NeuralNetwork => "Dynamic Pricing",
            Model::Svm => "Fraud Detection",
        }
    }

    /// Name reported in the `algorithm` field of every response
    pub fn algorithm(&self) -> &'static str {
        match self {
            Model::DecisionTree => "Decision Tree",
            Model::Knn => "K-Nearest Neighbors",
            Model::LinearRegression => "Linear Regression",
            Model::NaiveBayes => "Naive Bayes",
            Model::NeuralNetwork => "Neural Network",
            Model::Svm => "Support Vector Machine",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Model::DecisionTree => "Retain customers before they leave",
            Model::Knn => "Suggest what customers actually want",
            Model::LinearRegression => "Predict future sales to optimize inventory",
            Model::NaiveBayes => "Understand customer satisfaction instantly",
            Model::NeuralNetwork => "Optimize prices for maximum profit",
            Model::Svm => "Block fraudulent transactions in real-time",
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/api/predict/{}", self.slug())
    }

    /// Prefix for unexpected-failure messages
    pub fn failure_context(&self) -> &'static str {
        match self {
            Model::DecisionTree => "Churn prediction failed",
            Model::Knn => "Recommendation failed",
            Model::LinearRegression => "Prediction failed",
            Model::NaiveBayes => "Analysis failed",
            Model::NeuralNetwork => "Pricing optimization failed",
            Model::Svm => "Fraud detection failed",
        }
    }

    pub fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            slug: self.slug(),
            title: self.title(),
            algorithm: self.algorithm(),
            description: self.description(),
            endpoint: self.endpoint(),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub algorithm: &'static str,
    pub description: &'static str,
    pub endpoint: String,
}

/// A demo scorer: a pure function from a request body to a result, plus the
/// sentence that explains the result.
pub trait Scorer: Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;
    type Output: Serialize + Send + 'static;

    const MODEL: Model;

    fn run(input: &Self::Input) -> Result<Self::Output>;

    fn interpret(input: &Self::Input, output: &Self::Output) -> String;
}

pub struct Churn;
pub struct Recommend;
pub struct Trend;
pub struct SentimentAnalysis;
pub struct Pricing;
pub struct Fraud;

impl Scorer for Churn {
    type Input = ChurnInput;
    type Output = ChurnResult;
    const MODEL: Model = Model::DecisionTree;

    fn run(input: &ChurnInput) -> Result<ChurnResult> {
        churn::score(input)
    }

    fn interpret(_input: &ChurnInput, output: &ChurnResult) -> String {
        churn::interpretation(output)
    }
}

impl Scorer for Recommend {
    type Input = RecommendationInput;
    type Output = RecommendationResult;
    const MODEL: Model = Model::Knn;

    fn run(input: &RecommendationInput) -> Result<RecommendationResult> {
        recommend::recommend(input, input.k())
    }

    fn interpret(input: &RecommendationInput, _output: &RecommendationResult) -> String {
        recommend::interpretation(input, input.k())
    }
}

impl Scorer for Trend {
    type Input = TrendInput;
    type Output = TrendResult;
    const MODEL: Model = Model::LinearRegression;

    fn run(input: &TrendInput) -> Result<TrendResult> {
        trend::predict(input)
    }

    fn interpret(input: &TrendInput, output: &TrendResult) -> String {
        trend::interpretation(input, output)
    }
}

impl Scorer for SentimentAnalysis {
    type Input = SentimentInput;
    type Output = SentimentResult;
    const MODEL: Model = Model::NaiveBayes;

    fn run(input: &SentimentInput) -> Result<SentimentResult> {
        sentiment::analyze(input)
    }

    fn interpret(_input: &SentimentInput, output: &SentimentResult) -> String {
        sentiment::interpretation(output)
    }
}

impl Scorer for Pricing {
    type Input = PricingInput;
    type Output = PricingResult;
    const MODEL: Model = Model::NeuralNetwork;

    fn run(input: &PricingInput) -> Result<PricingResult> {
        pricing::optimize(input)
    }

    fn interpret(input: &PricingInput, output: &PricingResult) -> String {
        pricing::interpretation(input, output)
    }
}

impl Scorer for Fraud {
    type Input = FraudInput;
    type Output = FraudResult;
    const MODEL: Model = Model::Svm;

    fn run(input: &FraudInput) -> Result<FraudResult> {
        fraud::check(input)
    }

    fn interpret(_input: &FraudInput, output: &FraudResult) -> String {
        fraud::interpretation(output)
    }
}

/// Success body: `{ success: true, ...result fields, algorithm, interpretation }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction<T> {
    pub success: bool,
    #[serde(flatten)]
    pub result: T,
    pub algorithm: &'static str,
    pub interpretation: String,
}

pub fn evaluate<S: Scorer>(input: &S::Input) -> Result<Prediction<S::Output>> {
    let result = S::run(input)?;
    let interpretation = S::interpret(input, &result);
    Ok(Prediction {
        success: true,
        result,
        algorithm: S::MODEL.algorithm(),
        interpretation,
    })
}

/// Evaluate a raw JSON request body for `model`. A body that does not parse
/// into the model's input is a validation failure.
pub fn evaluate_json(model: Model, body: &str) -> Result<Prediction<serde_json::Value>> {
    match model {
        Model::DecisionTree => evaluate_str::<Churn>(body),
        Model::Knn => evaluate_str::<Recommend>(body),
        Model::LinearRegression => evaluate_str::<Trend>(body),
        Model::NaiveBayes => evaluate_str::<SentimentAnalysis>(body),
        Model::NeuralNetwork => evaluate_str::<Pricing>(body),
        Model::Svm => evaluate_str::<Fraud>(body),
    }
}

fn evaluate_str<S: Scorer>(body: &str) -> Result<Prediction<serde_json::Value>> {
    let input: S::Input = serde_json::from_str(body)
        .map_err(|e| ScoringError::validation(format!("Invalid request body: {}", e)))?;
    let prediction = evaluate::<S>(&input)?;
    let result = serde_json::to_value(&prediction.result)
        .map_err(|e| ScoringError::unexpected(e.to_string()))?;
    Ok(Prediction {
        success: prediction.success,
        result,
        algorithm: prediction.algorithm,
        interpretation: prediction.interpretation,
    })
}
