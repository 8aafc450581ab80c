//! ml-showcase: six deterministic demo scorers for classic machine learning
//! concepts, exposed over HTTP and on the command line.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod scoring;
pub mod server;

pub use error::{Result, ScoringError};
pub use models::{evaluate, evaluate_json, Model, Prediction, Scorer};
