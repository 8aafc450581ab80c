use axum::extract::rejection::JsonRejection;
use axum::Json;

use super::error::ApiError;
use crate::models::{evaluate, AlgorithmInfo, Model, Prediction, Scorer};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn algorithms() -> Json<Vec<AlgorithmInfo>> {
    Json(Model::ALL.iter().map(Model::info).collect())
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// POST handler shared by every demo endpoint.
pub async fn predict<S: Scorer>(
    payload: Result<Json<S::Input>, JsonRejection>,
) -> Result<Json<Prediction<S::Output>>, ApiError> {
    let model = S::MODEL;
    let Json(input) = payload.map_err(|rejection| {
        tracing::warn!(model = %model, "rejected request body: {}", rejection.body_text());
        ApiError::from_rejection(rejection)
    })?;

    match evaluate::<S>(&input) {
        Ok(prediction) => {
            tracing::debug!(model = %model, "{}", prediction.interpretation);
            Ok(Json(prediction))
        }
        Err(err) if err.is_validation() => {
            tracing::warn!(model = %model, "validation failed: {}", err);
            Err(ApiError::from_scoring(model, err))
        }
        Err(err) => {
            tracing::error!(model = %model, "scoring failed: {}", err);
            Err(ApiError::from_scoring(model, err))
        }
    }
}
