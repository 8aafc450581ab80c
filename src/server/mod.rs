pub mod error;
pub mod handlers;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::net::{IpAddr, SocketAddr};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::models::{Churn, Fraud, Model, Pricing, Recommend, Scorer, SentimentAnalysis, Trend};

fn predict_route<S: Scorer>(router: Router) -> Router {
    router.route(&S::MODEL.endpoint(), post(handlers::predict::<S>))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

/// Build the application router: one POST endpoint per demo plus the
/// health check and the algorithm catalog.
pub fn router(config: &ServerConfig) -> Result<Router> {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/algorithms", get(handlers::algorithms));

    app = predict_route::<Churn>(app);
    app = predict_route::<Recommend>(app);
    app = predict_route::<Trend>(app);
    app = predict_route::<SentimentAnalysis>(app);
    app = predict_route::<Pricing>(app);
    app = predict_route::<Fraud>(app);

    Ok(app
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins)?))
}

pub fn socket_addr(config: &ServerConfig) -> Result<SocketAddr> {
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid server host '{}'", config.host))?;
    Ok(SocketAddr::new(ip, config.port))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let app = router(config)?;
    let addr = socket_addr(config)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("ml-showcase listening on http://{}", addr);
    for model in Model::ALL {
        tracing::debug!("  POST {} ({})", model.endpoint(), model.algorithm());
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("ml-showcase stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(&ServerConfig::default()).unwrap()
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_algorithms_lists_all_six() {
        let (status, body) = get("/api/algorithms").await;
        assert_eq!(status, StatusCode::OK);
        let list: Value = serde_json::from_slice(&body).unwrap();
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 6);
        assert!(list.iter().any(|a| a["endpoint"] == "/api/predict/svm"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_json() {
        let (status, body) = get("/api/predict/random-forest").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_churn_endpoint() {
        let (status, body) = post_json(
            "/api/predict/decision-tree",
            r#"{"months_since_last_purchase":13,"total_purchases":3,"customer_complaints":2,"email_engagement_rate":10}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["churn_probability"], 99);
        assert_eq!(body["risk_level"], "HIGH");
        assert_eq!(body["algorithm"], "Decision Tree");
    }

    #[tokio::test]
    async fn test_knn_endpoint() {
        let (status, body) = post_json(
            "/api/predict/knn",
            r#"{"purchased_categories":["electronics"],"price_range":50,"k":3}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let recommendations = body["recommendations"].as_array().unwrap();
        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0]["name"], "Wireless Headphones");
        assert_eq!(recommendations[0]["match"], "103%");
        assert_eq!(
            body["interpretation"],
            "Based on your purchase history (electronics), here are your top 3 recommended products."
        );
    }

    #[tokio::test]
    async fn test_knn_rejects_non_array_categories() {
        let (status, body) =
            post_json("/api/predict/knn", r#"{"purchased_categories":"electronics"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_linear_regression_endpoint() {
        let (status, body) = post_json(
            "/api/predict/linear-regression",
            r#"{"month_1_sales":40000,"month_2_sales":45000,"month_3_sales":50000}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], 55000);
        assert!(body["prediction"].is_u64());
        assert_eq!(body["confidence"], 100);
        assert_eq!(body["formula"], "y = 5000.00x + 35000.00");
    }

    #[tokio::test]
    async fn test_linear_regression_missing_field() {
        let (status, body) = post_json(
            "/api/predict/linear-regression",
            r#"{"month_1_sales":40000,"month_2_sales":45000}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_naive_bayes_endpoint() {
        let (status, body) = post_json(
            "/api/predict/naive-bayes",
            r#"{"review_text":"This product is absolutely amazing"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "POSITIVE");
        assert_eq!(body["confidence"], 60);
    }

    #[tokio::test]
    async fn test_naive_bayes_blank_review() {
        let (status, body) =
            post_json("/api/predict/naive-bayes", r#"{"review_text":"   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Review text is required");
    }

    #[tokio::test]
    async fn test_neural_network_endpoint() {
        let (status, body) = post_json(
            "/api/predict/neural-network",
            r#"{"base_price":100,"competitor_price":80,"inventory_level":5,"demand_level":"very-high","day_of_week":"Saturday"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["optimal_price"], 161.29);
        assert_eq!(body["revenue_impact"], 61);
        assert_eq!(body["base_price"], 100.0);
        assert_eq!(body["factors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_svm_endpoint() {
        let (status, body) = post_json(
            "/api/predict/svm",
            r#"{"transaction_amount":6000,"customer_age":35,"days_since_last_purchase":800,"is_new_device":true,"location_mismatch":true}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_score"], 120);
        assert_eq!(body["is_fraud"], true);
        assert_eq!(body["recommendation"], "BLOCK");
        assert_eq!(body["factors"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, body) = post_json("/api/predict/svm", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_400() {
        let (status, _) = post_json(
            "/api/predict/decision-tree",
            r#"{"months_since_last_purchase":"a while","total_purchases":3,"customer_complaints":2,"email_engagement_rate":10}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        let config = ServerConfig {
            cors_origins: vec!["http://ok.example".to_string(), "bad\norigin".to_string()],
            ..ServerConfig::default()
        };
        assert!(router(&config).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let addr = socket_addr(&ServerConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");

        let config = ServerConfig {
            host: "localhost".to_string(),
            ..ServerConfig::default()
        };
        assert!(socket_addr(&config).is_err());
    }
}
