//! HTTP surface: one route exposing the evaluation pipeline.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::eval::{Evaluation, Evaluator};

/// Build the application router around an already-bootstrapped evaluator.
pub fn app(evaluator: Arc<Evaluator>) -> Router {
    Router::new()
        .route("/evaluate_model", get(evaluate_model))
        .layer(CorsLayer::permissive())
        .with_state(evaluator)
}

/// GET /evaluate_model
///
/// Reruns the evaluation pipeline against the fixed test partition. Any
/// evaluation failure is reported as a generic error payload; the process
/// keeps serving.
async fn evaluate_model(
    State(evaluator): State<Arc<Evaluator>>,
) -> Result<Json<Evaluation>, (StatusCode, Json<Value>)> {
    match evaluator.evaluate() {
        Ok(evaluation) => Ok(Json(evaluation)),
        Err(e) => {
            log::error!("evaluation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::linear::LinearRegression;
    use axum::body::Body;
    use axum::http::Request;
    use ndarray::{Array1, Array2};
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn evaluator(predictions_path: PathBuf) -> Arc<Evaluator> {
        let records = Array2::from_shape_fn((40, 1), |(i, _)| i as f64);
        let targets = Array1::from_shape_fn(40, |i| 2.0 * i as f64 + 1.0);
        let dataset = Dataset::new(records, targets, vec!["minutes".to_string()]);

        let (train, test) = dataset.train_test_split(0.2, 42);
        let model = LinearRegression::new().fit(&train).unwrap();
        Arc::new(Evaluator::new(model, test, predictions_path))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("points-eval-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn evaluate_model_returns_the_three_metrics() {
        let app = app(evaluator(temp_path("route.json")));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/evaluate_model")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        for field in ["mse", "mae", "r2"] {
            assert!(payload[field].is_number(), "missing field {}", field);
        }
    }

    #[tokio::test]
    async fn evaluation_failure_maps_to_a_generic_error_payload() {
        let app = app(evaluator(PathBuf::from("/nonexistent-dir/predictions.json")));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/evaluate_model")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert!(payload["error"].as_str().unwrap().contains("predictions"));
    }
}
