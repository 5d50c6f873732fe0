use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ratecard_core::advice::{
    self, Advice, PipelineHealth, RenderedRecommendation, UtilizationCategory,
};
use ratecard_core::domain::validation::ValidationErrors;
use ratecard_core::{compute_checked, CompensationInputs, CompensationResults, Percentage};

pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/compute", post(compute))
        .route("/utilization/:percent", get(get_category))
        .route("/recommendations", get(get_recommendations))
        .route("/advice", get(get_advice))
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Invalid(ValidationErrors),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "bad_request", "message": message })),
            )
                .into_response(),
            ApiError::Invalid(errors) => {
                tracing::debug!(error = %errors, "rejected compensation inputs");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "error": "invalid_inputs",
                        "message": errors.to_string(),
                        "violations": errors.violations,
                    })),
                )
                    .into_response()
            }
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
struct ComputeParams {
    #[serde(default)]
    strict: bool,
}

async fn compute(
    Query(params): Query<ComputeParams>,
    Json(inputs): Json<CompensationInputs>,
) -> Result<Json<CompensationResults>, ApiError> {
    let results = if params.strict {
        compute_checked(&inputs).map_err(ApiError::Invalid)?
    } else {
        ratecard_core::compute(&inputs)
    };
    Ok(Json(results))
}

#[derive(Debug, Serialize)]
struct Classification {
    percent: f64,
    category: UtilizationCategory,
}

async fn get_category(Path(percent): Path<String>) -> Result<Json<Classification>, ApiError> {
    let percent: f64 = percent.parse().map_err(|_| {
        ApiError::BadRequest(format!("utilization must be a number (got {percent:?})"))
    })?;
    Ok(Json(Classification {
        percent,
        category: advice::classify_utilization(Percentage::new(percent)),
    }))
}

#[derive(Debug, Deserialize)]
struct AdviceParams {
    utilization: f64,
    pipeline: String,
}

impl AdviceParams {
    fn pipeline(&self) -> Result<PipelineHealth, ApiError> {
        self.pipeline
            .parse()
            .map_err(|e: advice::ParseCategoryError| ApiError::BadRequest(e.to_string()))
    }
}

async fn get_recommendations(
    Query(params): Query<AdviceParams>,
) -> Result<Json<RenderedRecommendation>, ApiError> {
    let pipeline = params.pipeline()?;
    Ok(Json(advice::recommend(
        Percentage::new(params.utilization),
        pipeline,
    )))
}

async fn get_advice(Query(params): Query<AdviceParams>) -> Result<Json<&'static Advice>, ApiError> {
    let pipeline = params.pipeline()?;
    Ok(Json(advice::assess(
        Percentage::new(params.utilization),
        pipeline,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{self, Body};
    use axum::http::Request;
    use tower::util::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn compute_returns_camel_case_results() {
        let (status, body) = send(post_json(
            "/compute",
            json!({
                "baseSalary": 120000,
                "annualBonus": 20000,
                "annualEquityFmv": 15000,
                "vacationDays": 15,
                "publicHolidays": 10,
                "otherLeaveDays": 10,
                "trainingDays": 4
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["workingDaysPerYear"], 221.0);
        assert_eq!(body["totalAnnualComp"], 155000.0);
        assert_eq!(body["annualCostIncludingOH"], 185000.0);
    }

    #[tokio::test]
    async fn strict_compute_rejects_zero_hours() {
        let (status, body) = send(post_json(
            "/compute?strict=true",
            json!({ "baseSalary": 100000, "hoursPerDay": 0 }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_inputs");
        assert_eq!(body["violations"][0]["kind"], "non-positive-hours");
    }

    #[tokio::test]
    async fn classify_reports_category() {
        let (status, body) = send(get("/utilization/85")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "excellent");

        let (status, _) = send(get("/utilization/lots")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recommendations_substitute_utilization() {
        let (status, body) = send(get("/recommendations?utilization=72.6&pipeline=good")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["utilizationCategory"], "great");
        assert_eq!(body["pipelineHealth"], "good");
        assert!(body["situation"].as_str().unwrap().contains("73%"));
    }

    #[tokio::test]
    async fn advice_rejects_unknown_pipeline() {
        let (status, body) = send(get("/advice?utilization=40&pipeline=stellar")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");

        let (status, body) = send(get("/advice?utilization=40&pipeline=poor")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["severity"], "critical");
        assert_eq!(body["callToAction"], "Build a pipeline plan");
    }
}
