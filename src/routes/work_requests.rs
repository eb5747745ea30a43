/**
 * Work Request Routes
 * Booking submissions from the work-with-me and portfolio surfaces,
 * plus the admin review pipeline
 */
use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::validate::{self, BookingSubmission, FieldErrors, SubmitState};
use crate::db;
use crate::db::models::{WorkRequest, WorkRequestStatus};
use crate::routes::auth::verify_admin;
use crate::routes::{ErrorResponse, SubmissionRejection};

/// Shown when a booking is attempted with no store connected
pub const BOOKING_UNAVAILABLE_MESSAGE: &str = "Submission is unavailable right now.";

/// Confirmation after the request lands
pub const BOOKING_SUCCESS_MESSAGE: &str = "Request submitted. We will reach out soon.";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub state: SubmitState,
    pub request_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequestsListResponse {
    pub requests: Vec<WorkRequest>,
    pub total: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/work-requests
/// Run the booking gate against the live clock, then record the request
/// for review.
pub async fn submit_work_request(Json(payload): Json<BookingSubmission>) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let now = Local::now().format("%H:%M").to_string();

    let errors = validate::validate_booking(&payload, today, &now);
    if !errors.is_clean() {
        let error = errors
            .message()
            .unwrap_or_else(|| validate::REQUIRED_FIELDS_MESSAGE.to_string());
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmissionRejection {
                error,
                field_errors: errors,
                state: SubmitState::Rejected,
            }),
        )
            .into_response();
    }

    // A clean gate implies the date parsed; keep the fallback anyway so a
    // malformed value can never reach the DATE column.
    let date = match payload.parsed_date() {
        Some(date) => date,
        None => {
            let mut errors = FieldErrors::default();
            errors.add("date");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SubmissionRejection {
                    error: validate::REQUIRED_FIELDS_MESSAGE.to_string(),
                    field_errors: errors,
                    state: SubmitState::Rejected,
                }),
            )
                .into_response();
        }
    };

    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(BOOKING_UNAVAILABLE_MESSAGE)),
            )
                .into_response();
        }
    };

    match sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO work_requests (service, name, industry, other, email, phone, message,
            agreement, date, time, timezone, meeting_mode, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'new', now())
        RETURNING id
        "#,
    )
    .bind(&payload.service)
    .bind(&payload.name)
    .bind(&payload.industry)
    .bind(&payload.other)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&payload.message)
    .bind(payload.agreement)
    .bind(date)
    .bind(payload.time.trim())
    .bind(&payload.timezone)
    .bind(&payload.meeting_mode)
    .fetch_one(pool.as_ref())
    .await
    {
        Ok(request_id) => {
            tracing::info!(
                "Work request received from {} for {} at {}",
                payload.email,
                date,
                payload.time.trim()
            );
            (
                StatusCode::CREATED,
                Json(BookingResponse {
                    success: true,
                    message: BOOKING_SUCCESS_MESSAGE.to_string(),
                    state: SubmitState::Submitted,
                    request_id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to record work request: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionRejection {
                    error: "Failed to submit request".to_string(),
                    field_errors: FieldErrors::default(),
                    state: SubmitState::Failed,
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/work-requests (admin)
pub async fn list_work_requests(headers: HeaderMap) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers) {
        return err_response.into_response();
    }

    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Database not available")),
            )
                .into_response();
        }
    };

    match sqlx::query_as::<_, WorkRequest>(
        r#"
        SELECT id, service, name, industry, other, email, phone, message,
               agreement, date, time, timezone, meeting_mode, status, created_at
        FROM work_requests
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool.as_ref())
    .await
    {
        Ok(requests) => {
            let total = requests.len() as i64;
            (
                StatusCode::OK,
                Json(WorkRequestsListResponse { requests, total }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load work requests: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load work requests")),
            )
                .into_response()
        }
    }
}

/// PATCH /api/work-requests/{id} (admin)
/// Move a request along the review pipeline.
pub async fn update_work_request_status(
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers) {
        return err_response.into_response();
    }

    let status = match WorkRequestStatus::from_str(&payload.status) {
        Some(status) => status,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid status".to_string(),
                    message: Some(
                        "Expected new, reviewing, scheduled, or completed".to_string(),
                    ),
                }),
            )
                .into_response();
        }
    };

    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Database not available")),
            )
                .into_response();
        }
    };

    match sqlx::query_as::<_, WorkRequest>(
        r#"
        UPDATE work_requests SET status = $1 WHERE id = $2
        RETURNING id, service, name, industry, other, email, phone, message,
                  agreement, date, time, timezone, meeting_mode, status, created_at
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool.as_ref())
    .await
    {
        Ok(Some(request)) => (StatusCode::OK, Json(request)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Work request not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update work request {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update work request")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::validate::BookingContext;
    use crate::routes::auth::{Claims, ADMIN_EMAIL, JWT_SECRET};
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, patch, post};
    use axum::Router;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tower::ServiceExt;

    fn work_requests_router() -> Router {
        Router::new()
            .route("/api/work-requests", post(submit_work_request))
            .route("/api/work-requests", get(list_work_requests))
            .route("/api/work-requests/{id}", patch(update_work_request_status))
    }

    fn admin_token() -> String {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: "test-admin".to_string(),
            email: ADMIN_EMAIL.clone(),
            role: "SUPER_ADMIN".to_string(),
            exp: (now + chrono::Duration::minutes(5)).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    fn valid_submission() -> BookingSubmission {
        // Tomorrow keeps the slot from going stale mid-test.
        let tomorrow = Local::now().date_naive() + chrono::Duration::days(1);
        BookingSubmission {
            service: "Brand Design".to_string(),
            name: "Ada Obi".to_string(),
            industry: "Fashion".to_string(),
            other: String::new(),
            email: "ada@example.com".to_string(),
            phone: "+234 800 000 0000".to_string(),
            message: "Rebrand for our spring line.".to_string(),
            agreement: true,
            date: tomorrow.format("%Y-%m-%d").to_string(),
            time: "10:00".to_string(),
            timezone: "Africa/Lagos".to_string(),
            meeting_mode: "video".to_string(),
            context: BookingContext::WorkWithMe,
        }
    }

    #[tokio::test]
    async fn test_empty_booking_is_rejected_with_field_errors() {
        let req = Request::post("/api/work-requests")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&BookingSubmission::default()).unwrap(),
            ))
            .unwrap();
        let (status, body) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], validate::REQUIRED_FIELDS_MESSAGE);
        assert_eq!(body["state"], "rejected");
        let fields: Vec<&str> = body["fieldErrors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"service"));
        assert!(fields.contains(&"agreement"));
        assert!(fields.contains(&"date"));
    }

    #[tokio::test]
    async fn test_past_date_is_rejected() {
        let submission = BookingSubmission {
            date: "2020-01-01".to_string(),
            ..valid_submission()
        };
        let req = Request::post("/api/work-requests")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&submission).unwrap()))
            .unwrap();
        let (status, body) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields: Vec<&str> = body["fieldErrors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["date"]);
    }

    #[tokio::test]
    async fn test_portfolio_call_skips_the_service_field() {
        let submission = BookingSubmission {
            service: String::new(),
            context: BookingContext::PortfolioCall,
            ..valid_submission()
        };
        let req = Request::post("/api/work-requests")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&submission).unwrap()))
            .unwrap();
        // Passing the gate with no store lands on unavailable, not rejection.
        let (status, body) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], BOOKING_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_valid_booking_without_store_is_unavailable() {
        let req = Request::post("/api/work-requests")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&valid_submission()).unwrap()))
            .unwrap();
        let (status, body) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], BOOKING_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_list_work_requests_requires_auth() {
        let req = Request::get("/api/work-requests")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_pipeline_stage() {
        let req = Request::patch(format!("/api/work-requests/{}", Uuid::new_v4()))
            .header("authorization", format!("Bearer {}", admin_token()))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&UpdateStatusRequest {
                    status: "archived".to_string(),
                })
                .unwrap(),
            ))
            .unwrap();
        let (status, body) = send(work_requests_router(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid status");
    }
}
