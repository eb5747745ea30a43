/**
 * Schedule Routes
 * The booking calendar as served to the work-with-me form
 */
use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::content::classify::{self, PortalKind};
use crate::content::model::WorkFormConfig;
use crate::content::schedule::{self, CalendarCell, TimeFormat};
use crate::content::{defaults, reconcile};
use crate::routes::content::load_portals;
use crate::routes::ErrorResponse;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    #[serde(default)]
    pub format: TimeFormat,
}

#[derive(Debug, Serialize)]
pub struct SlotView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub today: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
    pub slots: Vec<SlotView>,
    pub options: WorkFormConfig,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/schedule
/// The 42-cell month grid, the slot list in the requested label format, and
/// the option lists the booking form renders. Defaults to the current month.
pub async fn get_schedule(Query(query): Query<ScheduleQuery>) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let cells = match schedule::month_grid(today, year, month) {
        Some(cells) => cells,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid month")),
            )
                .into_response();
        }
    };

    let slots = schedule::time_slots()
        .into_iter()
        .map(|value| SlotView {
            label: schedule::slot_label(&value, query.format),
            value,
        })
        .collect();

    let options = booking_options().await;

    (
        StatusCode::OK,
        Json(ScheduleResponse {
            today,
            year,
            month,
            cells,
            slots,
            options,
        }),
    )
        .into_response()
}

/// The option lists in effect: the work-with-me portal's payload (complete
/// after reconciliation), or the catalog form when no store is reachable.
async fn booking_options() -> WorkFormConfig {
    let portals = load_portals()
        .await
        .unwrap_or_else(|| reconcile::reconcile_portals(Vec::new()));
    portals
        .iter()
        .filter(|portal| classify::resolve(portal) == PortalKind::WorkWithMe)
        .find_map(|portal| portal.work_form.clone())
        .unwrap_or_else(defaults::default_work_form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn schedule_router() -> Router {
        Router::new().route("/api/schedule", get(get_schedule))
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = schedule_router().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_schedule_defaults_to_the_current_month() {
        let req = Request::get("/api/schedule").body(Body::empty()).unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);

        let today = Local::now().date_naive();
        assert_eq!(body["year"], today.year());
        assert_eq!(body["month"], today.month());
        assert_eq!(body["cells"].as_array().unwrap().len(), schedule::GRID_CELLS);
        assert_eq!(body["slots"].as_array().unwrap().len(), 21);
        assert_eq!(body["slots"][0]["value"], "09:00");
        assert_eq!(body["slots"][0]["label"], "09:00");
    }

    #[tokio::test]
    async fn test_requested_month_grid_leads_with_prior_days() {
        let req = Request::get("/api/schedule?year=2026&month=8")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        // August 2026 starts on a Saturday, so the grid opens in July.
        assert_eq!(body["cells"][0]["date"], "2026-07-26");
        assert_eq!(body["cells"][0]["in_current_month"], false);
        assert_eq!(body["cells"][6]["date"], "2026-08-01");
        assert_eq!(body["cells"][6]["in_current_month"], true);
    }

    #[tokio::test]
    async fn test_twelve_hour_format_changes_labels_not_values() {
        let req = Request::get("/api/schedule?format=12h")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slots"][0]["value"], "09:00");
        assert_eq!(body["slots"][0]["label"], "9:00 AM");
        let last = body["slots"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["value"], "19:00");
        assert_eq!(last["label"], "7:00 PM");
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let req = Request::get("/api/schedule?year=2026&month=13")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid month");
    }

    #[tokio::test]
    async fn test_options_fall_back_to_the_catalog_form() {
        let req = Request::get("/api/schedule").body(Body::empty()).unwrap();
        let (_, body) = send(req).await;
        let expected = serde_json::to_value(defaults::default_work_form()).unwrap();
        assert_eq!(body["options"], expected);
    }
}
