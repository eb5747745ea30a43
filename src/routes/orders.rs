/**
 * Order Routes
 * Shop checkout for visitors, order pipeline for the admin
 */
use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::classify::{self, PortalKind};
use crate::content::model::{Portal, ShopConfig};
use crate::content::validate::{self, CheckoutSubmission, FieldErrors, SubmitState};
use crate::content::{defaults, pricing, reconcile};
use crate::db;
use crate::db::models::{Order, OrderStatus};
use crate::routes::auth::verify_admin;
use crate::routes::content::load_portals;
use crate::routes::{ErrorResponse, SubmissionRejection};

/// Shown when checkout is attempted with no store connected
pub const CHECKOUT_UNAVAILABLE_MESSAGE: &str = "Checkout is unavailable right now.";

/// Shown when the item cannot be priced in the requested currency
pub const CHECKOUT_PRICE_MESSAGE: &str = "Set a valid NGN price and currency rates.";

/// Confirmation after the order lands
pub const CHECKOUT_SUCCESS_MESSAGE: &str =
    "Payment pending. We will reach out to complete payment.";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub state: SubmitState,
    pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersListResponse {
    pub orders: Vec<Order>,
    pub total: i64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ============================================================================
// Pricing
// ============================================================================

/// An order line priced server-side. The submitted title only selects the
/// item; everything money-related comes from the catalog.
#[derive(Debug, Clone, PartialEq)]
struct PricedProduct {
    title: String,
    category: String,
    image: String,
    price_label: String,
    currency: String,
    amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckoutError {
    ProductNotFound,
    Unpriced,
}

/// The shop configuration in effect: the first shop portal's payload,
/// or the catalog shop when none is stored.
fn resolve_shop(portals: &[Portal]) -> ShopConfig {
    portals
        .iter()
        .filter(|portal| classify::resolve(portal) == PortalKind::Shop)
        .find_map(|portal| portal.shop.clone())
        .unwrap_or_else(defaults::default_shop)
}

fn price_product(
    shop: &ShopConfig,
    product_title: &str,
    requested_currency: &str,
) -> Result<PricedProduct, CheckoutError> {
    let items = shop.items.clone().unwrap_or_default();
    let title = product_title.trim();
    let item = items
        .iter()
        .find(|item| item.title == title)
        .ok_or(CheckoutError::ProductNotFound)?;

    let requested = requested_currency.trim();
    let currency = if requested.is_empty() {
        shop.currency
            .clone()
            .unwrap_or_else(|| pricing::REFERENCE_CURRENCY.to_string())
    } else {
        requested.to_uppercase()
    };

    let rates = shop.currency_rates.clone().unwrap_or_default();
    let amount = pricing::amount_in(item, &currency, &rates);
    if amount <= 0.0 {
        return Err(CheckoutError::Unpriced);
    }

    Ok(PricedProduct {
        title: item.title.clone(),
        category: item.category.clone(),
        image: item.image.clone(),
        price_label: pricing::format_amount(amount, &currency),
        currency,
        amount,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/orders
/// Validate the checkout form, reprice the item from the live catalog,
/// and record the order as payment pending.
pub async fn submit_order(Json(payload): Json<CheckoutSubmission>) -> impl IntoResponse {
    let errors = validate::validate_checkout(&payload);
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

    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(CHECKOUT_UNAVAILABLE_MESSAGE)),
            )
                .into_response();
        }
    };

    let portals = load_portals()
        .await
        .unwrap_or_else(|| reconcile::reconcile_portals(Vec::new()));
    let shop = resolve_shop(&portals);

    let priced = match price_product(&shop, &payload.product_title, &payload.currency) {
        Ok(priced) => priced,
        Err(CheckoutError::ProductNotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Product not found")),
            )
                .into_response();
        }
        Err(CheckoutError::Unpriced) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::new(CHECKOUT_PRICE_MESSAGE)),
            )
                .into_response();
        }
    };

    match sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO orders (product_title, product_category, product_price, product_image,
            size, customer_name, customer_address, customer_email, customer_phone,
            currency, amount, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'payment_pending', now())
        RETURNING id
        "#,
    )
    .bind(&priced.title)
    .bind(&priced.category)
    .bind(&priced.price_label)
    .bind(&priced.image)
    .bind(&payload.size)
    .bind(&payload.full_name)
    .bind(&payload.address)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&priced.currency)
    .bind(priced.amount)
    .fetch_one(pool.as_ref())
    .await
    {
        Ok(order_id) => {
            tracing::info!(
                "Order received: '{}' at {} for {}",
                priced.title,
                priced.price_label,
                payload.email
            );
            (
                StatusCode::CREATED,
                Json(CheckoutResponse {
                    success: true,
                    message: CHECKOUT_SUCCESS_MESSAGE.to_string(),
                    state: SubmitState::Submitted,
                    order_id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to record order: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionRejection {
                    error: "Failed to submit order".to_string(),
                    field_errors: FieldErrors::default(),
                    state: SubmitState::Failed,
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/orders (admin)
pub async fn list_orders(headers: HeaderMap) -> impl IntoResponse {
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

    match sqlx::query_as::<_, Order>(
        r#"
        SELECT id, product_title, product_category, product_price, product_image,
               size, customer_name, customer_address, customer_email, customer_phone,
               currency, amount, status, created_at
        FROM orders
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool.as_ref())
    .await
    {
        Ok(orders) => {
            let total = orders.len() as i64;
            (StatusCode::OK, Json(OrdersListResponse { orders, total })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load orders: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load orders")),
            )
                .into_response()
        }
    }
}

/// PATCH /api/orders/{id} (admin)
/// Move an order along the payment pipeline.
pub async fn update_order_status(
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers) {
        return err_response.into_response();
    }

    let status = match OrderStatus::from_str(&payload.status) {
        Some(status) => status,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid status".to_string(),
                    message: Some(
                        "Expected payment_pending, paid, fulfillment, or completed".to_string(),
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

    match sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders SET status = $1 WHERE id = $2
        RETURNING id, product_title, product_category, product_price, product_image,
                  size, customer_name, customer_address, customer_email, customer_phone,
                  currency, amount, status, created_at
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool.as_ref())
    .await
    {
        Ok(Some(order)) => (StatusCode::OK, Json(order)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Order not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to update order {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to update order")),
            )
                .into_response()
        }
    }
}
