/**
 * Content Routes
 * Reconciled site + portal catalog: public read, admin save
 */
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::cache::{ContentSnapshot, SnapshotCache};
use crate::content::classify;
use crate::content::model::{Portal, SiteContent, SitePatch};
use crate::content::{defaults, reconcile};
use crate::db;
use crate::db::models::{PortalRow, SiteContentRow};
use crate::routes::auth::verify_admin;
use crate::routes::ErrorResponse;

/// Rejection shown when a portal is missing its label or title
pub const SAVE_VALIDATION_MESSAGE: &str = "Every portal needs a meta label and title.";

/// Confirmation after a full save
pub const SAVED_MESSAGE: &str = "Saved.";

/// Shown when a save is attempted with no store connected
pub const SAVE_UNAVAILABLE_MESSAGE: &str = "Connect the database to save content.";

/// Notice attached when the cached snapshot is served
pub const CACHED_CONTENT_NOTICE: &str =
    "Showing the last saved snapshot. The content store is unreachable.";

/// Notice attached when only the defaults are available
pub const DEFAULT_CONTENT_NOTICE: &str =
    "Showing default content. Connect the database to load saved content.";

lazy_static::lazy_static! {
    /// Snapshot cache shared with the health routes
    pub static ref SNAPSHOT_CACHE: SnapshotCache = SnapshotCache::from_env();
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Where the served payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Store,
    Cache,
    Defaults,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub site: SiteContent,
    pub portals: Vec<Portal>,
    pub source: ContentSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContentRequest {
    #[serde(default)]
    pub site: Option<SitePatch>,
    #[serde(default)]
    pub portals: Vec<Portal>,
    #[serde(default)]
    pub deleted_portal_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveContentResponse {
    pub success: bool,
    pub message: String,
    pub site: SiteContent,
    pub portals: Vec<Portal>,
}

// ============================================================================
// Store access
// ============================================================================

/// Load and reconcile everything the public site needs in one pass.
async fn load_from_store() -> Result<ContentSnapshot, String> {
    let pool = db::get_pool().ok_or_else(|| "Database pool not initialized".to_string())?;

    let site_row = sqlx::query_as::<_, SiteContentRow>(
        r#"
        SELECT id, hero_eyebrow, hero_tagline, hero_subline, logo_url, header_logo_url,
               instagram_url, tiktok_url, youtube_url, behance_url, dribbble_url,
               footer_text, about_section, portfolio_profile, updated_at
        FROM site_content
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool.as_ref())
    .await
    .map_err(|e| e.to_string())?;

    let portal_rows = sqlx::query_as::<_, PortalRow>(
        r#"
        SELECT id, meta, title, href, sort_order, kind,
               services, success_kit, shop, work_form, updated_at
        FROM portals
        ORDER BY sort_order ASC NULLS LAST, id ASC
        "#,
    )
    .fetch_all(pool.as_ref())
    .await
    .map_err(|e| e.to_string())?;

    let site = reconcile::reconcile_site(site_row.map(SiteContentRow::into_patch));
    let mut portals = reconcile::reconcile_portals(
        portal_rows.into_iter().map(PortalRow::into_portal).collect(),
    );
    reconcile::navigation_order(&mut portals);

    Ok(ContentSnapshot { site, portals })
}

/// Fetch the reconciled portals without the site half. Orders and the
/// schedule view both price and configure off this.
pub async fn load_portals() -> Option<Vec<Portal>> {
    match load_from_store().await {
        Ok(snapshot) => Some(snapshot.portals),
        Err(_) => SNAPSHOT_CACHE.get().await.map(|snapshot| snapshot.portals),
    }
}

/// Fetch the reconciled site half. `None` when neither the store nor the
/// snapshot has anything; the sitemap degrades to its static set then.
pub async fn load_site() -> Option<SiteContent> {
    match load_from_store().await {
        Ok(snapshot) => Some(snapshot.site),
        Err(_) => SNAPSHOT_CACHE.get().await.map(|snapshot| snapshot.site),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/content
/// Always 200: the store when reachable, then the snapshot, then the
/// default catalog, with a notice naming the degradation.
pub async fn get_content() -> impl IntoResponse {
    match load_from_store().await {
        Ok(snapshot) => {
            if let Err(e) = SNAPSHOT_CACHE.put(&snapshot).await {
                tracing::debug!("Skipping snapshot refresh: {}", e);
            }
            Json(ContentResponse {
                site: snapshot.site,
                portals: snapshot.portals,
                source: ContentSource::Store,
                error: None,
            })
        }
        Err(store_error) => {
            tracing::warn!("Content store unavailable: {}", store_error);
            if let Some(snapshot) = SNAPSHOT_CACHE.get().await {
                return Json(ContentResponse {
                    site: snapshot.site,
                    portals: snapshot.portals,
                    source: ContentSource::Cache,
                    error: Some(CACHED_CONTENT_NOTICE.to_string()),
                });
            }
            let site = reconcile::reconcile_site(None);
            let mut portals = reconcile::reconcile_portals(Vec::new());
            reconcile::navigation_order(&mut portals);
            Json(ContentResponse {
                site,
                portals,
                source: ContentSource::Defaults,
                error: Some(DEFAULT_CONTENT_NOTICE.to_string()),
            })
        }
    }
}

/// PUT /api/content (admin)
/// Save the whole draft in one pass: site row, portal rows in draft
/// order, then deletions. Nothing is written when any portal fails the
/// label check.
pub async fn save_content(
    headers: HeaderMap,
    Json(payload): Json<SaveContentRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers) {
        return err_response.into_response();
    }

    // Normalize the draft before validating: labels trimmed, blank hrefs
    // back to '#', positions renumbered from the draft order. The kind tag
    // is recomputed from the normalized text on every save, so a submitted
    // tag never outlives the text it was derived from.
    let mut portals: Vec<Portal> = Vec::with_capacity(payload.portals.len());
    for (index, mut portal) in payload.portals.into_iter().enumerate() {
        portal.meta = portal.meta.trim().to_string();
        portal.title = portal.title.trim().to_string();
        let href = portal.href.trim().to_string();
        portal.href = if href.is_empty() { "#".to_string() } else { href };
        portal.sort_order = Some(index as i32 + 1);
        portal.kind = Some(classify::classify(&portal));
        portals.push(portal);
    }

    if portals
        .iter()
        .any(|portal| portal.meta.is_empty() || portal.title.is_empty())
    {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(SAVE_VALIDATION_MESSAGE)),
        )
            .into_response();
    }

    let pool = match db::get_pool() {
        Some(p) => p,
        None => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(SAVE_UNAVAILABLE_MESSAGE)),
            )
                .into_response();
        }
    };

    if let Some(site) = payload.site.clone() {
        // The about and profile columns always hold a concrete document,
        // falling back to the catalog when the draft carries none.
        let about = site
            .about_section
            .clone()
            .unwrap_or_else(defaults::default_about);
        let profile = site
            .portfolio_profile
            .clone()
            .unwrap_or_else(defaults::default_portfolio_profile);

        let result = sqlx::query(
            r#"
            INSERT INTO site_content (id, hero_eyebrow, hero_tagline, hero_subline, logo_url,
                header_logo_url, instagram_url, tiktok_url, youtube_url, behance_url,
                dribbble_url, footer_text, about_section, portfolio_profile, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now())
            ON CONFLICT (id) DO UPDATE SET
                hero_eyebrow = EXCLUDED.hero_eyebrow,
                hero_tagline = EXCLUDED.hero_tagline,
                hero_subline = EXCLUDED.hero_subline,
                logo_url = EXCLUDED.logo_url,
                header_logo_url = EXCLUDED.header_logo_url,
                instagram_url = EXCLUDED.instagram_url,
                tiktok_url = EXCLUDED.tiktok_url,
                youtube_url = EXCLUDED.youtube_url,
                behance_url = EXCLUDED.behance_url,
                dribbble_url = EXCLUDED.dribbble_url,
                footer_text = EXCLUDED.footer_text,
                about_section = EXCLUDED.about_section,
                portfolio_profile = EXCLUDED.portfolio_profile,
                updated_at = now()
            "#,
        )
        .bind(&site.hero_eyebrow)
        .bind(&site.hero_tagline)
        .bind(&site.hero_subline)
        .bind(&site.logo_url)
        .bind(&site.header_logo_url)
        .bind(&site.instagram_url)
        .bind(&site.tiktok_url)
        .bind(&site.youtube_url)
        .bind(&site.behance_url)
        .bind(&site.dribbble_url)
        .bind(&site.footer_text)
        .bind(payload_json(&Some(about)))
        .bind(payload_json(&Some(profile)))
        .execute(pool.as_ref())
        .await;

        if let Err(e) = result {
            tracing::error!("Failed to save site content: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save content")),
            )
                .into_response();
        }
    }

    for portal in &portals {
        let kind = classify::resolve(portal).as_str();

        let result = match portal.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO portals (id, meta, title, href, sort_order, kind,
                        services, success_kit, shop, work_form, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
                    ON CONFLICT (id) DO UPDATE SET
                        meta = EXCLUDED.meta,
                        title = EXCLUDED.title,
                        href = EXCLUDED.href,
                        sort_order = EXCLUDED.sort_order,
                        kind = EXCLUDED.kind,
                        services = EXCLUDED.services,
                        success_kit = EXCLUDED.success_kit,
                        shop = EXCLUDED.shop,
                        work_form = EXCLUDED.work_form,
                        updated_at = now()
                    "#,
                )
                .bind(id)
                .bind(&portal.meta)
                .bind(&portal.title)
                .bind(&portal.href)
                .bind(portal.sort_order)
                .bind(kind)
                .bind(payload_json(&portal.services))
                .bind(payload_json(&portal.success_kit))
                .bind(payload_json(&portal.shop))
                .bind(payload_json(&portal.work_form))
                .execute(pool.as_ref())
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO portals (meta, title, href, sort_order, kind,
                        services, success_kit, shop, work_form, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
                    "#,
                )
                .bind(&portal.meta)
                .bind(&portal.title)
                .bind(&portal.href)
                .bind(portal.sort_order)
                .bind(kind)
                .bind(payload_json(&portal.services))
                .bind(payload_json(&portal.success_kit))
                .bind(payload_json(&portal.shop))
                .bind(payload_json(&portal.work_form))
                .execute(pool.as_ref())
                .await
            }
        };

        if let Err(e) = result {
            tracing::error!("Failed to save portal '{}': {}", portal.meta, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save content")),
            )
                .into_response();
        }
    }

    if !payload.deleted_portal_ids.is_empty() {
        if let Err(e) = sqlx::query("DELETE FROM portals WHERE id = ANY($1)")
            .bind(&payload.deleted_portal_ids)
            .execute(pool.as_ref())
            .await
        {
            tracing::error!("Failed to delete portals: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to save content")),
            )
                .into_response();
        }
    }

    // Serve back the reconciled view of what was just saved and refresh
    // the snapshot so a store outage replays this state.
    let site = reconcile::reconcile_site(payload.site);
    let mut portals = reconcile::reconcile_portals(portals);
    reconcile::navigation_order(&mut portals);

    let snapshot = ContentSnapshot {
        site: site.clone(),
        portals: portals.clone(),
    };
    if let Err(e) = SNAPSHOT_CACHE.put(&snapshot).await {
        tracing::debug!("Skipping snapshot refresh: {}", e);
    }

    tracing::info!("Content saved: {} portals", portals.len());

    (
        StatusCode::OK,
        Json(SaveContentResponse {
            success: true,
            message: SAVED_MESSAGE.to_string(),
            site,
            portals,
        }),
    )
        .into_response()
}

fn payload_json<T: Serialize>(value: &Option<T>) -> Option<serde_json::Value> {
    value.as_ref().and_then(|value| serde_json::to_value(value).ok())
}
