//! Database Models - structs representing database tables (used by sqlx/serde).
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::content::classify::PortalKind;
use crate::content::model::{Portal, SitePatch};

/// Raw site content row. Scalar columns are nullable so absent values
/// fall through reconciliation untouched.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SiteContentRow {
    pub id: i64,
    pub hero_eyebrow: Option<String>,
    pub hero_tagline: Option<String>,
    pub hero_subline: Option<String>,
    pub logo_url: Option<String>,
    pub header_logo_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub youtube_url: Option<String>,
    pub behance_url: Option<String>,
    pub dribbble_url: Option<String>,
    pub footer_text: Option<String>,
    pub about_section: Option<serde_json::Value>,
    pub portfolio_profile: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl SiteContentRow {
    /// Convert the row into a merge patch. Unreadable JSONB columns
    /// behave as absent.
    pub fn into_patch(self) -> SitePatch {
        SitePatch {
            id: Some(self.id),
            hero_eyebrow: self.hero_eyebrow,
            hero_tagline: self.hero_tagline,
            hero_subline: self.hero_subline,
            logo_url: self.logo_url,
            header_logo_url: self.header_logo_url,
            instagram_url: self.instagram_url,
            tiktok_url: self.tiktok_url,
            youtube_url: self.youtube_url,
            behance_url: self.behance_url,
            dribbble_url: self.dribbble_url,
            footer_text: self.footer_text,
            about_section: decode_json(self.about_section),
            portfolio_profile: decode_json(self.portfolio_profile),
        }
    }
}

/// Raw portal row with region payloads as stored.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PortalRow {
    pub id: i64,
    pub meta: String,
    pub title: String,
    pub href: String,
    pub sort_order: Option<i32>,
    pub kind: Option<String>,
    pub services: Option<serde_json::Value>,
    pub success_kit: Option<serde_json::Value>,
    pub shop: Option<serde_json::Value>,
    pub work_form: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl PortalRow {
    pub fn into_portal(self) -> Portal {
        Portal {
            id: Some(self.id),
            meta: self.meta,
            title: self.title,
            href: self.href,
            sort_order: self.sort_order,
            kind: self.kind.as_deref().and_then(PortalKind::from_tag),
            services: decode_json(self.services),
            success_kit: decode_json(self.success_kit),
            shop: decode_json(self.shop),
            work_form: decode_json(self.work_form),
        }
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(value: Option<serde_json::Value>) -> Option<T> {
    value.and_then(|value| serde_json::from_value(value).ok())
}

/// Shop order model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub product_title: String,
    pub product_category: String,
    pub product_price: String,
    pub product_image: String,
    pub size: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub currency: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// New order for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_title: String,
    pub product_category: String,
    pub product_price: String,
    pub product_image: String,
    pub size: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub currency: String,
    pub amount: f64,
}

/// Work request model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequest {
    pub id: Uuid,
    pub service: String,
    pub name: String,
    pub industry: String,
    pub other: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub agreement: bool,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub meeting_mode: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// New work request for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkRequest {
    pub service: String,
    pub name: String,
    pub industry: String,
    pub other: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub agreement: bool,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub meeting_mode: String,
}

/// Order fulfilment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PaymentPending,
    Paid,
    Fulfillment,
    Completed,
}

impl OrderStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "payment_pending" => Some(Self::PaymentPending),
            "paid" => Some(Self::Paid),
            "fulfillment" => Some(Self::Fulfillment),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentPending => "payment_pending",
            Self::Paid => "paid",
            Self::Fulfillment => "fulfillment",
            Self::Completed => "completed",
        }
    }
}

/// Work request triage pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkRequestStatus {
    New,
    Reviewing,
    Scheduled,
    Completed,
}

impl WorkRequestStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Some(Self::New),
            "reviewing" => Some(Self::Reviewing),
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewing => "reviewing",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn bare_row() -> PortalRow {
        PortalRow {
            id: 7,
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            href: "#".to_string(),
            sort_order: Some(3),
            kind: None,
            services: None,
            success_kit: None,
            shop: None,
            work_form: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_portal_row_decodes_payloads() {
        let mut row = bare_row();
        row.kind = Some("shop".to_string());
        row.shop = Some(json!({ "enabled": false, "items": [] }));

        let portal = row.into_portal();
        assert_eq!(portal.kind, Some(PortalKind::Shop));
        let shop = portal.shop.unwrap();
        assert_eq!(shop.enabled, Some(false));
        assert_eq!(shop.items, Some(Vec::new()));
    }

    #[test]
    fn test_unreadable_payload_behaves_as_absent() {
        let mut row = bare_row();
        row.services = Some(json!("not a list"));
        row.kind = Some("something else".to_string());

        let portal = row.into_portal();
        assert!(portal.services.is_none());
        assert!(portal.kind.is_none());
    }

    #[test]
    fn test_site_row_keeps_null_columns_absent() {
        let row = SiteContentRow {
            id: 1,
            hero_eyebrow: Some("VAKES".to_string()),
            hero_tagline: None,
            hero_subline: None,
            logo_url: None,
            header_logo_url: None,
            instagram_url: None,
            tiktok_url: None,
            youtube_url: None,
            behance_url: None,
            dribbble_url: None,
            footer_text: None,
            about_section: Some(json!({ "bio": "hello" })),
            portfolio_profile: Some(json!(42)),
            updated_at: Utc::now(),
        };
        let patch = row.into_patch();
        assert_eq!(patch.id, Some(1));
        assert_eq!(patch.hero_eyebrow.as_deref(), Some("VAKES"));
        assert!(patch.hero_tagline.is_none());
        assert_eq!(
            patch.about_section.as_ref().and_then(|a| a.bio.as_deref()),
            Some("hello")
        );
        assert!(patch.portfolio_profile.is_none());
    }

    #[test]
    fn test_status_tags_round_trip() {
        for status in [
            OrderStatus::PaymentPending,
            OrderStatus::Paid,
            OrderStatus::Fulfillment,
            OrderStatus::Completed,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_str(" Paid "), Some(OrderStatus::Paid));
        assert!(OrderStatus::from_str("shipped").is_none());

        assert_eq!(
            WorkRequestStatus::from_str("scheduled"),
            Some(WorkRequestStatus::Scheduled)
        );
        assert!(WorkRequestStatus::from_str("archived").is_none());
    }
}
