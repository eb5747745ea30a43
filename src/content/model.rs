//! Domain types for site content, portals, and the storefront.
//!
//! Stored payloads keep the column/JSON key names of the backing tables
//! (snake_case, optional keys omitted when absent) so rows written by older
//! revisions of the site still deserialize. Numeric fields that have been
//! free-text at some point (`price_ngn`, `price`, currency rates) parse
//! leniently: numbers pass through, numeric strings parse, anything else
//! present collapses to `0.0` so it reads as "unpriced" downstream.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::classify::PortalKind;

/// One blog post reference carried inside the about section. Only the
/// sitemap consumes these; either field may be missing on old rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPostRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// About section embedded in the site row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partners: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_posts: Option<Vec<BlogPostRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Personal portfolio sub-site payload embedded in the site row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// Fully merged site content served to the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub id: i64,
    pub hero_eyebrow: String,
    pub hero_tagline: String,
    pub hero_subline: String,
    pub logo_url: String,
    pub header_logo_url: String,
    pub instagram_url: String,
    pub tiktok_url: String,
    pub youtube_url: String,
    pub behance_url: String,
    pub dribbble_url: String,
    pub footer_text: String,
    pub about_section: AboutSection,
    pub portfolio_profile: PortfolioProfile,
}

/// Raw site row / admin draft: every field may be absent. NULL columns and
/// missing keys both land on `None` and fall back to the default catalog;
/// an empty string is a populated value and is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_eyebrow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behance_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dribbble_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_section: Option<AboutSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_profile: Option<PortfolioProfile>,
}

/// One navigation card. At most one kind-specific payload is populated;
/// `None` payloads inherit from the default catalog during reconciliation,
/// while `Some(vec![])` is a deliberate empty value and is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    /// Persisted classification tag. Recomputed on every save; `None` only
    /// on rows imported from before the tag existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PortalKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_kit: Option<SuccessKit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<ShopConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_form: Option<WorkFormConfig>,
}

/// One service entry inside a services portal. Addressed by array index
/// within its parent; no independent identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub media: Vec<String>,
}

impl Service {
    /// Deduplicated, trimmed gallery: the cover image followed by the media
    /// entries, empty values dropped, order preserved.
    pub fn gallery(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for raw in std::iter::once(self.image.as_str()).chain(self.media.iter().map(String::as_str))
        {
            let trimmed = raw.trim();
            if trimmed.is_empty() || seen.iter().any(|s| s == trimmed) {
                continue;
            }
            seen.push(trimmed.to_string());
        }
        seen
    }
}

/// Success-kit resource entry. `tags` is a comma-joined display string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessKitItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub link: String,
}

/// Success-kit payload: three fixed buckets. A missing bucket falls back to
/// the default catalog bucket; an empty one stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessKit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<SuccessKitItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<SuccessKitItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<SuccessKitItem>>,
}

/// Shop payload as stored. Field-level gaps are filled from the default
/// shop during reconciliation, so a served portal always carries a
/// complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// NGN per one unit of the target currency, keyed by currency code.
    #[serde(
        default,
        deserialize_with = "lenient_rates",
        skip_serializing_if = "Option::is_none"
    )]
    pub currency_rates: Option<HashMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ShopItem>>,
}

/// One shop inventory entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    #[serde(default)]
    pub title: String,
    /// Base price in the reference currency (NGN).
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_ngn: Option<f64>,
    /// Legacy price field, consulted only when `price_ngn` is absent.
    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub category: String,
}

impl ShopItem {
    /// Base value in NGN: `price_ngn`, falling back to the legacy `price`
    /// field, 0.0 when neither is usable.
    pub fn base_price(&self) -> f64 {
        self.price_ngn.or(self.price).unwrap_or(0.0)
    }
}

/// Option lists consumed by the booking form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkFormConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement_label: Option<String>,
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(loose_number))
}

fn lenient_rates<'de, D>(deserializer: D) -> Result<Option<HashMap<String, f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<HashMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(value.map(|map| {
        map.into_iter()
            .map(|(code, raw)| (code, loose_number(raw).unwrap_or(0.0)))
            .collect()
    }))
}

/// Media lists have been stored as a single string, a string array, and an
/// array of `{url}`/`{src}` objects at different points. Accept all three.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let entries = match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => vec![s],
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Object(map) => map
                    .get("url")
                    .or_else(|| map.get("src"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}

fn loose_number(value: serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Number(n) => Some(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_float_prefix(trimmed).unwrap_or(0.0))
            }
        }
        _ => Some(0.0),
    }
}

/// Parse the longest numeric prefix, the way legacy price strings such as
/// "120000 NGN" were entered.
fn parse_float_prefix(value: &str) -> Option<f64> {
    let bytes = value.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    value[..end].parse().ok()
}
