//! Portal classification: which semantic card a portal renders as.
//!
//! The kind is stored on the portal row and recomputed on every save, so
//! `classify` is the write-time tagger and the fallback for rows imported
//! from before the tag existed. It inspects only the portal's own text and
//! payload, never its position in the list.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::Portal;

/// Semantic category of a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalKind {
    Services,
    Shop,
    SuccessKit,
    WorkWithMe,
    Portfolio,
    Generic,
}

impl PortalKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "services" => Some(Self::Services),
            "shop" => Some(Self::Shop),
            "success_kit" => Some(Self::SuccessKit),
            "work_with_me" => Some(Self::WorkWithMe),
            "portfolio" => Some(Self::Portfolio),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Shop => "shop",
            Self::SuccessKit => "success_kit",
            Self::WorkWithMe => "work_with_me",
            Self::Portfolio => "portfolio",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for PortalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a portal from its `meta`/`title` text and payload.
///
/// Precedence is fixed: success kit, then shop, then work-with-me, then
/// portfolio, then services. A portal with a non-empty `services` payload
/// counts as services even without the keyword. Everything else is generic.
pub fn classify(portal: &Portal) -> PortalKind {
    let meta = portal.meta.to_lowercase();
    let title = portal.title.to_lowercase();
    let matches = |keyword: &str| meta.contains(keyword) || title.contains(keyword);

    if matches("success kit") {
        PortalKind::SuccessKit
    } else if matches("shop") {
        PortalKind::Shop
    } else if matches("work with") || matches("start a project") {
        PortalKind::WorkWithMe
    } else if matches("portfolio") {
        PortalKind::Portfolio
    } else if matches("service") || portal.services.as_ref().is_some_and(|s| !s.is_empty()) {
        PortalKind::Services
    } else {
        PortalKind::Generic
    }
}

/// The portal's stored kind, falling back to classification for untagged
/// rows.
pub fn resolve(portal: &Portal) -> PortalKind {
    portal.kind.unwrap_or_else(|| classify(portal))
}
