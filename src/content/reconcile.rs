//! Reconciliation of raw store rows with the default catalog.
//!
//! The merge never overwrites a populated field: only `None` inherits, and
//! a deliberately emptied list stays empty at the portal level. Inside a
//! payload, field gaps are filled from the catalog (a shop without rates
//! gets the default rate table) so consumers downstream read complete
//! config without re-deriving defaults.

use super::classify::{self, PortalKind};
use super::defaults;
use super::model::{
    AboutSection, Portal, PortfolioProfile, ShopConfig, SiteContent, SitePatch, SuccessKit,
    WorkFormConfig,
};

/// Merge the raw site row over the default site. An absent row yields the
/// defaults exactly; a NULL column falls back per field; empty strings are
/// populated values and survive.
pub fn reconcile_site(remote: Option<SitePatch>) -> SiteContent {
    let fallback = defaults::default_site();
    let Some(patch) = remote else {
        return fallback;
    };
    SiteContent {
        id: fallback.id,
        hero_eyebrow: patch.hero_eyebrow.unwrap_or(fallback.hero_eyebrow),
        hero_tagline: patch.hero_tagline.unwrap_or(fallback.hero_tagline),
        hero_subline: patch.hero_subline.unwrap_or(fallback.hero_subline),
        logo_url: patch.logo_url.unwrap_or(fallback.logo_url),
        header_logo_url: patch.header_logo_url.unwrap_or(fallback.header_logo_url),
        instagram_url: patch.instagram_url.unwrap_or(fallback.instagram_url),
        tiktok_url: patch.tiktok_url.unwrap_or(fallback.tiktok_url),
        youtube_url: patch.youtube_url.unwrap_or(fallback.youtube_url),
        behance_url: patch.behance_url.unwrap_or(fallback.behance_url),
        dribbble_url: patch.dribbble_url.unwrap_or(fallback.dribbble_url),
        footer_text: patch.footer_text.unwrap_or(fallback.footer_text),
        about_section: merge_about(patch.about_section, fallback.about_section),
        portfolio_profile: merge_profile(patch.portfolio_profile, fallback.portfolio_profile),
    }
}

/// Merge remote portals with the default catalog. No rows at all yields
/// the default portals verbatim.
pub fn reconcile_portals(remote: Vec<Portal>) -> Vec<Portal> {
    let catalog = defaults::default_portals();
    if remote.is_empty() {
        return catalog;
    }
    remote
        .into_iter()
        .map(|portal| reconcile_portal(portal, &catalog))
        .collect()
}

fn reconcile_portal(mut portal: Portal, catalog: &[Portal]) -> Portal {
    if let Some(matched) = default_match(&portal, catalog) {
        if portal.services.is_none() {
            portal.services = matched.services.clone();
        }
        if portal.success_kit.is_none() {
            portal.success_kit = matched.success_kit.clone();
        }
        if portal.shop.is_none() {
            portal.shop = matched.shop.clone();
        }
        if portal.work_form.is_none() {
            portal.work_form = matched.work_form.clone();
        }
    }

    // Success-kit portals have no default catalog entry; they inherit the
    // catalog kit directly whenever they carry none of their own.
    if portal.success_kit.is_none() && classify::resolve(&portal) == PortalKind::SuccessKit {
        portal.success_kit = Some(defaults::default_success_kit());
    }

    portal.shop = portal.shop.map(merge_shop);
    portal.success_kit = portal.success_kit.map(merge_success_kit);
    portal.work_form = portal.work_form.map(merge_work_form);

    // Rows imported from before the tag existed get classified here, after
    // inheritance, so payload evidence counts.
    if portal.kind.is_none() {
        portal.kind = Some(classify::classify(&portal));
    }
    portal
}

/// Find the catalog entry a remote portal corresponds to: exact `meta` or
/// `title` equality first, then matching classified kind. Generic portals
/// never match by kind.
fn default_match<'a>(portal: &Portal, catalog: &'a [Portal]) -> Option<&'a Portal> {
    if let Some(hit) = catalog
        .iter()
        .find(|entry| entry.meta == portal.meta || entry.title == portal.title)
    {
        return Some(hit);
    }
    let kind = classify::resolve(portal);
    if kind == PortalKind::Generic {
        return None;
    }
    catalog.iter().find(|entry| classify::resolve(entry) == kind)
}

/// Public navigation order: work-with-me first, services second, the rest
/// by `sort_order` with missing values last.
pub fn navigation_order(portals: &mut [Portal]) {
    portals.sort_by_key(|portal| {
        let group = match classify::resolve(portal) {
            PortalKind::WorkWithMe => 0,
            PortalKind::Services => 1,
            _ => 2,
        };
        (group, portal.sort_order.unwrap_or(i32::MAX))
    });
}

fn merge_about(patch: Option<AboutSection>, fallback: AboutSection) -> AboutSection {
    let Some(about) = patch else {
        return fallback;
    };
    AboutSection {
        image_url: about.image_url.or(fallback.image_url),
        bio: about.bio.or(fallback.bio),
        team: about.team.or(fallback.team),
        partners: about.partners.or(fallback.partners),
        blog_links: about.blog_links.or(fallback.blog_links),
        blog_posts: about.blog_posts.or(fallback.blog_posts),
        email: about.email.or(fallback.email),
        phone: about.phone.or(fallback.phone),
    }
}

fn merge_profile(patch: Option<PortfolioProfile>, fallback: PortfolioProfile) -> PortfolioProfile {
    let Some(profile) = patch else {
        return fallback;
    };
    PortfolioProfile {
        name: profile.name.or(fallback.name),
        headline: profile.headline.or(fallback.headline),
        bio: profile.bio.or(fallback.bio),
        image_url: profile.image_url.or(fallback.image_url),
        highlights: profile.highlights.or(fallback.highlights),
        contact_email: profile.contact_email.or(fallback.contact_email),
    }
}

/// Fill shop config gaps from the default shop. An empty item list reads
/// as "not configured yet" and gets the catalog items; an empty rate map
/// is kept and prices as unpriced.
fn merge_shop(shop: ShopConfig) -> ShopConfig {
    let fallback = defaults::default_shop();
    ShopConfig {
        enabled: shop.enabled.or(fallback.enabled),
        currency: shop
            .currency
            .filter(|currency| !currency.trim().is_empty())
            .or(fallback.currency),
        currency_rates: shop.currency_rates.or(fallback.currency_rates),
        items: shop
            .items
            .filter(|items| !items.is_empty())
            .or(fallback.items),
    }
}

fn merge_success_kit(kit: SuccessKit) -> SuccessKit {
    let fallback = defaults::default_success_kit();
    SuccessKit {
        assets: kit.assets.or(fallback.assets),
        tools: kit.tools.or(fallback.tools),
        courses: kit.courses.or(fallback.courses),
    }
}

fn merge_work_form(form: WorkFormConfig) -> WorkFormConfig {
    let fallback = defaults::default_work_form();
    WorkFormConfig {
        services: form.services.or(fallback.services),
        industries: form.industries.or(fallback.industries),
        meeting_modes: form.meeting_modes.or(fallback.meeting_modes),
        timezones: form.timezones.or(fallback.timezones),
        agreement_label: form.agreement_label.or(fallback.agreement_label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::model::Service;

    #[test]
    fn test_absent_inputs_yield_defaults_verbatim() {
        assert_eq!(reconcile_site(None), defaults::default_site());
        assert_eq!(reconcile_portals(Vec::new()), defaults::default_portals());
    }

    #[test]
    fn test_site_fields_overlay_per_field() {
        let patch = SitePatch {
            hero_eyebrow: Some("New Season".to_string()),
            footer_text: Some(String::new()),
            ..Default::default()
        };
        let merged = reconcile_site(Some(patch));
        assert_eq!(merged.hero_eyebrow, "New Season");
        // Empty string is a populated value, not an absence.
        assert_eq!(merged.footer_text, "");
        // Untouched fields come from the catalog.
        assert_eq!(merged.hero_tagline, "Pioneering Visions");
    }

    #[test]
    fn test_about_section_merges_inside() {
        let patch = SitePatch {
            about_section: Some(AboutSection {
                bio: Some("We build worlds.".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = reconcile_site(Some(patch));
        assert_eq!(merged.about_section.bio.as_deref(), Some("We build worlds."));
        assert_eq!(
            merged.about_section.team,
            defaults::default_about().team,
        );
    }

    #[test]
    fn test_null_shop_inherits_complete_default() {
        let remote = vec![Portal {
            id: Some(3),
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            shop: None,
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let shop = merged[0].shop.as_ref().unwrap();
        assert_eq!(shop.enabled, Some(true));
        assert_eq!(
            shop.items.as_ref().map(|items| items.len()),
            defaults::default_shop().items.map(|items| items.len())
        );
        assert_eq!(merged[0].kind, Some(PortalKind::Shop));
    }

    #[test]
    fn test_populated_payloads_are_never_overwritten() {
        let remote = vec![Portal {
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            shop: Some(ShopConfig {
                enabled: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let shop = merged[0].shop.as_ref().unwrap();
        assert_eq!(shop.enabled, Some(false));
    }

    #[test]
    fn test_emptied_services_list_stays_empty() {
        let remote = vec![Portal {
            meta: "Services".to_string(),
            title: "Creative Systems".to_string(),
            services: Some(Vec::new()),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        assert_eq!(merged[0].services, Some(Vec::new()));
    }

    #[test]
    fn test_title_equality_matches_the_catalog() {
        let remote = vec![Portal {
            meta: "Whatever".to_string(),
            title: "Creative Systems".to_string(),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let services = merged[0].services.as_ref().unwrap();
        assert_eq!(services.len(), 4);
        // With the inherited payload on board, the untagged portal
        // classifies as services.
        assert_eq!(merged[0].kind, Some(PortalKind::Services));
    }

    #[test]
    fn test_kind_match_when_text_differs() {
        let remote = vec![Portal {
            meta: "Our Shop Front".to_string(),
            title: "Things".to_string(),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        assert!(merged[0].shop.is_some());
        assert_eq!(merged[0].kind, Some(PortalKind::Shop));
    }

    #[test]
    fn test_generic_portals_inherit_nothing() {
        let remote = vec![Portal {
            meta: "Journal".to_string(),
            title: "Notes".to_string(),
            href: "https://example.com".to_string(),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        assert!(merged[0].services.is_none());
        assert!(merged[0].shop.is_none());
        assert!(merged[0].work_form.is_none());
        assert_eq!(merged[0].kind, Some(PortalKind::Generic));
    }

    #[test]
    fn test_success_kit_portal_gets_the_catalog_kit() {
        let remote = vec![Portal {
            meta: "Success Kit".to_string(),
            title: "Resources".to_string(),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        assert_eq!(merged[0].success_kit, Some(defaults::default_success_kit()));
        assert_eq!(merged[0].kind, Some(PortalKind::SuccessKit));
    }

    #[test]
    fn test_partial_success_kit_fills_missing_buckets() {
        let remote = vec![Portal {
            meta: "Success Kit".to_string(),
            title: "Resources".to_string(),
            success_kit: Some(SuccessKit {
                assets: Some(Vec::new()),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let kit = merged[0].success_kit.as_ref().unwrap();
        // The emptied bucket stays empty; the missing ones fill in.
        assert_eq!(kit.assets, Some(Vec::new()));
        assert_eq!(kit.tools, defaults::default_success_kit().tools);
        assert_eq!(kit.courses, defaults::default_success_kit().courses);
    }

    #[test]
    fn test_shop_gaps_fill_from_catalog() {
        let custom_item = crate::content::model::ShopItem {
            title: "Zine".to_string(),
            price_ngn: Some(5000.0),
            ..Default::default()
        };
        let remote = vec![Portal {
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            shop: Some(ShopConfig {
                items: Some(vec![custom_item.clone()]),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let shop = merged[0].shop.as_ref().unwrap();
        assert_eq!(shop.enabled, Some(true));
        assert_eq!(shop.currency.as_deref(), Some("NGN"));
        assert_eq!(shop.currency_rates, defaults::default_shop().currency_rates);
        assert_eq!(shop.items, Some(vec![custom_item]));
    }

    #[test]
    fn test_empty_item_list_reads_as_unconfigured() {
        let remote = vec![Portal {
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            shop: Some(ShopConfig {
                items: Some(Vec::new()),
                ..Default::default()
            }),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        let shop = merged[0].shop.as_ref().unwrap();
        assert_eq!(
            shop.items.as_ref().map(|items| items.len()),
            Some(defaults::default_shop().items.unwrap().len())
        );
    }

    #[test]
    fn test_stored_kind_survives_retitling() {
        let remote = vec![Portal {
            meta: "Shop".to_string(),
            title: "Objects".to_string(),
            kind: Some(PortalKind::Generic),
            ..Default::default()
        }];
        let merged = reconcile_portals(remote);
        assert_eq!(merged[0].kind, Some(PortalKind::Generic));
    }

    #[test]
    fn test_navigation_puts_booking_first_then_services() {
        fn bare(meta: &str, title: &str, sort_order: Option<i32>) -> Portal {
            Portal {
                meta: meta.to_string(),
                title: title.to_string(),
                sort_order,
                ..Default::default()
            }
        }
        let mut portals = vec![
            bare("Journal", "Notes", Some(4)),
            bare("Shop", "Objects", Some(3)),
            bare("Services", "Creative Systems", Some(1)),
            bare("Work With VAKES", "Start a Project", Some(2)),
            bare("Archive", "Past Work", None),
        ];
        navigation_order(&mut portals);
        let metas: Vec<&str> = portals.iter().map(|p| p.meta.as_str()).collect();
        assert_eq!(
            metas,
            vec!["Work With VAKES", "Services", "Shop", "Journal", "Archive"]
        );
    }

    #[test]
    fn test_services_payload_counts_for_navigation() {
        let mut portals = vec![
            Portal {
                meta: "Journal".to_string(),
                title: "Notes".to_string(),
                sort_order: Some(1),
                ..Default::default()
            },
            Portal {
                meta: "Studio".to_string(),
                title: "What we do".to_string(),
                sort_order: Some(2),
                services: Some(vec![Service::default()]),
                ..Default::default()
            },
        ];
        navigation_order(&mut portals);
        assert_eq!(portals[0].meta, "Studio");
    }
}
