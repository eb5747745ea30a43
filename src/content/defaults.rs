//! Default content catalog: the fallback values served when the store has
//! no row, a row has gaps, or the store is unreachable. These are complete,
//! shippable content, not placeholders.

use std::collections::HashMap;

use super::classify::PortalKind;
use super::model::{
    AboutSection, Portal, PortfolioProfile, Service, ShopConfig, ShopItem, SiteContent,
    SuccessKit, SuccessKitItem, WorkFormConfig,
};

pub fn default_about() -> AboutSection {
    AboutSection {
        image_url: Some(String::new()),
        bio: Some(
            "VAKES World is a creative studio blending art, technology, and culture.".to_string(),
        ),
        team: Some(text_list(&["Creative Director", "Design Lead", "Engineering"])),
        partners: Some(text_list(&["Collaborators", "Studios", "Brands"])),
        blog_links: Some(Vec::new()),
        blog_posts: Some(Vec::new()),
        email: Some("hello@vakes.world".to_string()),
        phone: Some("+234 000 000 0000".to_string()),
    }
}

pub fn default_portfolio_profile() -> PortfolioProfile {
    PortfolioProfile {
        name: Some("Victor M. Fabian".to_string()),
        headline: Some("Creative director and multidisciplinary artist".to_string()),
        bio: Some(
            "Founder of VAKES World. Working across branding, digital art, and product design."
                .to_string(),
        ),
        image_url: Some(String::new()),
        highlights: Some(text_list(&[
            "Brand systems for studios and startups",
            "Digital art direction",
            "Product and interface design",
        ])),
        contact_email: Some("hello@vakes.world".to_string()),
    }
}

pub fn default_site() -> SiteContent {
    SiteContent {
        id: 1,
        hero_eyebrow: "Curated Creative Universe".to_string(),
        hero_tagline: "Pioneering Visions".to_string(),
        hero_subline: "Art. Technology. Culture.".to_string(),
        logo_url: "/src/assets/vakes-logo.png".to_string(),
        header_logo_url: String::new(),
        instagram_url: "https://www.instagram.com/vakesworld".to_string(),
        tiktok_url: "https://www.tiktok.com/@vakesworld".to_string(),
        youtube_url: "https://www.youtube.com/@vakesworld".to_string(),
        behance_url: String::new(),
        dribbble_url: String::new(),
        footer_text: "(c) VAKES World".to_string(),
        about_section: default_about(),
        portfolio_profile: default_portfolio_profile(),
    }
}

pub fn default_success_kit() -> SuccessKit {
    SuccessKit {
        assets: Some(vec![
            kit_item("Brand Kit Templates", "templates, identity, brand"),
            kit_item("Social Media Pack", "content, social, layouts"),
        ]),
        tools: Some(vec![
            kit_item("Creator Stack", "apps, workflow, publishing"),
            kit_item("Productivity System", "planning, checklists, ops"),
        ]),
        courses: Some(vec![
            kit_item("Brand Strategy Basics", "positioning, messaging"),
            kit_item("UI/UX Launchpad", "ui/ux, product"),
        ]),
    }
}

pub fn default_shop() -> ShopConfig {
    ShopConfig {
        enabled: Some(true),
        currency: Some("NGN".to_string()),
        currency_rates: Some(HashMap::from([
            ("USD".to_string(), 1500.0),
            ("GBP".to_string(), 1900.0),
            ("EUR".to_string(), 1700.0),
        ])),
        items: Some(vec![
            shop_item("Gallery Print", 120_000.0, &["S", "M", "L"], "art"),
            shop_item("Studio Hoodie", 85_000.0, &["S", "M", "L", "XL"], "clothing"),
            shop_item("Canvas Tote", 38_000.0, &["One Size"], "accessories"),
        ]),
    }
}

pub fn default_work_form() -> WorkFormConfig {
    WorkFormConfig {
        services: Some(text_list(&[
            "Branding",
            "Digital Art",
            "UI/UX Design",
            "Web & App Dev",
        ])),
        industries: Some(text_list(&[
            "Creative",
            "Tech",
            "Retail",
            "Hospitality",
            "Other",
        ])),
        meeting_modes: Some(text_list(&["Google Meet", "Zoom", "WhatsApp"])),
        timezones: Some(text_list(&[
            "Africa/Lagos",
            "Europe/London",
            "America/New_York",
            "UTC",
        ])),
        agreement_label: Some("I agree to be contacted about this request.".to_string()),
    }
}

pub fn default_portals() -> Vec<Portal> {
    vec![
        Portal {
            id: Some(1),
            meta: "Services".to_string(),
            title: "Creative Systems".to_string(),
            href: "#".to_string(),
            sort_order: Some(1),
            kind: Some(PortalKind::Services),
            services: Some(vec![
                service("Branding", "Identity systems, strategy, and visual direction."),
                service("Digital Art", "Illustration, motion, and immersive visuals."),
                service("UI/UX Design", "Product interfaces, flows, and usability systems."),
                service("Web & App Dev", "Full-stack builds, integrations, and launches."),
            ]),
            ..Default::default()
        },
        Portal {
            id: Some(2),
            meta: "Products & Ideas".to_string(),
            title: "Apps & SaaS".to_string(),
            href: "#".to_string(),
            sort_order: Some(2),
            kind: Some(PortalKind::Generic),
            ..Default::default()
        },
        Portal {
            id: Some(3),
            meta: "Shop".to_string(),
            title: "Objects & Editions".to_string(),
            href: "#".to_string(),
            sort_order: Some(3),
            kind: Some(PortalKind::Shop),
            shop: Some(default_shop()),
            ..Default::default()
        },
        Portal {
            id: Some(4),
            meta: "Work With VAKES".to_string(),
            title: "Start a Project".to_string(),
            href: "#".to_string(),
            sort_order: Some(4),
            kind: Some(PortalKind::WorkWithMe),
            work_form: Some(default_work_form()),
            ..Default::default()
        },
    ]
}

fn text_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn kit_item(title: &str, tags: &str) -> SuccessKitItem {
    SuccessKitItem {
        title: title.to_string(),
        tags: tags.to_string(),
        link: String::new(),
    }
}

fn shop_item(title: &str, price_ngn: f64, sizes: &[&str], category: &str) -> ShopItem {
    ShopItem {
        title: title.to_string(),
        price_ngn: Some(price_ngn),
        price: None,
        image: String::new(),
        images: Vec::new(),
        description: String::new(),
        sizes: text_list(sizes),
        category: category.to_string(),
    }
}

fn service(title: &str, description: &str) -> Service {
    Service {
        title: title.to_string(),
        description: description.to_string(),
        image: String::new(),
        media: Vec::new(),
    }
}
