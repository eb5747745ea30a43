use axum::{body::Body, http::header, response::Response};
use lazy_static::lazy_static;
use regex::Regex;

use crate::content::model::SiteContent;
use crate::routes::content::load_site;

/// Pages that exist regardless of stored content.
const STATIC_PATHS: [&str; 8] = [
    "/",
    "/projects",
    "/products",
    "/shop",
    "/work-with-vakes",
    "/victormfabian",
    "/about",
    "/blog",
];

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Crawler-friendly slug: lowercased, `&` spelled out, every other
/// non-alphanumeric run collapsed to one hyphen, no edge hyphens.
fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase().replace('&', " and ");
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// One `/blog/<slug>` path per stored post reference. The stored slug wins,
/// then the title, then a positional fallback for rows with neither.
fn blog_paths(site: &SiteContent) -> Vec<String> {
    let posts = site.about_section.blog_posts.clone().unwrap_or_default();
    posts
        .iter()
        .enumerate()
        .map(|(index, post)| {
            let mut slug = post.slug.as_deref().map(slugify).unwrap_or_default();
            if slug.is_empty() {
                slug = post.title.as_deref().map(slugify).unwrap_or_default();
            }
            if slug.is_empty() {
                slug = format!("post-{}", index + 1);
            }
            format!("/blog/{}", slug)
        })
        .collect()
}

fn render_sitemap(base_url: &str, paths: &[String]) -> String {
    let mut urls = String::new();
    for path in paths {
        let priority = if path == "/" { "1.0" } else { "0.8" };
        urls.push_str("  <url>\n");
        urls.push_str(&format!(
            "    <loc>{}{}</loc>\n",
            escape_xml(base_url),
            escape_xml(path)
        ));
        urls.push_str("    <changefreq>weekly</changefreq>\n");
        urls.push_str(&format!("    <priority>{}</priority>\n", priority));
        urls.push_str("  </url>\n");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}</urlset>\n",
        urls,
    )
}

/// GET /sitemap.xml
/// The static page set plus one entry per stored blog post, deduplicated.
/// Always 200; when no stored content is reachable the static set is served
/// alone and without the CDN caching header.
pub async fn sitemap_xml() -> Response {
    let base_url = std::env::var("SITE_URL").unwrap_or_else(|_| "https://vakes.world".to_string());

    let site = load_site().await;
    let loaded = site.is_some();

    let mut paths: Vec<String> = STATIC_PATHS.iter().map(|p| (*p).to_string()).collect();
    if let Some(site) = &site {
        for path in blog_paths(site) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    let xml = render_sitemap(&base_url, &paths);

    let mut builder = Response::builder()
        .status(200)
        .header(header::CONTENT_TYPE, "application/xml; charset=utf-8");
    if loaded {
        builder = builder.header(
            header::CACHE_CONTROL,
            "s-maxage=900, stale-while-revalidate=86400",
        );
    }
    builder.body(Body::from(xml)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::defaults;
    use crate::content::model::BlogPostRef;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<loc>"), "&lt;loc&gt;");
        assert_eq!(escape_xml("\"quote\""), "&quot;quote&quot;");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World!"), "hello-world");
        assert_eq!(slugify("Design & Art"), "design-and-art");
        assert_eq!(slugify("  --Already-Sluggy--  "), "already-sluggy");
        assert_eq!(slugify("???"), "");
        assert_eq!(slugify("Objets d'Art, Vol. 2"), "objets-d-art-vol-2");
    }

    #[test]
    fn test_blog_paths_fall_back_from_slug_to_title_to_position() {
        let mut site = defaults::default_site();
        site.about_section.blog_posts = Some(vec![
            BlogPostRef {
                title: None,
                slug: Some("My First Post".to_string()),
            },
            BlogPostRef {
                title: Some("Design & Art".to_string()),
                slug: None,
            },
            BlogPostRef {
                title: None,
                slug: None,
            },
            BlogPostRef {
                title: Some("".to_string()),
                slug: Some("???".to_string()),
            },
        ]);
        assert_eq!(
            blog_paths(&site),
            vec![
                "/blog/my-first-post",
                "/blog/design-and-art",
                "/blog/post-3",
                "/blog/post-4",
            ]
        );
    }

    #[test]
    fn test_render_prioritizes_the_home_page() {
        let paths = vec!["/".to_string(), "/shop".to_string()];
        let xml = render_sitemap("https://vakes.world", &paths);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<loc>https://vakes.world/</loc>"));
        assert!(xml.contains("<loc>https://vakes.world/shop</loc>"));
        assert_eq!(xml.matches("<priority>1.0</priority>").count(), 1);
        assert_eq!(xml.matches("<priority>0.8</priority>").count(), 1);
        assert_eq!(xml.matches("<changefreq>weekly</changefreq>").count(), 2);
    }

    #[tokio::test]
    async fn test_sitemap_serves_the_static_set_without_a_store() {
        let app = Router::new().route("/sitemap.xml", get(sitemap_xml));
        let res = app
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/xml; charset=utf-8"
        );
        assert!(res.headers().get(header::CACHE_CONTROL).is_none());

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let xml = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(xml.matches("<url>").count(), STATIC_PATHS.len());
        assert!(xml.contains("/work-with-vakes</loc>"));
        assert!(xml.contains("/victormfabian</loc>"));
    }
}
