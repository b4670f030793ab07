//! The site's `sitemap.xml`.
//!
//! The pages are fixed. Every entry carries the same `lastmod`, which is the time the sitemap was generated, so
//! crawlers see the whole site as freshly modified on every fetch.
use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};

pub const SITEMAP_LASTMOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Daily => f.write_str("daily"),
            Self::Weekly => f.write_str("weekly"),
            Self::Monthly => f.write_str("monthly"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitemapPage {
    /// Relative to the site root, with a leading slash.
    pub path: &'static str,
    pub priority: f64,
    pub changefreq: ChangeFrequency,
}

impl SitemapPage {
    pub fn new(path: &'static str, priority: f64, changefreq: ChangeFrequency) -> Self {
        Self { path, priority, changefreq }
    }
}

pub const SITE_PAGES: [SitemapPage; 13] = [
    SitemapPage { path: "/", priority: 1.0, changefreq: ChangeFrequency::Daily },
    SitemapPage { path: "/landing-page", priority: 0.8, changefreq: ChangeFrequency::Weekly },
    SitemapPage { path: "/courses", priority: 0.8, changefreq: ChangeFrequency::Weekly },
    SitemapPage { path: "/about-us", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/events", priority: 0.8, changefreq: ChangeFrequency::Weekly },
    SitemapPage { path: "/workshops", priority: 0.8, changefreq: ChangeFrequency::Weekly },
    SitemapPage { path: "/inten", priority: 0.8, changefreq: ChangeFrequency::Weekly },
    SitemapPage { path: "/sign-in", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/login", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/terms", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/privacy-policy", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/shipping-policy", priority: 0.8, changefreq: ChangeFrequency::Monthly },
    SitemapPage { path: "/cancellation-policy", priority: 0.8, changefreq: ChangeFrequency::Monthly },
];

#[derive(Debug, Clone)]
pub struct Sitemap {
    base_url: String,
    pages: Vec<SitemapPage>,
}

impl Sitemap {
    pub fn new(base_url: &str) -> Self {
        Self::with_pages(base_url, SITE_PAGES.to_vec())
    }

    pub fn with_pages(base_url: &str, pages: Vec<SitemapPage>) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), pages }
    }

    pub fn render<Tz>(&self, lastmod: DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let lastmod = lastmod.format(SITEMAP_LASTMOD_FORMAT).to_string();
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for page in &self.pages {
            let loc = escape_xml(&format!("{}{}", self.base_url, page.path));
            // Writing to a String cannot fail
            let _ = write!(
                xml,
                "  <url>\n    <loc>{loc}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{}</changefreq>\n    \
                 <priority>{}</priority>\n  </url>\n",
                page.changefreq, page.priority
            );
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
