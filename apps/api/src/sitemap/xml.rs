//! Sitemaps protocol 0.9 serialisation.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use super::SitemapEntry;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn lastmod(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `<urlset>` document for page entries.
pub fn urlset(entries: &[SitemapEntry]) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<urlset xmlns=\"{SITEMAP_NS}\">\n");
    for entry in entries {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(&entry.url),
            lastmod(&entry.last_modified),
            entry.change_frequency.as_str(),
            entry.priority,
        );
    }
    xml.push_str("</urlset>\n");
    xml
}

/// `<sitemapindex>` document pointing at child sitemaps.
pub fn sitemap_index(entries: &[SitemapEntry]) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<sitemapindex xmlns=\"{SITEMAP_NS}\">\n");
    for entry in entries {
        let _ = write!(
            xml,
            "  <sitemap>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </sitemap>\n",
            escape(&entry.url),
            lastmod(&entry.last_modified),
        );
    }
    xml.push_str("</sitemapindex>\n");
    xml
}
