use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

/// One parsed HTML file.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub file_name: String,
    pub title: String,
    pub url: Option<String>,
    /// Plain text of the whole document, title included.
    #[serde(skip_serializing)]
    pub text: String,
    /// Outgoing hyperlinks, resolved against `url` when possible.
    pub links: BTreeSet<String>,
}

/// Extract text, title and hyperlinks from `html`.
pub fn parse_page(file_name: &str, html: &str, url: Option<&str>) -> Page {
    let doc = Html::parse_document(html);
    let sel_title = Selector::parse("title").expect("valid selector");
    let sel_a = Selector::parse("a[href]").expect("valid selector");

    let title = doc
        .select(&sel_title)
        .next()
        .map(|n| n.text().collect::<String>())
        .unwrap_or_default();
    let text = doc.root_element().text().collect::<Vec<_>>().join(" ");

    let base = url.and_then(|u| Url::parse(u).ok());
    let mut links = BTreeSet::new();
    for a in doc.select(&sel_a) {
        if let Some(href) = a.value().attr("href") {
            links.insert(resolve(base.as_ref(), href));
        }
    }

    Page {
        file_name: file_name.to_string(),
        title: title.trim().to_string(),
        url: url.map(str::to_string),
        text,
        links,
    }
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(b) => b.join(href).map(|u| u.to_string()).unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}
