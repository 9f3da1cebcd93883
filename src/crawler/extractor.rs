//! HTML extraction
//!
//! Turns a fetched page body into the three things the engine needs: the
//! title, the flattened visible text, and the outbound hrefs in document
//! order. Href resolution happens in the engine, against the page's own URL.

use scraper::{Html, Selector};

/// Sentinel title for pages without a usable `<title>` element
pub const NO_TITLE: &str = "No title was found";

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// The page title, absent when the document has none
    pub title: Option<String>,

    /// Visible text, whitespace-joined into a single line
    pub content: String,

    /// Raw href attribute values in document order
    pub links: Vec<String>,
}

/// Parses HTML and extracts title, content, and links
///
/// The parser is lenient; malformed markup degrades to whatever structure
/// can be recovered rather than failing.
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        content: extract_content(&document),
        links: extract_hrefs(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Flattens the page's text into one whitespace-joined string
///
/// Text is taken from `<body>` when present, falling back to the document
/// root for fragments without one.
fn extract_content(document: &Html) -> String {
    let text_root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    text_root
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_hrefs(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}
