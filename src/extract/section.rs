use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static H1_SEL: Lazy<Selector> = Lazy::new(|| sel("h1"));
static ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| sel("a[href]"));

fn sel(src: &str) -> Selector {
    Selector::parse(src).expect("static selector")
}

/// All top-level headings, in document order.
pub fn headings(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&H1_SEL).collect()
}

/// Locate the section anchored by the `h1` whose `id` equals `anchor_id`.
///
/// Returns the materialized element sequence strictly between that heading
/// and the next `h1` (or document end). `None` means the section is simply
/// absent, which callers treat as a normal outcome.
pub fn locate<'a>(doc: &'a Html, anchor_id: &str) -> Option<Vec<ElementRef<'a>>> {
    doc.select(&H1_SEL)
        .find(|h| h.value().attr("id") == Some(anchor_id))
        .map(siblings_until_heading)
}

/// Elements between a heading and the next `h1`, both headings excluded.
/// Bare text siblings are skipped; recognizers only ever look at elements.
pub fn siblings_until_heading(heading: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut range = Vec::new();
    for node in heading.next_siblings() {
        if let Some(el) = ElementRef::wrap(node) {
            if el.value().name() == "h1" {
                break;
            }
            range.push(el);
        }
    }
    range
}

/// Descendant text concatenated with single-space normalization, matching
/// how report prose is flattened everywhere in the extractor.
pub fn flat_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every hyperlink under `el` that points at the code host.
pub fn code_host_links(el: ElementRef<'_>) -> Vec<String> {
    el.select(&ANCHOR_SEL)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_code_host(href))
        .map(str::to_string)
        .collect()
}

/// First hyperlink attribute under `el`, regardless of host.
pub fn first_link(el: ElementRef<'_>) -> Option<(String, String)> {
    el.select(&ANCHOR_SEL).next().map(|a| {
        let href = a.value().attr("href").unwrap_or_default().to_string();
        (href, flat_text(a))
    })
}

pub fn is_code_host(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => matches!(url.host_str(), Some("github.com") | Some("www.github.com")),
        Err(_) => false,
    }
}

/// True for links into the organization's accepted-submission mirrors.
pub fn is_contest_repo(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => {
            matches!(url.host_str(), Some("github.com") | Some("www.github.com"))
                && url.path().contains("code-423n4")
        }
        Err(_) => false,
    }
}
