use scraper::ElementRef;
use std::collections::BTreeSet;

use super::section;

/// Collect a finding's body from the siblings that trail its marker.
///
/// Walks `range` forward from `start`, joining each sibling's flattened
/// text (empty strings skipped) with single spaces and gathering its
/// code-host links, until `is_boundary` flags a sibling that opens the
/// next finding. The boundary sibling is left unconsumed; the section
/// slice already ends at the next top-level heading.
pub fn aggregate<'a, F>(
    range: &[ElementRef<'a>],
    start: usize,
    is_boundary: F,
) -> (String, BTreeSet<String>)
where
    F: Fn(ElementRef<'a>) -> bool,
{
    let mut parts: Vec<String> = Vec::new();
    let mut links = BTreeSet::new();

    for el in &range[start.min(range.len())..] {
        if is_boundary(*el) {
            break;
        }
        let text = section::flat_text(*el);
        if !text.is_empty() {
            parts.push(text);
        }
        links.extend(section::code_host_links(*el));
    }

    (parts.join(" "), links)
}
