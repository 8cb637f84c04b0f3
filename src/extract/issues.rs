use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::aggregate::aggregate;
use super::record::{IssueRecord, Severity};
use super::section;

/// `[H-03]`-style heading tag: one-letter severity code plus number.
static TAGGED_RE: Lazy<Regex> = Lazy::new(|| re(r"^\[(H|M|L|N|G)-(\d+)\]"));

/// `[12]`-style heading tag: number only, legacy Low/Non-Critical layout.
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| re(r"^\[\d+\]"));

/// Explicit `[L-07]` marker at the head of a legacy bullet item.
static LIST_ID_RE: Lazy<Regex> = Lazy::new(|| re(r"^\[(L-\d+)\]"));

fn re(src: &str) -> Regex {
    Regex::new(src).expect("static regex")
}

/// Per-section running counter for synthesized `L-NN` ids.
///
/// Seeded at 1 and advanced exactly once per recognized finding of any
/// format in the section, so the formats never drift apart.
#[derive(Debug)]
struct IssueCounter(u32);

impl IssueCounter {
    fn new() -> Self {
        Self(1)
    }

    fn synth_id(&self) -> String {
        format!("L-{:02}", self.0)
    }

    fn advance(&mut self) {
        self.0 += 1;
    }
}

/// What one sibling was recognized as, before normalization into an
/// [`IssueRecord`]. Keeping recognition separate from normalization lets
/// the severity and counter policy live in one place, the section walk.
#[derive(Debug)]
enum RecognizedFinding {
    HeadingTagged {
        issue_id: String,
        severity: Severity,
        title: String,
    },
    BracketNumbered {
        title: String,
    },
    BulletList(Vec<BulletItem>),
}

#[derive(Debug)]
struct BulletItem {
    explicit_id: Option<String>,
    title: String,
    link: String,
    author: String,
}

/// Walk every severity-labeled section and collect its findings.
///
/// High and Medium anchors are matched by id prefix (suffixes vary by
/// report year); Low/Non-Critical headings are matched by substring and
/// their section-level classification overrides per-finding tags.
pub fn walk_severity_sections(doc: &Html) -> Vec<IssueRecord> {
    let mut issues = Vec::new();

    for prefix in ["high-risk", "medium-risk"] {
        for heading in section::headings(doc) {
            let id = heading.value().attr("id").unwrap_or_default();
            if id.starts_with(prefix) {
                let range = section::siblings_until_heading(heading);
                walk_high_medium(&range, &mut issues);
            }
        }
    }

    for heading in section::headings(doc) {
        let id = heading.value().attr("id").unwrap_or_default().to_lowercase();
        if id.contains("low-risk") || id.contains("non-critical") {
            let range = section::siblings_until_heading(heading);
            walk_low_section(&range, &mut issues);
        }
    }

    issues
}

/// High/Medium sections only use the heading-tagged layout; the tag's own
/// severity code is authoritative here.
fn walk_high_medium(range: &[ElementRef<'_>], issues: &mut Vec<IssueRecord>) {
    for (idx, el) in range.iter().enumerate() {
        let Some(RecognizedFinding::HeadingTagged {
            issue_id,
            severity,
            title,
        }) = recognize_tagged(*el)
        else {
            continue;
        };

        let (description, code_links) =
            aggregate(range, idx + 1, |sib| recognize_tagged(sib).is_some());

        issues.push(IssueRecord {
            issue_id,
            title,
            severity,
            description,
            code_links,
        });
    }
}

/// Low/Non-Critical sections mix all three historical layouts. Severity
/// is forced to Low regardless of per-finding tags; the reports are not
/// consistent about N vs L at that granularity.
fn walk_low_section(range: &[ElementRef<'_>], issues: &mut Vec<IssueRecord>) {
    let mut counter = IssueCounter::new();

    for (idx, el) in range.iter().enumerate() {
        match recognize(*el) {
            Some(RecognizedFinding::HeadingTagged { issue_id, title, .. }) => {
                let (description, code_links) = aggregate(range, idx + 1, is_subheading_marker);
                issues.push(IssueRecord {
                    issue_id,
                    title,
                    severity: Severity::Low,
                    description,
                    code_links,
                });
                counter.advance();
            }
            Some(RecognizedFinding::BracketNumbered { title }) => {
                let (description, code_links) = aggregate(range, idx + 1, is_subheading_marker);
                issues.push(IssueRecord {
                    issue_id: counter.synth_id(),
                    title,
                    severity: Severity::Low,
                    description,
                    code_links,
                });
                counter.advance();
            }
            Some(RecognizedFinding::BulletList(items)) => {
                for item in items {
                    let issue_id = item.explicit_id.unwrap_or_else(|| counter.synth_id());
                    let description = format!("{}. {}", item.title, item.author)
                        .trim()
                        .to_string();
                    issues.push(IssueRecord {
                        issue_id,
                        title: item.title,
                        severity: Severity::Low,
                        description,
                        code_links: std::iter::once(item.link).collect(),
                    });
                    counter.advance();
                }
            }
            None => {}
        }
    }
}

/// Body aggregation stops at the next `[X-nn]` or `[nn]` sub-heading.
/// Bullet lists do not terminate a body; trailing lists get folded into
/// the preceding description and still yield their own findings.
fn is_subheading_marker(el: ElementRef<'_>) -> bool {
    recognize_tagged(el).is_some() || recognize_numbered(el).is_some()
}

/// Dispatch for Low/Non-Critical siblings; first applicable format wins.
fn recognize(el: ElementRef<'_>) -> Option<RecognizedFinding> {
    if let Some(found) = recognize_tagged(el) {
        return Some(found);
    }
    if let Some(found) = recognize_numbered(el) {
        return Some(found);
    }
    recognize_bullet_list(el)
}

fn recognize_tagged(el: ElementRef<'_>) -> Option<RecognizedFinding> {
    if el.value().name() != "h2" {
        return None;
    }
    let text = section::flat_text(el);
    let caps = TAGGED_RE.captures(&text)?;

    let issue_id = caps[0].trim_matches(['[', ']']).to_string();
    let severity = Severity::from_code(&caps[1]);
    let title = text.splitn(2, ']').nth(1)?.trim().to_string();

    Some(RecognizedFinding::HeadingTagged {
        issue_id,
        severity,
        title,
    })
}

fn recognize_numbered(el: ElementRef<'_>) -> Option<RecognizedFinding> {
    if el.value().name() != "h2" {
        return None;
    }
    let text = section::flat_text(el);
    if !NUMBERED_RE.is_match(&text) {
        return None;
    }
    let title = text.splitn(2, ']').nth(1)?.trim().to_string();

    Some(RecognizedFinding::BracketNumbered { title })
}

/// Legacy layout: one finding per `<li>`, self-contained. Items without a
/// hyperlink are navigation noise and skipped.
fn recognize_bullet_list(el: ElementRef<'_>) -> Option<RecognizedFinding> {
    if el.value().name() != "ul" {
        return None;
    }

    let mut items = Vec::new();
    for li in el.children().filter_map(ElementRef::wrap) {
        if li.value().name() != "li" {
            continue;
        }
        let Some((link, link_text)) = section::first_link(li) else {
            continue;
        };

        let explicit_id = LIST_ID_RE
            .captures(&link_text)
            .map(|caps| caps[1].to_string());
        let title = match link_text.split_once(']') {
            Some((_, rest)) => rest.trim().to_string(),
            None => link_text.clone(),
        };
        let author = emphasis_text(li).unwrap_or_default();

        items.push(BulletItem {
            explicit_id,
            title,
            link,
            author,
        });
    }

    if items.is_empty() {
        None
    } else {
        Some(RecognizedFinding::BulletList(items))
    }
}

fn emphasis_text(li: ElementRef<'_>) -> Option<String> {
    static EM_SEL: Lazy<scraper::Selector> =
        Lazy::new(|| scraper::Selector::parse("em").expect("static selector"));
    li.select(&EM_SEL).next().map(section::flat_text)
}
