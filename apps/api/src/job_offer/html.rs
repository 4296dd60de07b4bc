//! HTML → text helpers for scraped job offers.

use scraper::{node::Node, ElementRef, Html, Selector};

/// Elements whose text never belongs in a job description.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "noscript", "header", "footer", "nav",
];

const COMPANY_SELECTORS: &[&str] = &[
    r#"[data-testid="inlineHeader-companyName"]"#,
    r#"[data-testid="jobsearch-JobInfoHeader-companyName"]"#,
    r#"a[href*="/cmp/"]"#,
];

const LOCATION_SELECTORS: &[&str] = &[
    r#"[data-testid="inlineHeader-companyLocation"]"#,
    r#"[data-testid="jobsearch-JobInfoHeader-companyLocation"]"#,
];

pub fn compact_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible body text with boilerplate elements dropped and whitespace compacted.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Some(body) = first_match(&document, "body") else {
        return String::new();
    };

    let mut parts: Vec<&str> = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
        });
        if !hidden {
            parts.push(text);
        }
    }

    compact_ws(&parts.join(" "))
}

/// Structured extraction for Indeed job pages. Emits labelled lines
/// (`JOB TITLE:`, `COMPANY:`, ...) so the title extractor can pick the title up
/// directly. Returns `None` when none of the known sections were found.
pub fn indeed_sections(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    if let Some(title) = select_text(&document, "h1") {
        parts.push(format!("JOB TITLE: {title}"));
    }
    if let Some(company) = COMPANY_SELECTORS
        .iter()
        .find_map(|css| select_text(&document, css))
    {
        parts.push(format!("COMPANY: {company}"));
    }
    if let Some(location) = LOCATION_SELECTORS
        .iter()
        .find_map(|css| select_text(&document, css))
    {
        parts.push(format!("LOCATION: {location}"));
    }
    if let Some(salary) = select_text(&document, "#salaryInfoAndJobType") {
        parts.push(format!("CONTRACT/SALARY: {salary}"));
    }

    let details = select_all_text(&document, ".jobsearch-JobDescriptionSection-sectionItem");
    if !details.is_empty() {
        parts.push(format!("JOB DETAILS:\n{}", details.join("\n")));
    }
    if let Some(benefits) = select_text(&document, r#"[data-testid="benefits-test"]"#) {
        parts.push(format!("BENEFITS: {benefits}"));
    }
    if let Some(description) = select_text(&document, "#jobDescriptionText") {
        parts.push(format!("\nFULL JOB DESCRIPTION:\n{description}"));
    }

    (!parts.is_empty()).then(|| parts.join("\n"))
}

fn first_match<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn select_text(document: &Html, css: &str) -> Option<String> {
    let text = compact_ws(&first_match(document, css)?.text().collect::<Vec<_>>().join(" "));
    (!text.is_empty()).then_some(text)
}

fn select_all_text(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| compact_ws(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| !text.is_empty())
        .collect()
}
