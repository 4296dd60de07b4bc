//! Title Extractor: best-effort canonical job title from scraped job-offer text.
//!
//! The result is computed once per request, injected into the prompt, and later
//! used to validate the role the model claims for the job offer. An empty result
//! is not an error; it only means there is nothing to validate against.

use once_cell::sync::Lazy;
use regex::Regex;

static JOB_TITLE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)JOB TITLE:\s*(.+?)(?:\r?\n|COMPANY|LOCATION|$)").ok()
});

const MIN_TITLE_LINE_CHARS: usize = 6;
const MAX_TITLE_LINE_CHARS: usize = 99;
const IGNORED_LINE_PREFIXES: &[&str] = &["http", "www", "source:"];

/// Extracts the job title from scraped text.
///
/// Precedence:
/// 1. an explicit `JOB TITLE: <value>` marker (case-insensitive)
/// 2. the first line of 6–99 chars that is not a URL or a `Source:` line
/// 3. empty string
pub fn extract_title(scraped_text: &str) -> String {
    if let Some(title) = explicit_title(scraped_text) {
        return title;
    }

    scraped_text
        .lines()
        .map(str::trim)
        .find(|line| is_plausible_title_line(line))
        .map(str::to_string)
        .unwrap_or_default()
}

fn explicit_title(text: &str) -> Option<String> {
    let pattern = JOB_TITLE_PATTERN.as_ref()?;
    let captured = pattern.captures(text)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| captured.to_string())
}

fn is_plausible_title_line(line: &str) -> bool {
    let len = line.chars().count();
    if !(MIN_TITLE_LINE_CHARS..=MAX_TITLE_LINE_CHARS).contains(&len) {
        return false;
    }
    let lower = line.to_lowercase();
    !IGNORED_LINE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_marker_wins() {
        let text = "Welcome to our careers page\nJOB TITLE: CNC Press Brake Operator\nCOMPANY: Acme";
        assert_eq!(extract_title(text), "CNC Press Brake Operator");
    }

    #[test]
    fn test_explicit_marker_is_case_insensitive() {
        assert_eq!(
            extract_title("job title:   Sous Chef   \nmore text"),
            "Sous Chef"
        );
    }

    #[test]
    fn test_marker_stops_at_company_on_same_line() {
        let text = "JOB TITLE: Saldatore a filo COMPANY: Officine Rossi LOCATION: Brescia";
        assert_eq!(extract_title(text), "Saldatore a filo");
    }

    #[test]
    fn test_marker_at_end_of_text() {
        assert_eq!(extract_title("JOB TITLE: Paralegal"), "Paralegal");
    }

    #[test]
    fn test_first_plausible_line_fallback() {
        let text = "\nhttps://example.com/jobs/42\nwww.example.com\nSource: LinkedIn\nok\nSenior Backend Engineer\nWe are hiring";
        assert_eq!(extract_title(text), "Senior Backend Engineer");
    }

    #[test]
    fn test_prefix_filter_is_case_insensitive() {
        let text = "HTTPS://EXAMPLE.COM/job\nSOURCE: Indeed\nWWW.SITE.IT\nElettricista industriale";
        assert_eq!(extract_title(text), "Elettricista industriale");
    }

    #[test]
    fn test_line_length_bounds() {
        let long = "x".repeat(100);
        let text = format!("short\n{long}\n{}", "y".repeat(99));
        assert_eq!(extract_title(&text), "y".repeat(99));
        assert_eq!(extract_title("abcdef"), "abcdef");
    }

    #[test]
    fn test_nothing_plausible_yields_empty() {
        assert_eq!(extract_title(""), "");
        assert_eq!(extract_title("a\nb\nhttp://x.io/abcdef"), "");
    }
}
