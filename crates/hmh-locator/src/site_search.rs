//! The trusted site's own search page

use crate::LocatorConfig;
use hmh_domain::query::collapse_whitespace;
use hmh_domain::traits::FetchRequest;
use hmh_domain::vocabulary::{
    SITE_CONTENT_PATHS, SITE_DOMAIN, SITE_HUB_PATHS, SITE_MEDICINE_PATH, SITE_SEARCH_STOP_HEADING,
};
use hmh_domain::Candidate;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use url::Url;

/// Shortest accepted content path (excludes bare section roots)
const MIN_CONTENT_PATH_LEN: usize = 15;

pub(crate) fn request(config: &LocatorConfig, query: &str) -> FetchRequest {
    FetchRequest::get(&config.site_search_url, config.site_search_timeout())
        .param("q", query)
        .header("User-Agent", &config.user_agent)
}

fn text_of(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

fn absolutize(href: &str, origin: &str) -> Option<String> {
    if href.starts_with('/') {
        Some(format!("{}{}", origin.trim_end_matches('/'), href))
    } else if href.starts_with("http") && href.contains(SITE_DOMAIN) {
        Some(href.to_string())
    } else {
        None
    }
}

fn is_result_path(path: &str) -> bool {
    if SITE_HUB_PATHS.contains(&path) {
        return false;
    }
    let content = SITE_CONTENT_PATHS.iter().any(|p| path.contains(p))
        && path.len() >= MIN_CONTENT_PATH_LEN;
    content || path.contains(SITE_MEDICINE_PATH)
}

/// Result links from a site search page
///
/// Only the `main` region is read, in document order, and reading stops at
/// the "Support links" heading so footer navigation never leaks in.
pub fn parse_site_results(html: &str, origin: &str, max_results: usize) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let scope = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "main")
        .unwrap_or(root);

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for el in scope.descendants().filter_map(ElementRef::wrap) {
        match el.value().name() {
            "h2" | "h3" if text_of(el).to_lowercase().contains(SITE_SEARCH_STOP_HEADING) => break,
            "a" => {}
            _ => continue,
        }

        let href = el.value().attr("href").unwrap_or("").trim();
        let title = text_of(el);
        if href.is_empty() || title.is_empty() {
            continue;
        }
        let Some(full) = absolutize(href, origin) else {
            continue;
        };
        let Ok(parsed) = Url::parse(&full) else {
            continue;
        };
        if !is_result_path(&parsed.path().to_lowercase()) {
            continue;
        }
        if seen.insert(full.clone()) {
            out.push(Candidate::new(title, full));
        }
        if out.len() >= max_results {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.nhs.uk";

    const RESULTS_PAGE: &str = r#"<html><body>
<header><a href="/conditions/header-link/">Header link</a></header>
<main>
  <ul class="results">
    <li><a href="/conditions/sore-throat/">Sore throat</a></li>
    <li><a href="/mental-health/">Mental health</a></li>
    <li><a href="https://www.nhs.uk/conditions/tonsillitis/">Tonsillitis</a></li>
    <li><a href="/conditions/sore-throat/">Sore throat (again)</a></li>
    <li><a href="https://example.com/conditions/fake-page/">Elsewhere</a></li>
    <li><a href="/medicines/ibuprofen-for-adults/">Ibuprofen</a></li>
    <li><a href="/healthy-living/">Healthy living</a></li>
    <li><a href="/conditions/">Conditions</a></li>
    <li><a href="/conditions/no-title/"></a></li>
  </ul>
  <h2>Support links</h2>
  <ul><li><a href="/conditions/after-support-links/">Late</a></li></ul>
</main>
</body></html>"#;

    #[test]
    fn test_result_links_in_order() {
        let out = parse_site_results(RESULTS_PAGE, ORIGIN, 6);
        let urls: Vec<_> = out.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.nhs.uk/conditions/sore-throat/",
                "https://www.nhs.uk/conditions/tonsillitis/",
                "https://www.nhs.uk/medicines/ibuprofen-for-adults/",
            ]
        );
        assert_eq!(out[0].title, "Sore throat");
    }

    #[test]
    fn test_cap() {
        let out = parse_site_results(RESULTS_PAGE, ORIGIN, 1);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_whole_document_without_main() {
        let html = r#"<div><a href="/symptoms/stomach-ache/">Stomach ache</a></div>"#;
        let out = parse_site_results(html, ORIGIN, 6);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "https://www.nhs.uk/symptoms/stomach-ache/");
    }

    #[test]
    fn test_path_rules() {
        assert!(is_result_path("/conditions/flu/"));
        assert!(is_result_path("/medicines/"));
        assert!(!is_result_path("/conditions/"));
        assert!(!is_result_path("/mental-health/"));
        assert!(is_result_path("/mental-health/self-help/"));
        assert!(!is_result_path("/live-well/"));
    }

    #[test]
    fn test_request_shape() {
        let req = request(&LocatorConfig::default(), "sore throat");
        assert_eq!(req.url, "https://www.nhs.uk/search/results");
        assert_eq!(req.param_value("q"), Some("sore throat"));
        assert!(req.headers.iter().any(|(k, _)| k == "User-Agent"));
    }
}
