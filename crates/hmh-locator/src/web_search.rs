//! Domain-scoped external web search (HTML results page)

use crate::LocatorConfig;
use hmh_domain::query::collapse_whitespace;
use hmh_domain::traits::FetchRequest;
use hmh_domain::vocabulary::SITE_DOMAIN;
use hmh_domain::Candidate;
use scraper::{Html, Selector};
use url::Url;

const REDIRECT_HOST: &str = "https://duckduckgo.com";

pub(crate) fn request(config: &LocatorConfig, query: &str) -> FetchRequest {
    FetchRequest::post_form(&config.web_search_url, config.web_search_timeout())
        .param("q", format!("site:{} {}", SITE_DOMAIN, query))
        .header("User-Agent", &config.user_agent)
        .header("Referer", &config.web_search_referer)
}

/// The target of a `uddg=` redirect wrapper, or the href unchanged
pub fn unwrap_redirect(href: &str) -> String {
    let href = href.trim();
    if !href.contains("uddg=") {
        return href.to_string();
    }
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("{}{}", REDIRECT_HOST, href)
    } else {
        href.to_string()
    };
    Url::parse(&absolute)
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())
        })
        .filter(|target| !target.trim().is_empty())
        .unwrap_or_else(|| href.to_string())
}

/// Result links from an external search results page
pub fn parse_web_results(html: &str, max_results: usize) -> Vec<Candidate> {
    let (Ok(result_sel), Ok(anchor_sel)) =
        (Selector::parse("div.result"), Selector::parse("a.result__a"))
    else {
        return Vec::new();
    };
    let document = Html::parse_document(html);

    let mut out = Vec::new();
    for result in document.select(&result_sel) {
        if out.len() >= max_results {
            break;
        }
        let Some(anchor) = result.select(&anchor_sel).next() else {
            continue;
        };
        let title = collapse_whitespace(&anchor.text().collect::<String>());
        let link = unwrap_redirect(anchor.value().attr("href").unwrap_or(""));
        if link.contains(SITE_DOMAIN) {
            out.push(Candidate::new(title, link));
        }
    }
    out
}
