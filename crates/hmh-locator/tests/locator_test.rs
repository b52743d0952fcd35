//! Locator tests against canned upstream responses

use hmh_domain::traits::FetchMethod;
use hmh_domain::Query;
use hmh_fetch::MockFetcher;
use hmh_locator::{CandidateLocator, LocatorConfig, SlugTable};
use std::sync::Arc;

const SITE_SEARCH: &str = "https://www.nhs.uk/search/results";
const WEB_SEARCH: &str = "https://html.duckduckgo.com/html/";
const TOPIC_SEARCH: &str = "https://wsearch.nlm.nih.gov/ws/query";

const SITE_RESULTS: &str = r#"<main>
  <a href="/conditions/sore-throat/">Sore throat</a>
  <a href="/conditions/tonsillitis/">Tonsillitis</a>
  <h2>Support links</h2>
  <a href="/conditions/footer/">Footer</a>
</main>"#;

const WEB_RESULTS: &str = r#"<div class="result">
  <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.nhs.uk%2Fconditions%2Ftonsillitis%2F">Tonsillitis - NHS</a>
</div>
<div class="result">
  <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.nhs.uk%2Fconditions%2Flaryngitis%2F">Laryngitis - NHS</a>
</div>"#;

const TOPIC_RESULTS: &str = r#"<nlmSearchResult><list>
  <document url="https://medlineplus.gov/sorethroat.html">
    <content name="title">Sore Throat</content>
    <content name="FullSummary">Most sore throats are caused by viruses.</content>
  </document>
</list></nlmSearchResult>"#;

fn query(text: &str) -> Query {
    Query::parse(text).unwrap()
}

fn locator(fetcher: &MockFetcher) -> CandidateLocator<MockFetcher> {
    CandidateLocator::new(Arc::new(fetcher.clone()), LocatorConfig::default()).unwrap()
}

fn all_sources() -> MockFetcher {
    let fetcher = MockFetcher::new();
    fetcher.add_response(SITE_SEARCH, SITE_RESULTS);
    fetcher.add_response(WEB_SEARCH, WEB_RESULTS);
    fetcher.add_response(TOPIC_SEARCH, TOPIC_RESULTS);
    fetcher
}

#[tokio::test]
async fn test_sources_in_priority_order_and_deduplicated() {
    let fetcher = all_sources();
    let located = locator(&fetcher)
        .locate_with_topics(&query("sore throat"))
        .await;

    let urls: Vec<_> = located.candidates.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            // static table
            "https://www.nhs.uk/conditions/sore-throat/",
            // site search (sore-throat already seen)
            "https://www.nhs.uk/conditions/tonsillitis/",
            // web search (tonsillitis already seen)
            "https://www.nhs.uk/conditions/laryngitis/",
            // topic search
            "https://medlineplus.gov/sorethroat.html",
        ]
    );
    // first occurrence keeps its title
    assert_eq!(located.candidates[0].title, "NHS guidance: sore throat");
    assert_eq!(located.topics.len(), 1);
    assert_eq!(
        located.topics[0].snippet,
        "Most sore throats are caused by viruses."
    );
}

#[tokio::test]
async fn test_requests_sent_to_each_source() {
    let fetcher = all_sources();
    locator(&fetcher).locate(&query("Sore throat treatment")).await;

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 3);

    let topic = requests.iter().find(|r| r.url == TOPIC_SEARCH).unwrap();
    assert_eq!(topic.param_value("term"), Some("Sore throat"));

    let site = requests.iter().find(|r| r.url == SITE_SEARCH).unwrap();
    assert_eq!(site.method, FetchMethod::Get);
    assert_eq!(site.param_value("q"), Some("Sore throat treatment"));

    let web = requests.iter().find(|r| r.url == WEB_SEARCH).unwrap();
    assert_eq!(web.method, FetchMethod::PostForm);
    assert_eq!(web.param_value("q"), Some("site:nhs.uk Sore throat treatment"));
}

#[tokio::test]
async fn test_failing_sources_contribute_nothing() {
    let fetcher = MockFetcher::new();
    fetcher.add_status(SITE_SEARCH, 503);
    fetcher.add_timeout(WEB_SEARCH);
    fetcher.add_response(TOPIC_SEARCH, "<a><b></a>");

    let locator = locator(&fetcher);
    let found = locator.locate(&query("I have a nose bleed")).await;

    // only the static table answers, via the normalized query
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, "https://www.nhs.uk/conditions/nosebleed/");

    assert!(locator.try_site_search(&query("x")).await.is_err());
    assert!(locator.try_web_search(&query("x")).await.is_err());
    assert!(locator.try_topic_search(&query("x")).await.is_err());
}

#[tokio::test]
async fn test_priority_override_short_circuits_table_only() {
    let fetcher = all_sources();
    let found = locator(&fetcher)
        .locate(&query("panic and a sore throat"))
        .await;

    assert_eq!(found[0].title, "NHS help: anxiety, fear and panic");
    // site search still runs after the override
    assert_eq!(found[1].url, "https://www.nhs.uk/conditions/sore-throat/");
    assert!(!found.iter().any(|c| c.title == "NHS guidance: sore throat"));
}

#[tokio::test]
async fn test_locate_is_idempotent() {
    let fetcher = all_sources();
    let locator = locator(&fetcher);
    let first = locator.locate(&query("sore throat")).await;
    let second = locator.locate(&query("sore throat")).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_custom_table_and_endpoints() {
    let fetcher = MockFetcher::new();
    fetcher.add_response("http://mock.test/search", SITE_RESULTS);

    let config = LocatorConfig {
        site_origin: "http://mock.test".to_string(),
        site_search_url: "http://mock.test/search".to_string(),
        ..LocatorConfig::default()
    };
    let table = SlugTable::from_toml("[slugs]\n\"ear\" = \"conditions/earache\"\n").unwrap();
    let locator = CandidateLocator::new(Arc::new(fetcher.clone()), config)
        .unwrap()
        .with_table(table);

    let found = locator.locate(&query("ear pain")).await;
    assert_eq!(found[0].url, "http://mock.test/conditions/earache/");
    // relative result links resolve against the configured origin; the
    // absolute-link domain check does not apply to them
    assert_eq!(found[1].url, "http://mock.test/conditions/sore-throat/");
}

#[test]
fn test_missing_table_file_is_an_error() {
    let config = LocatorConfig {
        slug_table_path: Some("/nonexistent/table.toml".into()),
        ..LocatorConfig::default()
    };
    assert!(CandidateLocator::new(Arc::new(MockFetcher::new()), config).is_err());
}
