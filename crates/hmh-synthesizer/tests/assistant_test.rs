//! End-to-end answers against canned upstream responses

use hmh_domain::{Query, Reliability, SourceKind};
use hmh_fetch::MockFetcher;
use hmh_synthesizer::{source_id, AssistantConfig, HealthAssistant};
use hmh_trust::TrustConfig;
use std::sync::Arc;

const SITE_SEARCH: &str = "https://www.nhs.uk/search/results";
const TOPIC_SEARCH: &str = "https://wsearch.nlm.nih.gov/ws/query";
const ESEARCH: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

const SORE_THROAT: &str = "https://www.nhs.uk/conditions/sore-throat/";
const TONSILLITIS: &str = "https://www.nhs.uk/conditions/tonsillitis/";
const MEDLINE: &str = "https://medlineplus.gov/sorethroat.html";

const SITE_RESULTS: &str = r#"<main>
  <a href="/conditions/sore-throat/">Sore throat</a>
  <a href="/conditions/tonsillitis/">Tonsillitis</a>
</main>"#;

const TOPIC_RESULTS: &str = r#"<nlmSearchResult><list>
  <document url="https://medlineplus.gov/sorethroat.html">
    <content name="title">Sore Throat</content>
    <content name="FullSummary">Most sore throats are caused by viruses. Wash your hands often to prevent the spread of germs.</content>
  </document>
</list></nlmSearchResult>"#;

const DO_DONT_PAGE: &str = r#"<html><body><main>
  <h1>Sore throat</h1>
  <h2>How to ease a sore throat yourself</h2>
  <h3>Do</h3>
  <ul>
    <li>gargle with warm, salty water</li>
    <li>drink plenty of water</li>
    <li>eat cool or soft foods</li>
  </ul>
  <h3>Don't</h3>
  <ul>
    <li>do not smoke or stay in smoky places</li>
    <li>do not give aspirin to children under 16</li>
  </ul>
</main></body></html>"#;

const RED_FLAG_PAGE: &str = r#"<html><body><main>
  <h1>Sore throat</h1>
  <h2>Things you can do</h2>
  <ul>
    <li>Call 999 if someone has a stiff neck</li>
    <li>Go to A&amp;E if they have difficulty breathing</li>
    <li>Call 111 for advice if you're not sure</li>
  </ul>
  <h2>Call 999 if:</h2>
  <ul>
    <li>you're struggling to swallow</li>
    <li>you're making a high-pitched sound as you breathe</li>
  </ul>
</main></body></html>"#;

const ACTION_PAGE: &str = r#"<html><body><main>
  <h1>Tonsillitis</h1>
  <h2>Things you can do</h2>
  <ul>
    <li>Rest as much as you can</li>
    <li>Drink plenty of fluids</li>
    <li>Take paracetamol or ibuprofen</li>
  </ul>
  <h2>Causes of tonsillitis</h2>
  <ul>
    <li>a virus</li>
    <li>bacteria</li>
  </ul>
</main></body></html>"#;

const HUB_PAGE: &str = r#"<html><body><main>
  <h1>Healthy living</h1>
  <h2>Top tasks</h2>
  <ul><li>Drink water</li><li>Rest often</li><li>Take a walk</li></ul>
</main></body></html>"#;

const SEARCH_IDS: &str = r#"{"esearchresult":{"idlist":["38000001"]}}"#;

const ARTICLES: &str = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
  <PMID>38000001</PMID>
  <Article>
    <Journal><JournalIssue><PubDate><Year>1990</Year></PubDate></JournalIssue><Title>Throat</Title></Journal>
    <ArticleTitle>Gargling trial</ArticleTitle>
    <Abstract><AbstractText>We enrolled 60 adults.</AbstractText></Abstract>
  </Article>
</MedlineCitation></PubmedArticle></PubmedArticleSet>"#;

fn query(text: &str) -> Query {
    Query::parse(text).unwrap()
}

fn assistant(fetcher: &MockFetcher) -> HealthAssistant<MockFetcher> {
    HealthAssistant::new(Arc::new(fetcher.clone()), AssistantConfig::default()).unwrap()
}

#[tokio::test]
async fn test_everything_down_still_answers() {
    // unknown URLs answer 404 from the mock
    let fetcher = MockFetcher::new();
    let response = assistant(&fetcher).answer(&query("a strange tiredness")).await;

    assert_eq!(response.steps[0].title, "Basic safe steps");
    assert_eq!(response.seek_care_now.len(), 2);
    assert_eq!(response.prevention.len(), 3);
    assert!(response.sources.is_empty());
    assert!(response.triage.is_none());
}

#[tokio::test]
async fn test_nosebleed_template_when_pages_fail() {
    let fetcher = MockFetcher::new();
    fetcher.add_status("https://www.nhs.uk/conditions/nosebleed/", 500);
    let response = assistant(&fetcher).answer(&query("I have a nose bleed")).await;

    assert_eq!(response.steps.len(), 2);
    assert_eq!(response.steps[0].title, "Stop the bleeding (first aid)");
    assert_eq!(response.seek_care_now.len(), 5);
    assert_eq!(
        response.seek_care_now[0],
        "Bleeding lasts longer than 20 minutes despite pressure"
    );
    // the failed page is never registered as a source
    assert!(response.sources.is_empty());
    assert_eq!(fetcher.calls_to("https://www.nhs.uk/conditions/nosebleed/"), 1);
}

#[tokio::test]
async fn test_chest_pain_is_always_urgent() {
    let fetcher = MockFetcher::new();
    let response = assistant(&fetcher).answer(&query("Sharp chest pain")).await;

    let triage = response.triage.expect("urgent triage");
    assert_eq!(triage.level, "Urgent");
    assert_eq!(triage.headline, "This may be urgent based on what you wrote.");
    assert_eq!(triage.suggested_action, "Seek urgent medical care now.");
    assert!(!response.steps.is_empty());
}

#[tokio::test]
async fn test_do_dont_page_wins() {
    let fetcher = MockFetcher::new().with_response(SORE_THROAT, DO_DONT_PAGE);
    let response = assistant(&fetcher).answer(&query("sore throat")).await;

    let block = &response.steps[0];
    assert_eq!(block.title, "Recommended steps (trusted guidance)");
    assert_eq!(block.why, "Extracted from: NHS guidance: sore throat");
    assert_eq!(block.actions.len(), 3);
    assert_eq!(block.actions[0], "gargle with warm, salty water");
    assert_eq!(
        response.prevention,
        vec![
            "do not smoke or stay in smoky places",
            "do not give aspirin to children under 16",
        ]
    );

    assert_eq!(response.sources.len(), 1);
    let source = &response.sources[0];
    assert_eq!(source.id, source_id("nhs", SORE_THROAT, 16));
    assert_eq!(source.publisher, "NHS");
    assert_eq!(source.rationale, "NHS Condition Page");
    assert_eq!(source.reliability, Reliability::High);
}

#[tokio::test]
async fn test_red_flag_page_rejected_but_emergency_kept() {
    let fetcher = MockFetcher::new()
        .with_response(SITE_SEARCH, SITE_RESULTS)
        .with_response(SORE_THROAT, RED_FLAG_PAGE)
        .with_response(TONSILLITIS, ACTION_PAGE);
    let response = assistant(&fetcher).answer(&query("sore throat")).await;

    assert_eq!(
        response.steps[0].actions,
        vec![
            "Rest as much as you can",
            "Drink plenty of fluids",
            "Take paracetamol or ibuprofen",
        ]
    );
    assert_eq!(response.steps[0].why, "Extracted from: Tonsillitis");
    // the winner has no urgent list, so the rejected page's list is used
    assert_eq!(
        response.seek_care_now,
        vec![
            "you're struggling to swallow",
            "you're making a high-pitched sound as you breathe",
        ]
    );
    assert_eq!(response.related, vec!["a virus", "bacteria"]);

    // both visited pages are cited, latest first
    let urls: Vec<_> = response.sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, vec![TONSILLITIS, SORE_THROAT]);
}

#[tokio::test]
async fn test_hub_page_skipped() {
    let fetcher = MockFetcher::new()
        .with_response(SITE_SEARCH, SITE_RESULTS)
        .with_response(SORE_THROAT, HUB_PAGE)
        .with_response(TONSILLITIS, ACTION_PAGE);
    let response = assistant(&fetcher).answer(&query("sore throat")).await;

    assert_eq!(response.steps[0].why, "Extracted from: Tonsillitis");
    let urls: Vec<_> = response.sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, vec![TONSILLITIS]);
}

#[tokio::test]
async fn test_loop_stops_at_first_winner() {
    let fetcher = MockFetcher::new()
        .with_response(SITE_SEARCH, SITE_RESULTS)
        .with_response(SORE_THROAT, DO_DONT_PAGE)
        .with_response(TONSILLITIS, ACTION_PAGE);
    assistant(&fetcher).answer(&query("sore throat")).await;

    assert_eq!(fetcher.calls_to(SORE_THROAT), 1);
    assert_eq!(fetcher.calls_to(TONSILLITIS), 0);
}

#[tokio::test]
async fn test_source_order_and_snippet_prevention() {
    let fetcher = MockFetcher::new()
        .with_response(TOPIC_SEARCH, TOPIC_RESULTS)
        .with_response(SORE_THROAT, "<html><body><main><p>Nothing here.</p></main></body></html>")
        .with_response(ESEARCH, SEARCH_IDS)
        .with_response(EFETCH, ARTICLES);
    let response = assistant(&fetcher).answer(&query("sore throat")).await;

    let ids: Vec<_> = response.sources.iter().map(|s| s.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            source_id("nhs", SORE_THROAT, 16),
            source_id("mp", MEDLINE, 16),
            "pubmed-38000001".to_string(),
        ]
    );
    assert_eq!(response.sources[1].publisher, "MedlinePlus");
    assert_eq!(response.sources[2].kind, SourceKind::PubMedStudy);
    assert_eq!(response.sources[2].reliability, Reliability::Low);

    // no page won: steps come from the top cited source
    assert_eq!(response.steps[0].title, "Information from NHS");
    assert_eq!(
        response.prevention,
        vec!["Wash your hands often to prevent the spread of germs."]
    );
}

#[tokio::test]
async fn test_untrusted_candidates_are_never_fetched() {
    let fetcher = MockFetcher::new()
        .with_response(TOPIC_SEARCH, TOPIC_RESULTS)
        .with_response(MEDLINE, DO_DONT_PAGE);
    let config = AssistantConfig {
        trust: TrustConfig {
            trusted_domains: vec!["nhs.uk".to_string()],
            ..TrustConfig::default()
        },
        ..AssistantConfig::default()
    };
    let response = HealthAssistant::new(Arc::new(fetcher.clone()), config)
        .unwrap()
        .answer(&query("sore throat"))
        .await;

    assert_eq!(fetcher.calls_to(MEDLINE), 0);
    // the topic hit is still cited
    assert!(response.sources.iter().any(|s| s.url == MEDLINE));
    assert_ne!(response.steps[0].title, "Recommended steps (trusted guidance)");
}

#[tokio::test]
async fn test_response_serializes_with_wire_names() {
    let fetcher = MockFetcher::new().with_response(SORE_THROAT, DO_DONT_PAGE);
    let response = assistant(&fetcher).answer(&query("sore throat")).await;

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["triage"].is_null());
    assert!(json["seekCareNow"].is_array());
    assert_eq!(json["steps"][0]["title"], "Recommended steps (trusted guidance)");
}
