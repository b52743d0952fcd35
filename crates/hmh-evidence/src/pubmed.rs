//! Literature API protocol: search for ids, then batch-fetch records

use crate::{EvidenceConfig, EvidenceError};
use hmh_domain::query::collapse_whitespace;
use hmh_domain::traits::FetchRequest;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static MEDLINE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").expect("year pattern is a literal"));

/// One literature record as returned by the fetch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// Literature identifier (may be empty when the record lacks one)
    pub pmid: String,
    /// Article title with inner markup removed
    pub title: String,
    /// Journal title
    pub journal: String,
    /// Publication year
    pub year: i32,
    /// All abstract sections joined by spaces (may be empty)
    pub abstract_text: String,
}

fn with_identity(mut request: FetchRequest, config: &EvidenceConfig) -> FetchRequest {
    request = request.param("tool", &config.tool);
    if let Some(email) = &config.email {
        request = request.param("email", email);
    }
    if let Some(api_key) = &config.api_key {
        request = request.param("api_key", api_key);
    }
    request
}

/// Relevance-sorted id search
pub fn search_request(config: &EvidenceConfig, term: &str) -> FetchRequest {
    let request = FetchRequest::get(config.endpoint("esearch.fcgi"), config.search_timeout())
        .param("db", "pubmed")
        .param("term", term)
        .param("retmode", "json")
        .param("retmax", config.max_results.to_string())
        .param("sort", "relevance");
    with_identity(request, config)
}

/// Batch fetch of full records
pub fn fetch_request(config: &EvidenceConfig, ids: &[String]) -> FetchRequest {
    let request = FetchRequest::get(config.endpoint("efetch.fcgi"), config.fetch_timeout())
        .param("db", "pubmed")
        .param("id", ids.join(","))
        .param("retmode", "xml");
    with_identity(request, config)
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    esearchresult: SearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Ids from a search response, in relevance order
///
/// A response without an id list is an empty result, not an error.
pub fn parse_search_ids(json: &str) -> Result<Vec<String>, EvidenceError> {
    let response: SearchResponse =
        serde_json::from_str(json).map_err(|e| EvidenceError::Parse {
            stage: "search",
            message: e.to_string(),
        })?;
    Ok(response.esearchresult.idlist)
}

/// Fields collected while inside one `PubmedArticle`
#[derive(Debug, Default)]
struct RecordFields {
    pmid: Option<String>,
    title: String,
    journal: Option<String>,
    year: Option<i32>,
    medline_date: Option<String>,
    abstract_sections: Vec<String>,
}

impl RecordFields {
    fn finish(self, current_year: i32) -> ArticleRecord {
        let pmid = self.pmid.unwrap_or_default();
        let title = collapse_whitespace(&self.title);
        let title = if title.is_empty() {
            format!("PubMed article {}", pmid)
        } else {
            title
        };
        let journal = self
            .journal
            .map(|j| collapse_whitespace(&j))
            .filter(|j| !j.is_empty())
            .unwrap_or_else(|| "PubMed".to_string());
        let year = self
            .year
            .or_else(|| {
                let date = self.medline_date.as_deref()?;
                MEDLINE_YEAR.find(date)?.as_str().parse().ok()
            })
            .unwrap_or(current_year);
        let abstract_text = self
            .abstract_sections
            .iter()
            .map(|s| collapse_whitespace(s))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ArticleRecord {
            pmid,
            title,
            journal,
            year,
            abstract_text,
        }
    }
}

fn inside(stack: &[String], name: &str) -> bool {
    stack.iter().any(|s| s == name)
}

/// Records from a fetch response, in response order
///
/// Every field is optional: a missing title becomes `PubMed article <id>`,
/// a missing journal `PubMed`, and a missing year `current_year`.
pub fn parse_articles(xml: &str, current_year: i32) -> Result<Vec<ArticleRecord>, EvidenceError> {
    let parse_error = |message: String| EvidenceError::Parse {
        stage: "fetch",
        message,
    };

    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();
    let mut record: Option<RecordFields> = None;
    let mut records = Vec::new();
    let mut section = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match name.as_str() {
                    "PubmedArticle" => record = Some(RecordFields::default()),
                    "AbstractText" => section.clear(),
                    _ => {}
                }
                stack.push(name);
            }
            Ok(Event::Text(e)) => {
                let Some(fields) = record.as_mut() else {
                    continue;
                };
                let text = e.unescape().map_err(|err| parse_error(err.to_string()))?;
                let top = stack.last().map(String::as_str).unwrap_or("");

                if inside(&stack, "AbstractText") {
                    section.push_str(&text);
                } else if inside(&stack, "ArticleTitle") {
                    fields.title.push_str(&text);
                } else if top == "PMID" && fields.pmid.is_none() {
                    fields.pmid = Some(text.trim().to_string());
                } else if top == "Title" && inside(&stack, "Journal") && fields.journal.is_none() {
                    fields.journal = Some(text.into_owned());
                } else if top == "Year" && inside(&stack, "PubDate") && fields.year.is_none() {
                    fields.year = text.trim().parse().ok();
                } else if top == "MedlineDate" && inside(&stack, "PubDate") {
                    fields.medline_date = Some(text.into_owned());
                }
            }
            Ok(Event::End(_)) => {
                let name = stack.pop().unwrap_or_default();
                match name.as_str() {
                    "AbstractText" => {
                        if let Some(fields) = record.as_mut() {
                            fields.abstract_sections.push(std::mem::take(&mut section));
                        }
                    }
                    "PubmedArticle" => {
                        if let Some(fields) = record.take() {
                            records.push(fields.finish(current_year));
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(parse_error(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(records)
}
