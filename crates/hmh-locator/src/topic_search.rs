//! Health-topic search API (XML)

use crate::{LocatorConfig, LocatorError};
use hmh_domain::query::collapse_whitespace;
use hmh_domain::traits::FetchRequest;
use hmh_domain::vocabulary::TOPIC_STOP_WORDS;
use hmh_domain::Candidate;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = TOPIC_STOP_WORDS.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("stop-word pattern is built from escaped literals")
});

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup pattern is a literal"));

/// One topic returned by the topic search API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHit {
    /// Topic title
    pub title: String,
    /// Topic page URL
    pub url: String,
    /// Summary text, possibly empty
    pub snippet: String,
}

impl From<&TopicHit> for Candidate {
    fn from(hit: &TopicHit) -> Self {
        Candidate::new(hit.title.clone(), hit.url.clone())
    }
}

/// Query with stop-words removed; the original query when nothing remains
pub fn clean_topic_term(query: &str) -> String {
    let cleaned = collapse_whitespace(&STOP_WORDS.replace_all(query, ""));
    if cleaned.is_empty() {
        query.trim().to_string()
    } else {
        cleaned
    }
}

pub(crate) fn request(config: &LocatorConfig, query: &str) -> FetchRequest {
    FetchRequest::get(&config.topic_search_url, config.topic_search_timeout())
        .param("db", &config.topic_search_db)
        .param("term", clean_topic_term(query))
        .param("retmax", config.topic_search_max_results.to_string())
}

fn strip_markup(text: &str) -> String {
    collapse_whitespace(&MARKUP.replace_all(text, ""))
}

fn attribute(tag: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    tag.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Fields collected while inside one `document` element
#[derive(Debug, Default)]
struct DocumentFields {
    url_attribute: Option<String>,
    url_content: Option<String>,
    title: Option<String>,
    full_summary: Option<String>,
    snippet: Option<String>,
}

impl DocumentFields {
    fn set(&mut self, name: &str, value: String) {
        let slot = match name.to_ascii_lowercase().as_str() {
            "title" => &mut self.title,
            "url" => &mut self.url_content,
            "fullsummary" | "full-summary" => &mut self.full_summary,
            "snippet" => &mut self.snippet,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn into_hit(self) -> Option<TopicHit> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        let url = non_empty(self.url_attribute.map(|u| u.trim().to_string()))
            .or_else(|| non_empty(self.url_content))?;
        let title = non_empty(self.title)?;
        let snippet = non_empty(self.full_summary)
            .or_else(|| non_empty(self.snippet))
            .unwrap_or_default();
        Some(TopicHit {
            title,
            url,
            snippet,
        })
    }
}

/// Topic hits from a topic search response, in response order
///
/// Embedded markup in titles and summaries is stripped. Documents missing a
/// title or URL are dropped.
pub fn parse_topic_results(xml: &str, max_results: usize) -> Result<Vec<TopicHit>, LocatorError> {
    let parse_error = |message: String| LocatorError::Parse {
        source_name: "topic search",
        message,
    };

    let mut reader = Reader::from_str(xml);
    let mut hits = Vec::new();
    let mut document: Option<DocumentFields> = None;
    let mut field: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"document" => {
                    document = Some(DocumentFields {
                        url_attribute: attribute(&e, b"url"),
                        ..DocumentFields::default()
                    });
                }
                b"content" if document.is_some() => {
                    field = attribute(&e, b"name");
                    text.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) if field.is_some() => {
                let piece = e
                    .unescape()
                    .map_err(|err| parse_error(err.to_string()))?;
                text.push_str(&piece);
            }
            Ok(Event::CData(e)) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"content" => {
                    if let (Some(doc), Some(name)) = (document.as_mut(), field.take()) {
                        doc.set(&name, strip_markup(&text));
                    }
                }
                b"document" => {
                    if let Some(hit) = document.take().and_then(DocumentFields::into_hit) {
                        hits.push(hit);
                    }
                }
                _ => {}
            },
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

    hits.truncate(max_results);
    Ok(hits)
}
