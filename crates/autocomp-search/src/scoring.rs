//! Relevance scoring
//!
//! A transparent weighted sum. Every query token is matched as a substring of
//! each normalized field; the whole query is matched against taxonomy titles.
//!
//! | Signal                               | Points           |
//! |--------------------------------------|------------------|
//! | token in title                       | 10 per token     |
//! | title equals query                   | 50               |
//! | token in summary                     | 5 per token      |
//! | token in plain content               | 1 per token      |
//! | token in a keyword                   | 3 per pair       |
//! | query in pillar/section/cluster title| 8 per entity     |
//! | updated < 30 days / < 90 days ago    | 2 / 1            |
//! | popularity                           | 0.5 x popularity |
//!
//! Freshness and popularity only add to documents that already matched on
//! text or taxonomy, so a query that matches nothing always scores 0.

use chrono::{DateTime, Utc};

use crate::doc::SearchDoc;
use crate::text::normalize_text;

pub const TITLE_TOKEN_WEIGHT: f64 = 10.0;
pub const EXACT_TITLE_BONUS: f64 = 50.0;
pub const SUMMARY_TOKEN_WEIGHT: f64 = 5.0;
pub const CONTENT_TOKEN_WEIGHT: f64 = 1.0;
pub const KEYWORD_TOKEN_WEIGHT: f64 = 3.0;
pub const ENTITY_BOOST: f64 = 8.0;
pub const RECENT_BOOST: f64 = 2.0;
pub const SOMEWHAT_RECENT_BOOST: f64 = 1.0;
pub const POPULARITY_WEIGHT: f64 = 0.5;

const RECENT_DAYS: i64 = 30;
const SOMEWHAT_RECENT_DAYS: i64 = 90;

/// A query normalized once and reused across every document
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    normalized: String,
    tokens: Vec<String>,
}

impl PreparedQuery {
    pub fn new(query: &str) -> Self {
        let normalized = normalize_text(query);
        let tokens = normalized
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { normalized, tokens }
    }

    /// True when nothing is left to match after normalization
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// The normalized text fields of one document
///
/// Built once per index rebuild so that queries only normalize the query.
#[derive(Debug, Clone)]
pub struct NormalizedFields {
    title: String,
    summary: String,
    content: String,
    keywords: Vec<String>,
    pillar: Option<String>,
    section: Option<String>,
    cluster: Option<String>,
}

impl NormalizedFields {
    pub fn new(doc: &SearchDoc) -> Self {
        Self {
            title: normalize_text(&doc.title),
            summary: normalize_text(&doc.summary),
            content: normalize_text(&doc.content_plain),
            keywords: doc.keywords.iter().map(|k| normalize_text(k)).collect(),
            pillar: doc.pillar.as_ref().map(|r| normalize_text(&r.title)),
            section: doc.section.as_ref().map(|r| normalize_text(&r.title)),
            cluster: doc.cluster.as_ref().map(|r| normalize_text(&r.title)),
        }
    }
}

/// Score a document against raw query text
///
/// Returns 0 for anything that does not match; callers drop those documents.
pub fn score_document(doc: &SearchDoc, query: &str, now: DateTime<Utc>) -> f64 {
    score_prepared(doc, &NormalizedFields::new(doc), &PreparedQuery::new(query), now)
}

/// Score with pre-normalized document fields and query
pub fn score_prepared(
    doc: &SearchDoc,
    fields: &NormalizedFields,
    query: &PreparedQuery,
    now: DateTime<Utc>,
) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;

    for token in query.tokens() {
        if fields.title.contains(token.as_str()) {
            score += TITLE_TOKEN_WEIGHT;
        }
        if fields.summary.contains(token.as_str()) {
            score += SUMMARY_TOKEN_WEIGHT;
        }
        if fields.content.contains(token.as_str()) {
            score += CONTENT_TOKEN_WEIGHT;
        }
        for keyword in &fields.keywords {
            if keyword.contains(token.as_str()) {
                score += KEYWORD_TOKEN_WEIGHT;
            }
        }
    }

    if fields.title == query.normalized() {
        score += EXACT_TITLE_BONUS;
    }

    for entity in [&fields.pillar, &fields.section, &fields.cluster] {
        if entity
            .as_deref()
            .is_some_and(|title| title.contains(query.normalized()))
        {
            score += ENTITY_BOOST;
        }
    }

    if score <= 0.0 {
        return 0.0;
    }

    score + freshness_boost(doc.updated_at, now) + POPULARITY_WEIGHT * doc.popularity_score
}

/// Which query tokens appear anywhere in the document's text fields
pub fn matched_terms(fields: &NormalizedFields, query: &PreparedQuery) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for token in query.tokens() {
        let hit = fields.title.contains(token.as_str())
            || fields.summary.contains(token.as_str())
            || fields.content.contains(token.as_str())
            || fields.keywords.iter().any(|k| k.contains(token.as_str()));
        if hit && !matched.contains(token) {
            matched.push(token.clone());
        }
    }
    matched
}

fn freshness_boost(updated_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(updated_at) = updated_at else {
        return 0.0;
    };

    let age = now - updated_at;
    if age.num_milliseconds() < RECENT_DAYS * 86_400_000 {
        RECENT_BOOST
    } else if age.num_milliseconds() < SOMEWHAT_RECENT_DAYS * 86_400_000 {
        SOMEWHAT_RECENT_BOOST
    } else {
        0.0
    }
}
