//! Search query and response types

use std::fmt;
use std::str::FromStr;

use autocomp_core::TaxonomyRef;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::doc::{DocKind, SearchDoc};
use crate::error::SearchError;

/// Search query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The raw query text; missing or blank means "no query"
    #[serde(default)]
    pub q: String,

    /// Filters to apply after scoring
    #[serde(default)]
    pub filters: SearchFilters,

    /// Result ordering (relevance when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,

    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Post-scoring filters, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Allowed document kinds (empty = any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<DocKind>,

    /// Pillar slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<String>,

    /// Section slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Cluster slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    /// Publication year (falls back to the update year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl SearchFilters {
    pub fn kinds(mut self, kinds: impl IntoIterator<Item = DocKind>) -> Self {
        self.kind = kinds.into_iter().collect();
        self
    }

    pub fn pillar(mut self, slug: impl Into<String>) -> Self {
        self.pillar = Some(slug.into());
        self
    }

    pub fn section(mut self, slug: impl Into<String>) -> Self {
        self.section = Some(slug.into());
        self
    }

    pub fn cluster(mut self, slug: impl Into<String>) -> Self {
        self.cluster = Some(slug.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Check a document against every filter that is set
    pub fn matches(&self, doc: &SearchDoc) -> bool {
        if !self.kind.is_empty() && !self.kind.contains(&doc.kind) {
            return false;
        }

        if !slug_matches(&self.pillar, &doc.pillar)
            || !slug_matches(&self.section, &doc.section)
            || !slug_matches(&self.cluster, &doc.cluster)
        {
            return false;
        }

        if let Some(year) = self.year {
            let doc_year = doc.published_at.or(doc.updated_at).map(|t| t.year());
            if doc_year != Some(year) {
                return false;
            }
        }

        true
    }
}

fn slug_matches(wanted: &Option<String>, actual: &Option<TaxonomyRef>) -> bool {
    match wanted {
        Some(slug) => actual.as_ref().is_some_and(|r| &r.slug == slug),
        None => true,
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest score first
    #[default]
    Relevance,
    /// Most recently updated (or published) first
    Newest,
    /// Highest popularity first
    Popular,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Newest => "newest",
            SortOrder::Popular => "popular",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortOrder::Relevance),
            "newest" => Ok(SortOrder::Newest),
            "popular" => Ok(SortOrder::Popular),
            other => Err(SearchError::QueryError(format!("unknown sort order '{}'", other))),
        }
    }
}

/// A single scored document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc: SearchDoc,

    pub score: f64,

    /// Query terms found in the document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,

    /// Number of matches before pagination
    pub total: usize,

    pub page: usize,

    pub limit: usize,

    /// The query text as received
    pub query: String,

    /// Wall-clock time spent serving the call
    pub took_ms: u64,
}

impl SearchResponse {
    pub fn empty(query: impl Into<String>, page: usize, limit: usize, took_ms: u64) -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            page,
            limit,
            query: query.into(),
            took_ms,
        }
    }
}

/// A lightweight typeahead entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSuggestion {
    pub id: String,
    pub kind: DocKind,
    pub title: String,
    pub url: String,
    pub score: f64,
}

/// Top suggestions for a partial query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSuggestResponse {
    pub suggestions: Vec<SearchSuggestion>,

    pub query: String,

    pub took_ms: u64,
}
