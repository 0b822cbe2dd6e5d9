//! Search documents - the uniform shape every indexed entity is flattened into

use std::fmt;
use std::str::FromStr;

use autocomp_core::{TaxonomyRef, TopicCluster};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// What kind of entity a document represents
///
/// Only articles and taxonomy nodes are produced by the indexer today; the
/// remaining kinds are accepted in filters and reserved for future sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    Article,
    Video,
    Faq,
    Glossary,
    Dataset,
    Pillar,
    Section,
    Cluster,
}

impl DocKind {
    pub const ALL: [DocKind; 8] = [
        DocKind::Article,
        DocKind::Video,
        DocKind::Faq,
        DocKind::Glossary,
        DocKind::Dataset,
        DocKind::Pillar,
        DocKind::Section,
        DocKind::Cluster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Article => "article",
            DocKind::Video => "video",
            DocKind::Faq => "faq",
            DocKind::Glossary => "glossary",
            DocKind::Dataset => "dataset",
            DocKind::Pillar => "pillar",
            DocKind::Section => "section",
            DocKind::Cluster => "cluster",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DocKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SearchError::QueryError(format!("unknown document kind '{}'", s)))
    }
}

/// A `label: value` statistic pulled from spec grids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocStat {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One searchable entity
///
/// Documents are rebuilt wholesale on every index rebuild and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDoc {
    /// Unique id, namespaced by kind (`article:<slug>`, `pillar:<slug>`, ...)
    pub id: String,

    pub kind: DocKind,

    /// Canonical relative path
    pub url: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    pub summary: String,

    /// Markup-free text of every content-bearing block
    pub content_plain: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    /// Topic groupings, carried for display only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub semantic_clusters: Vec<TopicCluster>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<TaxonomyRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<TaxonomyRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<TaxonomyRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<DocStat>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Reserved for view/click tracking; always 0 for now
    #[serde(default)]
    pub popularity_score: f64,
}

impl SearchDoc {
    /// Create a document with only the required fields set
    pub fn new(
        id: impl Into<String>,
        kind: DocKind,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            url: url.into(),
            title: title.into(),
            subtitle: None,
            summary: String::new(),
            content_plain: String::new(),
            keywords: Vec::new(),
            semantic_clusters: Vec::new(),
            pillar: None,
            section: None,
            cluster: None,
            stats: Vec::new(),
            images: Vec::new(),
            published_at: None,
            updated_at: None,
            popularity_score: 0.0,
        }
    }

    /// Timestamp used for "newest" ordering: updated, then published
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.published_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_and_display() {
        for kind in DocKind::ALL {
            assert_eq!(kind.to_string().parse::<DocKind>().unwrap(), kind);
        }
        assert!("podcast".parse::<DocKind>().is_err());
    }

    #[test]
    fn test_empty_optionals_are_omitted() {
        let doc = SearchDoc::new("pillar:sedans", DocKind::Pillar, "/topics/sedans", "Sedans");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["kind"], "pillar");
        assert!(json.get("keywords").is_none());
        assert!(json.get("updated_at").is_none());
        assert_eq!(json["popularity_score"], 0.0);
    }
}
