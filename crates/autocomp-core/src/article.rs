//! Article types - the comparison articles published on the site

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// A `{slug, title}` pair pointing at a taxonomy node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRef {
    pub slug: String,
    pub title: String,
}

impl TaxonomyRef {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// A comparison article
///
/// Articles are authored and stored elsewhere; autocomp only reads them.
/// Fields that exist for rendering only (table of contents, SEO metadata, ...)
/// are ignored when deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDoc {
    /// URL slug, unique across all articles
    pub slug: String,

    /// Article headline
    pub title: String,

    /// Optional secondary headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Short description shown in listings
    #[serde(default)]
    pub description: String,

    /// Hero section at the top of the article
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,

    /// Owning pillar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<TaxonomyRef>,

    /// Owning section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<TaxonomyRef>,

    /// Owning cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<TaxonomyRef>,

    /// Body content in display order
    ///
    /// A block that does not parse becomes `ContentBlock::Other` instead of
    /// failing the whole article.
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub blocks: Vec<ContentBlock>,

    /// Optional enhancement modules (TL;DR, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancements: Option<ArticleEnhancements>,

    /// First publication time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ArticleDoc {
    /// Create an empty article with the given slug and title
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            subtitle: None,
            description: String::new(),
            hero: None,
            pillar: None,
            section: None,
            cluster: None,
            blocks: Vec::new(),
            enhancements: None,
            published_at: None,
            updated_at: None,
        }
    }

    /// Parse an article from JSON and check the fields the index relies on
    pub fn from_json(json: &str) -> Result<Self> {
        let article: ArticleDoc = serde_json::from_str(json)?;
        article.validate()?;
        Ok(article)
    }

    /// Check that the article can be addressed
    pub fn validate(&self) -> Result<()> {
        if self.slug.trim().is_empty() {
            return Err(CoreError::InvalidArticle(format!(
                "article '{}' has an empty slug",
                self.title
            )));
        }
        if self.slug.contains('/') {
            return Err(CoreError::InvalidArticle(format!(
                "slug '{}' must not contain '/'",
                self.slug
            )));
        }
        Ok(())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_pillar(mut self, pillar: TaxonomyRef) -> Self {
        self.pillar = Some(pillar);
        self
    }

    pub fn with_section(mut self, section: TaxonomyRef) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_cluster(mut self, cluster: TaxonomyRef) -> Self {
        self.cluster = Some(cluster);
        self
    }

    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_hero_image(mut self, url: impl Into<String>) -> Self {
        let hero = self.hero.get_or_insert_with(Hero::default);
        hero.image = Some(ImageRef::new(url));
        self
    }

    pub fn with_tldr(mut self, content: impl Into<String>) -> Self {
        let enhancements = self.enhancements.get_or_insert_with(ArticleEnhancements::default);
        enhancements.tldr = Some(TldrModule {
            content: content.into(),
        });
        self
    }

    pub fn with_dates(mut self, published_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self.updated_at = Some(updated_at);
        self
    }

    /// The TL;DR text, if the article carries a non-empty TL;DR module
    pub fn tldr(&self) -> Option<&str> {
        self.enhancements
            .as_ref()
            .and_then(|e| e.tldr.as_ref())
            .map(|t| t.content.as_str())
            .filter(|c| !c.trim().is_empty())
    }

    /// The hero image URL, if any
    pub fn hero_image(&self) -> Option<&str> {
        self.hero
            .as_ref()
            .and_then(|h| h.image.as_ref())
            .map(|i| i.url.as_str())
    }
}

fn lenient_blocks<'de, D>(deserializer: D) -> std::result::Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or(ContentBlock::Other))
        .collect())
}

/// Hero section of an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// Reference to an image asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
        }
    }
}

/// Enhancement modules attached to an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleEnhancements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tldr: Option<TldrModule>,
}

/// Short summary module shown above the fold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TldrModule {
    #[serde(default)]
    pub content: String,
}

/// A block of article body content
///
/// Only a handful of block types carry searchable text. Presentational blocks
/// (charts, quizzes, calculators, ...) deserialize into `Other`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Opening paragraph(s), stored as HTML
    Intro {
        #[serde(default)]
        html: String,
    },

    /// Free markdown
    Markdown {
        #[serde(default)]
        markdown: String,
    },

    /// Long-form analysis with extracted keywords and topic groupings
    LongForm {
        #[serde(default)]
        content: String,
        #[serde(default)]
        keywords_used: Vec<String>,
        #[serde(default)]
        semantic_clusters: Vec<TopicCluster>,
    },

    /// Frequently asked questions
    Faq {
        #[serde(default)]
        items: Vec<FaqItem>,
    },

    /// Grouped specification values
    SpecGrid {
        #[serde(default)]
        groups: Vec<SpecGroup>,
    },

    /// Image gallery
    Gallery {
        #[serde(default)]
        images: Vec<ImageRef>,
    },

    /// Side-by-side comparison table
    ComparisonTable {
        #[serde(default)]
        headers: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },

    /// Any block type the index does not read
    #[serde(other)]
    Other,
}

impl ContentBlock {
    pub fn intro(html: impl Into<String>) -> Self {
        Self::Intro { html: html.into() }
    }

    pub fn markdown(markdown: impl Into<String>) -> Self {
        Self::Markdown {
            markdown: markdown.into(),
        }
    }

    pub fn faq(items: Vec<FaqItem>) -> Self {
        Self::Faq { items }
    }
}

/// A topic and the terms related to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCluster {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub related_terms: Vec<String>,
}

/// One question/answer pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A titled group of spec rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<SpecItem>,
}

/// A single `label: value` spec row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: SpecValue,
}

impl SpecItem {
    pub fn new(label: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Spec values are authored either as numbers or as free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Number(f64),
    Text(String),
}

impl Default for SpecValue {
    fn default() -> Self {
        SpecValue::Text(String::new())
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Number(n) => write!(f, "{}", n),
            SpecValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SpecValue {
    fn from(n: f64) -> Self {
        SpecValue::Number(n)
    }
}

impl From<&str> for SpecValue {
    fn from(s: &str) -> Self {
        SpecValue::Text(s.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(s: String) -> Self {
        SpecValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_blocks_deserialize_as_other() {
        let json = r#"{
            "slug": "accord-vs-camry",
            "title": "Accord vs Camry",
            "toc": [{"id": "intro"}],
            "blocks": [
                {"type": "intro", "html": "<p>Hello</p>"},
                {"type": "chart", "series": [1, 2, 3]},
                {"type": "long_form", "content": "Deep dive"}
            ]
        }"#;

        let article = ArticleDoc::from_json(json).unwrap();
        assert_eq!(article.blocks.len(), 3);
        assert!(matches!(article.blocks[1], ContentBlock::Other));
        match &article.blocks[2] {
            ContentBlock::LongForm {
                keywords_used,
                semantic_clusters,
                ..
            } => {
                assert!(keywords_used.is_empty());
                assert!(semantic_clusters.is_empty());
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_blocks_degrade_without_losing_the_article() {
        let json = r#"{
            "slug": "camry-review",
            "title": "Toyota Camry Review",
            "blocks": [
                {"type": "intro"},
                {"html": "<p>No type tag</p>"},
                {"type": "markdown", "markdown": 42},
                {"type": "faq", "items": [{"question": "Is it quiet?"}]},
                {"type": "spec_grid", "groups": [{"items": [{"value": 225}]}]},
                {"type": "gallery", "images": [{"alt": "missing url"}]},
                {"type": "markdown", "markdown": "Still **searchable**"}
            ]
        }"#;

        let article = ArticleDoc::from_json(json).unwrap();
        assert_eq!(article.title, "Toyota Camry Review");
        assert_eq!(article.blocks.len(), 7);

        assert!(matches!(&article.blocks[0], ContentBlock::Intro { html } if html.is_empty()));
        assert!(matches!(article.blocks[1], ContentBlock::Other));
        assert!(matches!(article.blocks[2], ContentBlock::Other));
        match &article.blocks[3] {
            ContentBlock::Faq { items } => {
                assert_eq!(items[0].question, "Is it quiet?");
                assert_eq!(items[0].answer, "");
            }
            other => panic!("unexpected block: {:?}", other),
        }
        match &article.blocks[4] {
            ContentBlock::SpecGrid { groups } => {
                assert_eq!(groups[0].items[0].label, "");
                assert_eq!(groups[0].items[0].value, SpecValue::Number(225.0));
            }
            other => panic!("unexpected block: {:?}", other),
        }
        assert!(matches!(&article.blocks[6], ContentBlock::Markdown { markdown } if markdown == "Still **searchable**"));
    }

    #[test]
    fn test_spec_values_accept_numbers_and_text() {
        let json = r#"{"label": "Horsepower", "value": 192}"#;
        let item: SpecItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.value.to_string(), "192");

        let json = r#"{"label": "Drive", "value": "FWD"}"#;
        let item: SpecItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.value, SpecValue::Text("FWD".into()));
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let err = ArticleDoc::from_json(r#"{"slug": " ", "title": "Untitled"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArticle(_)));
    }

    #[test]
    fn test_blank_tldr_is_ignored() {
        let article = ArticleDoc::new("a", "A").with_tldr("   ");
        assert_eq!(article.tldr(), None);

        let article = ArticleDoc::new("a", "A").with_tldr("Short answer");
        assert_eq!(article.tldr(), Some("Short answer"));
    }
}
