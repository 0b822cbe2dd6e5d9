//! Document indexer - flattens articles and taxonomy nodes into search documents

use std::collections::HashSet;
use std::time::Instant;

use autocomp_core::{ArticleDoc, ContentBlock, Taxonomy};
use autocomp_store::ContentSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::doc::{DocKind, DocStat, SearchDoc};
use crate::error::Result;
use crate::text::{collapse_whitespace, extract_plain_text};

/// What a rebuild skipped
///
/// Taxonomy nodes whose parent chain cannot be resolved and documents whose id
/// was already taken are left out of the index rather than failing the build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Ids of sections whose pillar is missing
    pub orphaned_sections: Vec<String>,

    /// Ids of clusters whose section or pillar is missing
    pub orphaned_clusters: Vec<String>,

    /// Document ids seen more than once (later copies dropped)
    pub duplicate_ids: Vec<String>,
}

impl IndexReport {
    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.orphaned_sections.is_empty()
            && self.orphaned_clusters.is_empty()
            && self.duplicate_ids.is_empty()
    }
}

/// Turn one article into its search document
pub fn index_article(article: &ArticleDoc) -> SearchDoc {
    let mut text_parts: Vec<String> = Vec::new();
    let mut keywords = Vec::new();
    let mut semantic_clusters = Vec::new();
    let mut stats = Vec::new();
    let mut images: Vec<String> = article.hero_image().map(str::to_string).into_iter().collect();

    for block in &article.blocks {
        match block {
            ContentBlock::Intro { html } => text_parts.push(extract_plain_text(html)),
            ContentBlock::Markdown { markdown } => text_parts.push(extract_plain_text(markdown)),
            ContentBlock::LongForm {
                content,
                keywords_used,
                semantic_clusters: clusters,
            } => {
                text_parts.push(extract_plain_text(content));
                keywords.extend(keywords_used.iter().cloned());
                semantic_clusters.extend(clusters.iter().cloned());
            }
            ContentBlock::Faq { items } => {
                for item in items {
                    text_parts.push(format!("{} {}", item.question, item.answer));
                }
            }
            ContentBlock::SpecGrid { groups } => {
                for item in groups.iter().flat_map(|g| &g.items) {
                    stats.push(DocStat {
                        label: item.label.clone(),
                        value: item.value.to_string(),
                        unit: None,
                    });
                }
            }
            ContentBlock::Gallery { images: gallery } => {
                images.extend(gallery.iter().map(|i| i.url.clone()));
            }
            ContentBlock::ComparisonTable { .. } | ContentBlock::Other => {}
        }
    }

    let summary = article
        .tldr()
        .map(str::to_string)
        .unwrap_or_else(|| article.description.clone());

    SearchDoc {
        id: format!("article:{}", article.slug),
        kind: DocKind::Article,
        url: format!("/articles/{}", article.slug),
        title: article.title.clone(),
        subtitle: article.subtitle.clone(),
        summary,
        content_plain: collapse_whitespace(&text_parts.join(" ")),
        keywords,
        semantic_clusters,
        pillar: article.pillar.clone(),
        // The article's own section reference. Older indexes copied the
        // cluster reference into this field.
        section: article.section.clone(),
        cluster: article.cluster.clone(),
        stats,
        images,
        published_at: article.published_at,
        updated_at: article.updated_at,
        popularity_score: 0.0,
    }
}

/// Build the full document list from a content source
///
/// Order: articles, then pillars, sections and clusters, each in source order.
pub fn build_search_index<S: ContentSource + ?Sized>(source: &S) -> Result<Vec<SearchDoc>> {
    build_search_index_with_report(source).map(|(docs, _)| docs)
}

/// Build the full document list and report what was skipped
pub fn build_search_index_with_report<S: ContentSource + ?Sized>(
    source: &S,
) -> Result<(Vec<SearchDoc>, IndexReport)> {
    let started = Instant::now();
    let articles = source.list_articles()?;
    let taxonomy = source.taxonomy()?;

    let mut report = IndexReport::default();
    let mut candidates = Vec::with_capacity(articles.len() + taxonomy.len());

    candidates.extend(articles.iter().map(index_article));
    index_taxonomy(&taxonomy, &mut candidates, &mut report);

    let mut seen = HashSet::with_capacity(candidates.len());
    let mut docs = Vec::with_capacity(candidates.len());
    for doc in candidates {
        if seen.insert(doc.id.clone()) {
            docs.push(doc);
        } else {
            debug!("Dropping duplicate search document {}", doc.id);
            report.duplicate_ids.push(doc.id);
        }
    }

    info!(
        "Built search index: {} documents ({} articles) in {:?}",
        docs.len(),
        articles.len(),
        started.elapsed()
    );
    Ok((docs, report))
}

fn index_taxonomy(taxonomy: &Taxonomy, docs: &mut Vec<SearchDoc>, report: &mut IndexReport) {
    for pillar in &taxonomy.pillars {
        let mut doc = SearchDoc::new(
            format!("pillar:{}", pillar.slug),
            DocKind::Pillar,
            format!("/topics/{}", pillar.slug),
            &pillar.title,
        );
        doc.summary = pillar.description.clone();
        doc.content_plain = pillar.description.clone();
        doc.pillar = Some(pillar.to_ref());
        docs.push(doc);
    }

    for section in &taxonomy.sections {
        let Some(pillar) = taxonomy.pillar_of(section) else {
            debug!(
                "Skipping section {}: pillar {} not found",
                section.id, section.pillar_id
            );
            report.orphaned_sections.push(section.id.clone());
            continue;
        };

        let mut doc = SearchDoc::new(
            format!("section:{}/{}", pillar.slug, section.slug),
            DocKind::Section,
            format!("/topics/{}/{}", pillar.slug, section.slug),
            &section.title,
        );
        doc.summary = section.description.clone();
        doc.content_plain = section.description.clone();
        doc.pillar = Some(pillar.to_ref());
        doc.section = Some(section.to_ref());
        docs.push(doc);
    }

    for cluster in &taxonomy.clusters {
        let Some((pillar, section)) = taxonomy.parents_of(cluster) else {
            debug!(
                "Skipping cluster {}: section {} or its pillar not found",
                cluster.id, cluster.section_id
            );
            report.orphaned_clusters.push(cluster.id.clone());
            continue;
        };

        let mut doc = SearchDoc::new(
            format!("cluster:{}/{}/{}", pillar.slug, section.slug, cluster.slug),
            DocKind::Cluster,
            format!("/topics/{}/{}/{}", pillar.slug, section.slug, cluster.slug),
            &cluster.title,
        );
        doc.summary = cluster.description.clone();
        doc.content_plain = cluster.description.clone();
        doc.pillar = Some(pillar.to_ref());
        doc.section = Some(section.to_ref());
        doc.cluster = Some(cluster.to_ref());
        docs.push(doc);
    }
}
