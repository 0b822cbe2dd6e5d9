//! Taxonomy types - the pillar / section / cluster hierarchy
//!
//! A pillar is a broad topic, sections subdivide it by content type and
//! clusters group related articles within a section. Children point at their
//! parent by id.

use serde::{Deserialize, Serialize};

use crate::TaxonomyRef;

/// A broad topic, e.g. "Sedans"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pillar {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Pillar {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The `{slug, title}` reference used by articles and search documents
    pub fn to_ref(&self) -> TaxonomyRef {
        TaxonomyRef::new(&self.slug, &self.title)
    }
}

/// A subdivision of a pillar, e.g. "Comparisons"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Id of the owning pillar
    pub pillar_id: String,
}

impl Section {
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        pillar_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            pillar_id: pillar_id.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn to_ref(&self) -> TaxonomyRef {
        TaxonomyRef::new(&self.slug, &self.title)
    }
}

/// A group of related articles within a section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Id of the owning section
    pub section_id: String,
}

impl Cluster {
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        title: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            section_id: section_id.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn to_ref(&self) -> TaxonomyRef {
        TaxonomyRef::new(&self.slug, &self.title)
    }
}

/// The full hierarchy, each level in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    #[serde(default)]
    pub pillars: Vec<Pillar>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a pillar by id
    pub fn pillar(&self, id: &str) -> Option<&Pillar> {
        self.pillars.iter().find(|p| p.id == id)
    }

    /// Look up a section by id
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up a cluster by id
    pub fn cluster(&self, id: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id == id)
    }

    /// Resolve a section's owning pillar
    pub fn pillar_of(&self, section: &Section) -> Option<&Pillar> {
        self.pillar(&section.pillar_id)
    }

    /// Resolve a cluster's owning section and that section's pillar
    pub fn parents_of(&self, cluster: &Cluster) -> Option<(&Pillar, &Section)> {
        let section = self.section(&cluster.section_id)?;
        let pillar = self.pillar_of(section)?;
        Some((pillar, section))
    }

    /// Total number of nodes across all levels
    pub fn len(&self) -> usize {
        self.pillars.len() + self.sections.len() + self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy {
            pillars: vec![Pillar::new("p1", "sedans", "Sedans")],
            sections: vec![
                Section::new("s1", "comparisons", "Comparisons", "p1"),
                Section::new("s2", "orphan", "Orphan", "missing"),
            ],
            clusters: vec![
                Cluster::new("c1", "midsize", "Midsize Sedans", "s1"),
                Cluster::new("c2", "lost", "Lost", "s2"),
            ],
        }
    }

    #[test]
    fn test_parent_resolution() {
        let taxonomy = taxonomy();

        let (pillar, section) = taxonomy.parents_of(&taxonomy.clusters[0]).unwrap();
        assert_eq!(pillar.slug, "sedans");
        assert_eq!(section.slug, "comparisons");

        assert!(taxonomy.pillar_of(&taxonomy.sections[1]).is_none());
        assert!(taxonomy.parents_of(&taxonomy.clusters[1]).is_none());
    }

    #[test]
    fn test_len_counts_all_levels() {
        let taxonomy = taxonomy();
        assert_eq!(taxonomy.len(), 5);
        assert!(!taxonomy.is_empty());
        assert!(Taxonomy::new().is_empty());
    }
}
