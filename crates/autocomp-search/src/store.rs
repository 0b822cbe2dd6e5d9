//! Search store - owns the cached index and serves queries against it

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use autocomp_store::ContentSource;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::SearchConfig;
use crate::doc::{DocKind, SearchDoc};
use crate::error::Result;
use crate::indexer::{build_search_index_with_report, IndexReport};
use crate::query::{
    SearchQuery, SearchResponse, SearchResult, SearchSuggestResponse, SearchSuggestion, SortOrder,
};
use crate::scoring::{matched_terms, score_prepared, NormalizedFields, PreparedQuery};

/// Lifecycle state of the cached index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// Nothing built yet
    Empty,
    /// Built within the TTL window
    Fresh,
    /// Older than the TTL, or invalidated; rebuilt on next access
    Stale,
}

/// Point-in-time description of the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStatus {
    pub state: IndexState,
    pub documents: usize,
    pub built_at: Option<DateTime<Utc>>,
    pub by_kind: BTreeMap<DocKind, usize>,
}

/// A document together with its normalized fields
#[derive(Debug, Clone)]
struct IndexedDoc {
    doc: SearchDoc,
    fields: NormalizedFields,
}

/// One immutable build of the index
#[derive(Debug)]
struct IndexSnapshot {
    docs: Vec<IndexedDoc>,
    built_at: DateTime<Utc>,
    report: IndexReport,
}

#[derive(Debug, Default)]
struct IndexCache {
    snapshot: Option<Arc<IndexSnapshot>>,
    invalidated: bool,
    /// Bumped by every `invalidate`, so a rebuild that raced one stays stale
    generation: u64,
}

/// Serves search and suggestions over a TTL-cached, fully rebuilt index
///
/// The index is rebuilt from the content source whenever it is empty, older
/// than the configured TTL, or has been invalidated. Each rebuild produces a
/// new snapshot that replaces the previous one wholesale; queries work on the
/// snapshot they started with, so a concurrent rebuild never changes the
/// documents under a running query.
///
/// Rebuilds run outside the cache lock; the lock is only held to read or swap
/// the snapshot, so `status` and fresh-index queries never wait on a rebuild.
pub struct SearchStore {
    source: Box<dyn ContentSource>,
    config: SearchConfig,
    clock: Arc<dyn Clock>,
    cache: RwLock<IndexCache>,
    rebuilding: Mutex<()>,
}

impl SearchStore {
    /// Create a store over a content source using the system clock
    pub fn new(source: impl ContentSource + 'static, config: SearchConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    /// Create a store with an explicit clock
    pub fn with_clock(
        source: impl ContentSource + 'static,
        config: SearchConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source: Box::new(source),
            config,
            clock,
            cache: RwLock::new(IndexCache::default()),
            rebuilding: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query: score, filter, sort, paginate
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let started = Instant::now();
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit.max(1));

        let snapshot = self.ensure_index()?;

        let prepared = PreparedQuery::new(&query.q);
        if prepared.is_empty() {
            debug!("Empty search query, skipping scoring");
            return Ok(SearchResponse::empty(&query.q, page, limit, elapsed_ms(started)));
        }

        let now = self.clock.now();
        let mut matches: Vec<(&IndexedDoc, f64)> = snapshot
            .docs
            .iter()
            .map(|d| (d, score_prepared(&d.doc, &d.fields, &prepared, now)))
            .filter(|(d, score)| *score > 0.0 && query.filters.matches(&d.doc))
            .collect();

        match query.sort.unwrap_or_default() {
            SortOrder::Relevance => matches.sort_by(|a, b| b.1.total_cmp(&a.1)),
            SortOrder::Newest => {
                matches.sort_by_key(|(d, _)| std::cmp::Reverse(recency_millis(&d.doc)))
            }
            SortOrder::Popular => {
                matches.sort_by(|a, b| b.0.doc.popularity_score.total_cmp(&a.0.doc.popularity_score))
            }
        }

        let total = matches.len();
        let offset = (page - 1).saturating_mul(limit);
        let results = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(d, score)| SearchResult {
                doc: d.doc.clone(),
                score,
                highlights: matched_terms(&d.fields, &prepared),
            })
            .collect();

        let took_ms = elapsed_ms(started);
        debug!("Search '{}' matched {} documents in {}ms", query.q, total, took_ms);

        Ok(SearchResponse {
            results,
            total,
            page,
            limit,
            query: query.q.clone(),
            took_ms,
        })
    }

    /// Top documents by pure relevance, for typeahead
    pub fn suggest(&self, text: &str, limit: Option<usize>) -> Result<SearchSuggestResponse> {
        let started = Instant::now();
        let limit = limit
            .unwrap_or(self.config.suggest_limit)
            .min(self.config.max_limit);

        let snapshot = self.ensure_index()?;

        let prepared = PreparedQuery::new(text);
        if prepared.is_empty() {
            return Ok(SearchSuggestResponse {
                suggestions: Vec::new(),
                query: text.to_string(),
                took_ms: elapsed_ms(started),
            });
        }

        let now = self.clock.now();
        let mut matches: Vec<(&IndexedDoc, f64)> = snapshot
            .docs
            .iter()
            .map(|d| (d, score_prepared(&d.doc, &d.fields, &prepared, now)))
            .filter(|(_, score)| *score > 0.0)
            .collect();
        matches.sort_by(|a, b| b.1.total_cmp(&a.1));
        matches.truncate(limit);

        let suggestions = matches
            .into_iter()
            .map(|(d, score)| SearchSuggestion {
                id: d.doc.id.clone(),
                kind: d.doc.kind,
                title: d.doc.title.clone(),
                url: d.doc.url.clone(),
                score,
            })
            .collect();

        Ok(SearchSuggestResponse {
            suggestions,
            query: text.to_string(),
            took_ms: elapsed_ms(started),
        })
    }

    /// Rebuild the index now, regardless of its age
    ///
    /// Returns the number of indexed documents.
    pub fn reindex(&self) -> Result<usize> {
        let _rebuilding = self.rebuilding.lock();
        let snapshot = self.rebuild_and_swap()?;
        Ok(snapshot.docs.len())
    }

    /// Mark the index stale so the next access rebuilds it
    pub fn invalidate(&self) {
        let mut cache = self.cache.write();
        cache.generation += 1;
        cache.invalidated = true;
        debug!("Search index invalidated");
    }

    /// Current lifecycle state and document counts
    pub fn status(&self) -> IndexStatus {
        let cache = self.cache.read();
        let state = self.state_of(&cache);

        match &cache.snapshot {
            Some(snapshot) => {
                let mut by_kind = BTreeMap::new();
                for d in &snapshot.docs {
                    *by_kind.entry(d.doc.kind).or_insert(0) += 1;
                }
                IndexStatus {
                    state,
                    documents: snapshot.docs.len(),
                    built_at: Some(snapshot.built_at),
                    by_kind,
                }
            }
            None => IndexStatus {
                state,
                documents: 0,
                built_at: None,
                by_kind: BTreeMap::new(),
            },
        }
    }

    /// What the most recent rebuild skipped
    pub fn last_report(&self) -> Option<IndexReport> {
        self.cache.read().snapshot.as_ref().map(|s| s.report.clone())
    }

    /// Return a fresh snapshot, rebuilding first if needed
    fn ensure_index(&self) -> Result<Arc<IndexSnapshot>> {
        if let Some(snapshot) = self.fresh_snapshot() {
            return Ok(snapshot);
        }

        let _rebuilding = self.rebuilding.lock();
        // Another caller may have rebuilt while we waited for the lock
        if let Some(snapshot) = self.fresh_snapshot() {
            return Ok(snapshot);
        }

        self.rebuild_and_swap()
    }

    fn fresh_snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        let cache = self.cache.read();
        match (self.state_of(&cache), &cache.snapshot) {
            (IndexState::Fresh, Some(snapshot)) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    /// Build a new snapshot without holding the cache lock, then swap it in
    ///
    /// Callers hold `rebuilding`.
    fn rebuild_and_swap(&self) -> Result<Arc<IndexSnapshot>> {
        let generation = self.cache.read().generation;
        let snapshot = self.rebuild()?;

        let mut cache = self.cache.write();
        cache.snapshot = Some(Arc::clone(&snapshot));
        cache.invalidated = cache.generation != generation;
        Ok(snapshot)
    }

    fn state_of(&self, cache: &IndexCache) -> IndexState {
        let Some(snapshot) = &cache.snapshot else {
            return IndexState::Empty;
        };
        if cache.invalidated {
            return IndexState::Stale;
        }

        let age = self.clock.now() - snapshot.built_at;
        let expired = age
            .to_std()
            .map(|age| age > self.config.index_ttl)
            .unwrap_or(false);

        if expired {
            IndexState::Stale
        } else {
            IndexState::Fresh
        }
    }

    fn rebuild(&self) -> Result<Arc<IndexSnapshot>> {
        let started = Instant::now();
        let (docs, report) = build_search_index_with_report(self.source.as_ref())?;

        if !report.is_clean() {
            debug!(
                "Index rebuild skipped {} orphaned sections, {} orphaned clusters, {} duplicates",
                report.orphaned_sections.len(),
                report.orphaned_clusters.len(),
                report.duplicate_ids.len()
            );
        }

        let docs: Vec<IndexedDoc> = docs
            .into_iter()
            .map(|doc| IndexedDoc {
                fields: NormalizedFields::new(&doc),
                doc,
            })
            .collect();

        info!(
            "Rebuilt search index with {} documents in {:?}",
            docs.len(),
            started.elapsed()
        );

        Ok(Arc::new(IndexSnapshot {
            docs,
            built_at: self.clock.now(),
            report,
        }))
    }
}

fn recency_millis(doc: &SearchDoc) -> i64 {
    doc.recency().map(|t| t.timestamp_millis()).unwrap_or(0)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::query::SearchFilters;
    use autocomp_core::{ArticleDoc, Taxonomy};
    use autocomp_store::sample::sample_corpus;
    use autocomp_store::{MemoryContentStore, StoreError};
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration as StdDuration;

    fn now() -> DateTime<Utc> {
        "2026-10-17T12:00:00Z".parse().unwrap()
    }

    fn store_with_clock() -> (SearchStore, Arc<MemoryContentStore>, Arc<ManualClock>) {
        let corpus = Arc::new(sample_corpus());
        let clock = Arc::new(ManualClock::new(now()));
        let store = SearchStore::with_clock(Arc::clone(&corpus), SearchConfig::default(), clock.clone());
        (store, corpus, clock)
    }

    /// Counts how often the indexer asks for content
    struct CountingSource {
        inner: MemoryContentStore,
        reads: AtomicUsize,
    }

    impl ContentSource for CountingSource {
        fn list_articles(&self) -> autocomp_store::Result<Vec<ArticleDoc>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.list_articles()
        }

        fn taxonomy(&self) -> autocomp_store::Result<Taxonomy> {
            self.inner.taxonomy()
        }
    }

    #[test]
    fn test_honda_accord_scenario() {
        let (store, _, _) = store_with_clock();
        let response = store.search(&SearchQuery::new("honda accord")).unwrap();

        let top = &response.results[0];
        assert_eq!(top.doc.id, "article:2026-midsize-sedan-comparison");
        // Both tokens hit the title
        assert!(top.score >= 20.0);
        assert!(top.highlights.contains(&"honda".to_string()));
        assert!(top.highlights.contains(&"accord".to_string()));
    }

    #[test]
    fn test_sedans_newest_scenario() {
        let (store, _, _) = store_with_clock();
        let query = SearchQuery::new("sedans")
            .with_sort(SortOrder::Newest)
            .with_limit(2);
        let response = store.search(&query).unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.limit, 2);
        assert!(response.total > 2);

        let full = store
            .search(&SearchQuery::new("sedans").with_sort(SortOrder::Newest).with_limit(100))
            .unwrap();
        assert_eq!(full.total, response.total);
        assert!(full.results.iter().any(|r| r.doc.id == "pillar:sedans"));
        let ids: Vec<&str> = full
            .results
            .iter()
            .filter(|r| r.doc.kind == DocKind::Article)
            .map(|r| r.doc.id.as_str())
            .collect();
        assert_eq!(ids.len(), 5);

        let stamps: Vec<i64> = full.results.iter().map(|r| recency_millis(&r.doc)).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(response.results[0].doc.id, full.results[0].doc.id);
        assert_eq!(response.results[1].doc.id, full.results[1].doc.id);
    }

    #[test]
    fn test_electric_suv_suggestion_scenario() {
        let (store, _, _) = store_with_clock();
        let response = store.suggest("electric suv", Some(3)).unwrap();

        assert!(response.suggestions.len() <= 3);
        assert_eq!(response.suggestions[0].id, "article:best-electric-suvs-2026");
        assert!(response
            .suggestions
            .windows(2)
            .all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_suggest_default_limit() {
        let (store, _, _) = store_with_clock();
        let response = store.suggest("sedan", None).unwrap();
        assert_eq!(response.suggestions.len(), 8);
    }

    #[test]
    fn test_empty_query_skips_scoring() {
        let (store, _, _) = store_with_clock();

        for q in ["", "   "] {
            let response = store.search(&SearchQuery::new(q)).unwrap();
            assert!(response.results.is_empty());
            assert_eq!(response.total, 0);
        }
        assert!(store.suggest("  ", None).unwrap().suggestions.is_empty());

        // The index is still built on the way in
        assert_eq!(store.status().state, IndexState::Fresh);
    }

    #[test]
    fn test_filter_conjunction() {
        let (store, _, _) = store_with_clock();
        let query = SearchQuery::new("sedan").with_filters(
            SearchFilters::default()
                .kinds([DocKind::Article])
                .pillar("sedans"),
        );
        let response = store.search(&query).unwrap();

        assert!(response.total > 0);
        for result in &response.results {
            assert_eq!(result.doc.kind, DocKind::Article);
            assert_eq!(result.doc.pillar.as_ref().unwrap().slug, "sedans");
        }

        let unfiltered = store.search(&SearchQuery::new("sedan")).unwrap();
        assert!(unfiltered.total > response.total);
    }

    #[test]
    fn test_pagination_reassembles_full_result() {
        let (store, _, _) = store_with_clock();
        let full = store.search(&SearchQuery::new("sedan").with_limit(100)).unwrap();
        let total = full.total;
        let limit = 3;

        let mut pages = Vec::new();
        for page in 1..=(total / limit + 2) {
            let response = store
                .search(&SearchQuery::new("sedan").with_page(page).with_limit(limit))
                .unwrap();
            let expected = limit.min(total.saturating_sub((page - 1) * limit));
            assert_eq!(response.results.len(), expected);
            assert_eq!(response.total, total);
            pages.extend(response.results.into_iter().map(|r| r.doc.id));
        }

        let all: Vec<String> = full.results.into_iter().map(|r| r.doc.id).collect();
        assert_eq!(pages, all);
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let (store, _, _) = store_with_clock();
        let response = store
            .search(&SearchQuery::new("sedan").with_page(0).with_limit(10_000))
            .unwrap();
        assert_eq!(response.page, 1);
        assert_eq!(response.limit, 100);

        let response = store.search(&SearchQuery::new("sedan")).unwrap();
        assert_eq!(response.limit, 20);
    }

    #[test]
    fn test_cache_served_within_ttl() {
        let (store, corpus, clock) = store_with_clock();
        let query = SearchQuery::new("showdown");

        assert_eq!(store.search(&query).unwrap().total, 1);

        corpus.remove_article("civic-vs-corolla").unwrap();
        clock.advance(Duration::seconds(30));
        assert_eq!(store.search(&query).unwrap().total, 1);

        clock.advance(Duration::seconds(31));
        assert_eq!(store.status().state, IndexState::Stale);
        assert_eq!(store.search(&query).unwrap().total, 0);
    }

    #[test]
    fn test_rebuild_only_when_stale() {
        let source = Arc::new(CountingSource {
            inner: sample_corpus(),
            reads: AtomicUsize::new(0),
        });
        let clock = Arc::new(ManualClock::new(now()));
        let store = SearchStore::with_clock(Arc::clone(&source), SearchConfig::default(), clock.clone());

        assert_eq!(store.status().state, IndexState::Empty);
        store.search(&SearchQuery::new("accord")).unwrap();
        store.suggest("accord", None).unwrap();
        // Exactly at the TTL still counts as fresh
        clock.advance(Duration::seconds(60));
        store.search(&SearchQuery::new("accord")).unwrap();
        assert_eq!(source.reads.load(Ordering::SeqCst), 1);

        clock.advance(Duration::seconds(1));
        store.search(&SearchQuery::new("accord")).unwrap();
        assert_eq!(source.reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reindex_and_invalidate() {
        let (store, corpus, _) = store_with_clock();
        let showdown = SearchQuery::new("showdown");
        assert_eq!(store.search(&showdown).unwrap().total, 1);

        corpus.remove_article("civic-vs-corolla").unwrap();
        store.invalidate();
        assert_eq!(store.status().state, IndexState::Stale);
        assert_eq!(store.search(&showdown).unwrap().total, 0);

        corpus
            .upsert_article(ArticleDoc::new("truck-showdown", "Midsize Truck Showdown"))
            .unwrap();
        // Fresh again, so only an explicit reindex picks up the new article
        assert_eq!(store.search(&showdown).unwrap().total, 0);
        let count = store.reindex().unwrap();
        assert_eq!(count, store.status().documents);
        assert_eq!(store.search(&showdown).unwrap().total, 1);
    }

    #[test]
    fn test_status_counts_by_kind() {
        let (store, _, _) = store_with_clock();
        store.reindex().unwrap();

        let status = store.status();
        assert_eq!(status.state, IndexState::Fresh);
        assert_eq!(status.by_kind[&DocKind::Article], 6);
        assert_eq!(status.by_kind[&DocKind::Pillar], 3);
        assert_eq!(status.built_at, Some(now()));
        assert!(store.last_report().unwrap().is_clean());
    }

    struct Broken;

    impl ContentSource for Broken {
        fn list_articles(&self) -> autocomp_store::Result<Vec<ArticleDoc>> {
            Err(StoreError::Unavailable("storage offline".into()))
        }

        fn taxonomy(&self) -> autocomp_store::Result<Taxonomy> {
            Err(StoreError::Unavailable("storage offline".into()))
        }
    }

    #[test]
    fn test_source_failure_surfaces() {
        let store = SearchStore::new(Broken, SearchConfig::default());
        assert!(store.search(&SearchQuery::new("accord")).is_err());
        assert!(store.suggest("accord", None).is_err());
        assert!(store.reindex().is_err());
        assert_eq!(store.status().state, IndexState::Empty);
    }

    /// Blocks inside `list_articles` until told to continue
    struct GatedSource {
        inner: MemoryContentStore,
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl ContentSource for GatedSource {
        fn list_articles(&self) -> autocomp_store::Result<Vec<ArticleDoc>> {
            let _ = self.entered.lock().send(());
            let _ = self.release.lock().recv();
            self.inner.list_articles()
        }

        fn taxonomy(&self) -> autocomp_store::Result<Taxonomy> {
            self.inner.taxonomy()
        }
    }

    #[test]
    fn test_status_does_not_wait_for_rebuild() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let store = Arc::new(SearchStore::new(
            GatedSource {
                inner: sample_corpus(),
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            },
            SearchConfig::default(),
        ));

        let rebuilding = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.reindex().unwrap())
        };
        entered_rx.recv().unwrap();

        let (status_tx, status_rx) = mpsc::channel();
        {
            let store = Arc::clone(&store);
            std::thread::spawn(move || status_tx.send(store.status().state).unwrap());
        }
        let state = status_rx.recv_timeout(StdDuration::from_secs(5));

        release_tx.send(()).unwrap();
        let documents = rebuilding.join().unwrap();

        assert_eq!(state, Ok(IndexState::Empty));
        assert_eq!(store.status().state, IndexState::Fresh);
        assert_eq!(store.status().documents, documents);
    }

    #[test]
    fn test_invalidate_during_rebuild_keeps_index_stale() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let store = Arc::new(SearchStore::new(
            GatedSource {
                inner: sample_corpus(),
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            },
            SearchConfig::default(),
        ));

        let rebuilding = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.reindex().unwrap())
        };
        entered_rx.recv().unwrap();
        store.invalidate();
        release_tx.send(()).unwrap();
        rebuilding.join().unwrap();

        assert_eq!(store.status().state, IndexState::Stale);
    }

    #[test]
    fn test_concurrent_queries_share_snapshot() {
        let (store, _, _) = store_with_clock();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        store.reindex().unwrap();
                    }
                    store.search(&SearchQuery::new("accord")).unwrap().total
                })
            })
            .collect();

        let totals: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(totals.windows(2).all(|w| w[0] == w[1]));
    }
}
