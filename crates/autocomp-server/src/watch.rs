//! Content directory watching

use std::path::Path;
use std::sync::Arc;

use autocomp_search::SearchStore;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::Result;

/// Invalidates a search index whenever its content directory changes
///
/// The index is not rebuilt here; the next query picks up the change.
/// Watching stops when this value is dropped.
pub struct ContentWatcher {
    _watcher: RecommendedWatcher,
}

impl ContentWatcher {
    pub fn start(path: impl AsRef<Path>, store: Arc<SearchStore>) -> Result<Self> {
        let path = path.as_ref();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if is_content_change(&event) => {
                debug!("Content changed: {:?}", event.paths);
                store.invalidate();
            }
            Ok(_) => {}
            Err(e) => warn!("Content watcher error: {}", e),
        })?;
        watcher.watch(path, RecursiveMode::Recursive)?;

        info!("Watching {:?} for content changes", path);
        Ok(Self { _watcher: watcher })
    }
}

/// Reads and opens do not change content
fn is_content_change(event: &Event) -> bool {
    !matches!(event.kind, EventKind::Access(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocomp_search::SearchConfig;
    use autocomp_store::LocalContentStore;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
    use tempfile::tempdir;

    #[test]
    fn test_access_events_are_ignored() {
        assert!(!is_content_change(&Event::new(EventKind::Access(AccessKind::Any))));
        assert!(is_content_change(&Event::new(EventKind::Create(CreateKind::File))));
        assert!(is_content_change(&Event::new(EventKind::Modify(ModifyKind::Any))));
        assert!(is_content_change(&Event::new(EventKind::Remove(RemoveKind::File))));
    }

    #[tokio::test]
    async fn test_start_requires_existing_directory() {
        let dir = tempdir().unwrap();
        let content = LocalContentStore::create(dir.path().join("content")).await.unwrap();
        let store = Arc::new(SearchStore::new(content.clone(), SearchConfig::default()));

        assert!(ContentWatcher::start(&content.path, Arc::clone(&store)).is_ok());
        assert!(ContentWatcher::start(dir.path().join("missing"), store).is_err());
    }
}
