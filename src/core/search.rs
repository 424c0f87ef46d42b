use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::model::{DerivedRecord, RecordBatch};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    City,
    Time,
    Region,
}

/// Filter by case-insensitive substring over city, region and zone id,
/// then stable-sort by the chosen key. The input is never mutated; ties
/// keep their original relative order.
pub fn filter_and_sort(records: &[DerivedRecord], query: &str, key: SortKey) -> Vec<DerivedRecord> {
    let needle = query.trim().to_lowercase();
    let mut view: Vec<DerivedRecord> = records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record.city.to_lowercase().contains(&needle)
                || record.region.to_lowercase().contains(&needle)
                || record.zone.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    match key {
        SortKey::City => view.sort_by(|a, b| a.city.cmp(&b.city)),
        SortKey::Time => view.sort_by(|a, b| a.local_time.cmp(&b.local_time)),
        SortKey::Region => view.sort_by(|a, b| a.region.cmp(&b.region)),
    }
    view
}

/// Defers query application until the raw value has been stable for the
/// full window; every update resets the pending timer. The timer task is
/// single-purpose and cancelled on drop.
pub struct QueryDebouncer {
    input: watch::Sender<String>,
    output: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl QueryDebouncer {
    /// # Panics
    ///
    /// Must be called from within a tokio runtime; the quiet-window timer
    /// runs as a spawned task.
    pub fn new(window: Duration) -> Self {
        let (input, mut raw) = watch::channel(String::new());
        let (settled_tx, output) = watch::channel(String::new());
        let task = tokio::spawn(async move {
            loop {
                if raw.changed().await.is_err() {
                    break;
                }
                loop {
                    let pending = raw.borrow_and_update().clone();
                    tokio::select! {
                        changed = raw.changed() => {
                            if changed.is_err() {
                                let _ = settled_tx.send(pending);
                                return;
                            }
                            // Restart the quiet window with the new value.
                        }
                        _ = tokio::time::sleep(window) => {
                            let _ = settled_tx.send(pending);
                            break;
                        }
                    }
                }
            }
        });
        Self {
            input,
            output,
            task,
        }
    }

    /// Feed a new raw query value.
    pub fn update(&self, raw_query: &str) {
        let _ = self.input.send(raw_query.to_string());
    }

    /// The last value that survived a full quiet window.
    pub fn settled(&self) -> String {
        self.output.borrow().clone()
    }

    /// Receiver that observes each settled value.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.output.clone()
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct ViewCache {
    instant: DateTime<Utc>,
    query: String,
    key: SortKey,
    view: Vec<DerivedRecord>,
}

/// Debounced search + sort over record batches. The filtered view is
/// recomputed only when the batch instant, the settled query or the sort
/// key actually changed.
pub struct SearchSortCoordinator {
    debouncer: QueryDebouncer,
    cache: Option<ViewCache>,
}

impl SearchSortCoordinator {
    /// # Panics
    ///
    /// Must be called from within a tokio runtime; see [`QueryDebouncer::new`].
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            debouncer: QueryDebouncer::new(window),
            cache: None,
        }
    }

    pub fn set_query(&self, raw_query: &str) {
        self.debouncer.update(raw_query);
    }

    pub fn settled_query(&self) -> String {
        self.debouncer.settled()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.debouncer.subscribe()
    }

    /// Current filtered, sorted view of the batch.
    pub fn view(&mut self, batch: &RecordBatch, key: SortKey) -> &[DerivedRecord] {
        let query = self.debouncer.settled();
        let fresh = matches!(
            &self.cache,
            Some(cache) if cache.instant == batch.instant && cache.query == query && cache.key == key
        );
        if !fresh {
            self.cache = Some(ViewCache {
                instant: batch.instant,
                query: query.clone(),
                key,
                view: filter_and_sort(&batch.records, &query, key),
            });
        }
        self.cache
            .as_ref()
            .map(|cache| cache.view.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for SearchSortCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
