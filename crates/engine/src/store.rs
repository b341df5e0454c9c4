//! In-memory aggregation store.
//!
//! Append-only collections of historical records, grouped by category. The
//! store lives for the process lifetime; records are never removed or mutated.

use std::sync::RwLock;

use serde::Serialize;

use crate::record::Record;

/// Upload categories tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Offers,
    EmailCreatives,
    Campaigns,
}

impl Category {
    /// Route-facing name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Offers => "offers",
            Category::EmailCreatives => "email_creatives",
            Category::Campaigns => "campaigns",
        }
    }
}

/// Per-category record counts, as reported by the status endpoint.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DataCounts {
    pub offers: usize,
    pub email_creatives: usize,
    pub campaigns: usize,
}

/// Append-only in-memory store of historical records.
///
/// The store is handed to request handlers explicitly rather than living in a
/// global, so it can be swapped for a persistent implementation later. One
/// lock per category: a batch append happens under a single write-lock
/// acquisition, so concurrent batches never lose each other and readers never
/// observe a batch mid-append.
#[derive(Debug, Default)]
pub struct HistoricalStore {
    offers: RwLock<Vec<Record>>,
    email_creatives: RwLock<Vec<Record>>,
    campaigns: RwLock<Vec<Record>>,
}

impl HistoricalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shelf(&self, category: Category) -> &RwLock<Vec<Record>> {
        match category {
            Category::Offers => &self.offers,
            Category::EmailCreatives => &self.email_creatives,
            Category::Campaigns => &self.campaigns,
        }
    }

    /// Append a whole batch to a category and return the category's new total.
    pub fn append(&self, category: Category, records: Vec<Record>) -> usize {
        let mut shelf = self.shelf(category).write().expect("store lock poisoned");
        shelf.extend(records);
        shelf.len()
    }

    /// Record counts for all categories. Pure read, no side effects.
    pub fn counts(&self) -> DataCounts {
        DataCounts {
            offers: self.shelf(Category::Offers).read().expect("store lock poisoned").len(),
            email_creatives: self
                .shelf(Category::EmailCreatives)
                .read()
                .expect("store lock poisoned")
                .len(),
            campaigns: self
                .shelf(Category::Campaigns)
                .read()
                .expect("store lock poisoned")
                .len(),
        }
    }

    /// Consistent snapshot of the offers collection.
    pub fn offers_snapshot(&self) -> Vec<Record> {
        self.shelf(Category::Offers)
            .read()
            .expect("store lock poisoned")
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_append_returns_running_total() {
        let store = HistoricalStore::new();
        assert_eq!(store.append(Category::Offers, vec![json!({"clicks": 1})]), 1);
        assert_eq!(
            store.append(Category::Offers, vec![json!({"clicks": 2}), json!({"clicks": 3})]),
            3
        );
    }

    #[test]
    fn test_counts_track_batch_lengths_per_category() {
        let store = HistoricalStore::new();
        store.append(Category::Offers, vec![json!({}), json!({})]);
        store.append(Category::EmailCreatives, vec![json!({})]);
        store.append(Category::Offers, vec![json!({})]);

        let counts = store.counts();
        assert_eq!(counts.offers, 3);
        assert_eq!(counts.email_creatives, 1);
        assert_eq!(counts.campaigns, 0);
    }

    #[test]
    fn test_empty_batch_leaves_counts_unchanged() {
        let store = HistoricalStore::new();
        store.append(Category::Campaigns, vec![json!({})]);
        assert_eq!(store.append(Category::Campaigns, Vec::new()), 1);
        assert_eq!(store.counts().campaigns, 1);
    }

    #[test]
    fn test_snapshot_reflects_insertion() {
        let store = HistoricalStore::new();
        store.append(Category::Offers, vec![json!({"clicks": 100})]);

        let snapshot = store.offers_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0]["clicks"], 100);
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(HistoricalStore::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store.append(Category::Offers, vec![json!({"clicks": 1}), json!({"clicks": 2})]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.counts().offers, 8 * 50 * 2);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Offers.name(), "offers");
        assert_eq!(Category::EmailCreatives.name(), "email_creatives");
        assert_eq!(Category::Campaigns.name(), "campaigns");
    }
}
