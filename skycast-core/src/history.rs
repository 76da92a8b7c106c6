//! Session-scoped search history and the process-wide search counter.
//!
//! Both are plain injected stores: the orchestrator receives them as
//! parameters and mutates them only after a successful query. The hosting
//! layer (CLI session, web session, ...) decides their lifetime.

use std::collections::HashMap;

/// Read/write capability for a user's recent searches.
pub trait HistoryStore {
    fn entries(&self) -> &[String];
    fn record(&mut self, city: &str);
    fn clear(&mut self);
}

const MAX_HISTORY: usize = 5;

/// In-memory history: at most five city names, most recent first, no
/// duplicates. Recording a city already present is a no-op (no reorder).
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for SearchHistory {
    fn entries(&self) -> &[String] {
        &self.entries
    }

    fn record(&mut self, city: &str) {
        if self.entries.iter().any(|e| e == city) {
            return;
        }
        if self.entries.len() >= MAX_HISTORY {
            self.entries.pop();
        }
        self.entries.insert(0, city.to_string());
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Monotonic per-city search counter with a most-searched listing.
#[derive(Debug, Clone, Default)]
pub struct SearchCounter {
    counts: HashMap<String, u64>,
}

impl SearchCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, city: &str) {
        *self.counts.entry(city.to_string()).or_insert(0) += 1;
    }

    /// The `n` most-searched cities, descending by count.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> =
            self.counts.iter().map(|(city, count)| (city.clone(), *count)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs.truncate(n);
        pairs
    }
}
