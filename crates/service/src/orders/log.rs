//! Bounded, in-process record of recently ingested carts.
//!
//! Not a source of truth: entries vanish on restart and the oldest are
//! evicted once `capacity` is reached. The order table stays authoritative.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::ingest::OrderLine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLogEntry {
    pub user: String,
    pub time: String,
    pub details: Vec<OrderLine>,
    pub command: String,
}

#[derive(Default)]
struct LogState {
    entries: VecDeque<OrderLogEntry>,
    total: u64,
}

pub struct OrderLog {
    capacity: usize,
    state: RwLock<LogState>,
}

impl OrderLog {
    /// `capacity` is clamped to at least one entry.
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), state: RwLock::new(LogState::default()) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn append(&self, entry: OrderLogEntry) {
        let mut state = self.state.write().await;
        if state.entries.len() == self.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(entry);
        state.total += 1;
    }

    /// Up to `limit` entries, newest first.
    ///
    /// ```
    /// use service::orders::log::{OrderLog, OrderLogEntry};
    /// let log = OrderLog::new(10);
    /// for user in ["a", "b", "c"] {
    ///     let entry = OrderLogEntry {
    ///         user: user.into(),
    ///         time: String::new(),
    ///         details: vec![],
    ///         command: "<>".into(),
    ///     };
    ///     tokio_test::block_on(log.append(entry));
    /// }
    /// let recent = tokio_test::block_on(log.recent(2));
    /// let users: Vec<_> = recent.into_iter().map(|e| e.user).collect();
    /// assert_eq!(users, ["c", "b"]);
    /// ```
    pub async fn recent(&self, limit: usize) -> Vec<OrderLogEntry> {
        let state = self.state.read().await;
        state.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Appends since startup, evicted entries included.
    pub async fn total_count(&self) -> u64 {
        self.state.read().await.total
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user: &str) -> OrderLogEntry {
        OrderLogEntry {
            user: user.into(),
            time: "2024-01-01 10:00:00".into(),
            details: vec![],
            command: "<>".into(),
        }
    }

    #[tokio::test]
    async fn evicts_oldest_past_capacity() {
        let log = OrderLog::new(3);
        for i in 0..5 {
            log.append(entry(&format!("u{i}"))).await;
        }
        assert_eq!(log.len().await, 3);
        assert_eq!(log.total_count().await, 5);
        let users: Vec<_> = log.recent(10).await.into_iter().map(|e| e.user).collect();
        assert_eq!(users, vec!["u4", "u3", "u2"]);
    }

    #[tokio::test]
    async fn zero_capacity_still_keeps_latest() {
        let log = OrderLog::new(0);
        assert_eq!(log.capacity(), 1);
        assert!(log.is_empty().await);
        log.append(entry("a")).await;
        log.append(entry("b")).await;
        assert_eq!(log.recent(5).await[0].user, "b");
        assert_eq!(log.recent(0).await.len(), 0);
    }
}
