use crate::core::convert::ConversionRecord;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const HISTORY_LIMIT: usize = 5;

/// Most recent conversions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionHistory {
    entries: VecDeque<ConversionRecord>,
}

impl ConversionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, evicting the oldest once the limit is exceeded.
    pub fn push(&mut self, record: ConversionRecord) {
        self.entries.push_front(record);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&ConversionRecord> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Favorite currency codes in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

impl Default for Favorites {
    fn default() -> Self {
        Self(vec!["USD".to_string(), "EUR".to_string(), "BRL".to_string()])
    }
}

impl Favorites {
    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    /// Adds `code` if absent, removes it otherwise. Returns whether it is now a favorite.
    pub fn toggle(&mut self, code: &str) -> bool {
        if self.contains(code) {
            self.0.retain(|c| c != code);
            false
        } else {
            self.0.push(code.to_string());
            true
        }
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(amount: f64) -> ConversionRecord {
        ConversionRecord {
            id: Uuid::new_v4(),
            from: "USD".to_string(),
            to: "EUR".to_string(),
            from_amount: amount,
            to_amount: amount * 0.85,
            rate: 0.85,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_history_keeps_most_recent_five() {
        let mut history = ConversionHistory::new();
        for i in 1..=6 {
            history.push(record(i as f64));
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        let amounts: Vec<f64> = history.iter().map(|r| r.from_amount).collect();
        assert_eq!(amounts, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
        assert_eq!(history.get(0).unwrap().from_amount, 6.0);
        assert!(history.get(5).is_none());
    }

    #[test]
    fn test_history_clear() {
        let mut history = ConversionHistory::new();
        history.push(record(1.0));
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_serializes_as_list() {
        let mut history = ConversionHistory::new();
        history.push(record(1.0));
        history.push(record(2.0));

        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with('['));
        let restored: ConversionHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
    }

    #[test]
    fn test_favorites_toggle() {
        let mut favorites = Favorites::default();
        assert!(favorites.contains("BRL"));

        assert!(!favorites.toggle("BRL"));
        assert!(!favorites.contains("BRL"));

        assert!(favorites.toggle("BTC"));
        assert_eq!(favorites.codes(), &["USD", "EUR", "BTC"]);
    }
}
