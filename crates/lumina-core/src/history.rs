//! Bounded, in-memory calculation history.

use chrono::Utc;
use uuid::Uuid;

/// Most recent entries kept; older ones are silently dropped.
pub const CAPACITY: usize = 50;

/// One past calculation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub id: Uuid,
    pub expression: String,
    pub result: String,
    /// Epoch milliseconds at creation time.
    pub timestamp: i64,
}

/// Append-only, capacity-bounded history of calculations, newest first.
///
/// Owned by the presentation shell; fed by the keypad on every successful
/// evaluation and by every scientific dispatch. Both operations are total.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<Calculation>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a calculation, assigning id and timestamp here.
    ///
    /// Prepends the entry and truncates to the newest [`CAPACITY`].
    pub fn record(&mut self, expression: &str, result: &str) {
        let entry = Calculation {
            id: Uuid::new_v4(),
            expression: expression.to_string(),
            result: result.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        };
        self.entries.insert(0, entry);
        self.entries.truncate(CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries newest first.
    pub fn entries(&self) -> &[Calculation] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
