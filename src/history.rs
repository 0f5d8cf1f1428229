//! Bounded record of past fights, most recent first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::constants::MAX_HISTORY_ENTRIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightResult {
    Win,
    Loss,
}

/// One settled fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightRecord {
    pub opponent: String,
    pub result: FightResult,
    /// Gold gained (positive) or lost (negative) by this fight.
    pub gold_delta: i64,
    /// Unix seconds.
    pub timestamp: i64,
}

/// Append-only log of the last [`MAX_HISTORY_ENTRIES`] fights. The oldest
/// entry is evicted when the cap is reached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FightHistory {
    entries: VecDeque<FightRecord>,
}

impl FightHistory {
    pub fn record(&mut self, record: FightRecord) {
        if self.entries.len() >= MAX_HISTORY_ENTRIES {
            self.entries.pop_back();
        }
        self.entries.push_front(record);
    }

    /// Records newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &FightRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
