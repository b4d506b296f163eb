//! Tally store and ranker
//!
//! In-memory per-country medal counters plus the deterministic ranked view.
//! Entries are created lazily on the first event naming a new country and
//! live for the process lifetime; counters only ever increment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::scoring;

/// One medal tier. Parsed from the wire literals `gold`, `silver`, `bronze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl FromStr for Medal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(Medal::Gold),
            "silver" => Ok(Medal::Silver),
            "bronze" => Ok(Medal::Bronze),
            other => Err(Error::Validation(format!("unknown medal '{}'", other))),
        }
    }
}

/// Medal counters for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTally {
    pub country: String,
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
}

impl CountryTally {
    fn new(country: String) -> Self {
        Self {
            country,
            gold: 0,
            silver: 0,
            bronze: 0,
        }
    }

    fn award(&mut self, medal: Medal) {
        match medal {
            Medal::Gold => self.gold += 1,
            Medal::Silver => self.silver += 1,
            Medal::Bronze => self.bronze += 1,
        }
    }
}

/// Ranked view of all tallies at one point in time
pub type TallySnapshot = Vec<CountryTally>;

/// In-memory tally store.
///
/// Entries are kept in insertion (first-seen) order; ranking is computed on
/// demand by [`TallyBoard::ranked`]. Country keys are case-sensitive and not
/// normalized.
#[derive(Debug, Default)]
pub struct TallyBoard {
    entries: Vec<CountryTally>,
}

impl TallyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one award event: find or lazily create the country's entry and
    /// increment the selected medal counter by exactly 1.
    pub fn apply(&mut self, country: &str, medal: Medal) {
        match self.entries.iter_mut().find(|t| t.country == country) {
            Some(entry) => entry.award(medal),
            None => {
                let mut entry = CountryTally::new(country.to_string());
                entry.award(medal);
                self.entries.push(entry);
            }
        }
    }

    /// Current tallies sorted by descending score.
    ///
    /// The sort is stable over the insertion-ordered backing Vec, so
    /// equal-score countries keep their first-appearance order.
    pub fn ranked(&self) -> TallySnapshot {
        let mut snapshot = self.entries.clone();
        snapshot.sort_by_key(|t| std::cmp::Reverse(scoring::score(t)));
        snapshot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
