//! Scoring policy
//!
//! Maps a country's medal counters to a single rank score: a fixed positive
//! weight per medal tier dotted with the counters. Pure and total over all
//! valid tallies.

use crate::tally::CountryTally;

/// Weight of a gold medal
pub const GOLD_WEIGHT: u64 = 3;
/// Weight of a silver medal
pub const SILVER_WEIGHT: u64 = 2;
/// Weight of a bronze medal
pub const BRONZE_WEIGHT: u64 = 1;

/// Compute the rank score for one country
pub fn score(tally: &CountryTally) -> u64 {
    tally.gold * GOLD_WEIGHT + tally.silver * SILVER_WEIGHT + tally.bronze * BRONZE_WEIGHT
}
