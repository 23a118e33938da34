//! Consecutive-work-day streaks and the named tiers they map to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Transaction;

const PRO_THRESHOLD: u32 = 7;
const MASTER_THRESHOLD: u32 = 30;

/// Consecutive calendar days with at least one income transaction, ending
/// today or yesterday. A most recent income date 2+ days back breaks the
/// streak to 0; any gap while walking backward stops the count.
pub fn streak(transactions: &[Transaction], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.date)
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let Some(&latest) = dates.last() else {
        return 0;
    };
    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = latest;
    for &date in dates.iter().rev().skip(1) {
        if (cursor - date).num_days() == 1 {
            streak += 1;
            cursor = date;
        } else {
            break;
        }
    }
    streak
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level {
    Rookie,
    ProDriver,
    MasterFleet,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Rookie => "Rookie",
            Level::ProDriver => "Pro Driver",
            Level::MasterFleet => "Master Fleet",
        }
    }
}

/// A tier plus progress toward the next threshold. `MasterFleet` is terminal,
/// so its `next_threshold` is `None` and progress pins at 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LevelInfo {
    pub level: Level,
    pub next_threshold: Option<u32>,
    pub progress: f64,
}

pub fn level_for(streak: u32) -> LevelInfo {
    if streak >= MASTER_THRESHOLD {
        LevelInfo {
            level: Level::MasterFleet,
            next_threshold: None,
            progress: 100.0,
        }
    } else if streak >= PRO_THRESHOLD {
        LevelInfo {
            level: Level::ProDriver,
            next_threshold: Some(MASTER_THRESHOLD),
            progress: (streak - PRO_THRESHOLD) as f64 / (MASTER_THRESHOLD - PRO_THRESHOLD) as f64
                * 100.0,
        }
    } else {
        LevelInfo {
            level: Level::Rookie,
            next_threshold: Some(PRO_THRESHOLD),
            progress: streak as f64 / PRO_THRESHOLD as f64 * 100.0,
        }
    }
}
