//! Temporal pattern detection over decision history
//!
//! Scans a configurable recent window with exponential decay: newer entries
//! weigh more, older ones fade. A domain whose decayed skip frequency
//! crosses the threshold emits an adaptive signal that lowers its base
//! priority on the *next* cycle — the loop is adaptive, never retroactive.

use crate::core::ActivityDomain;
use crate::decision::Decision;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MS_PER_DAY: u64 = 86_400_000;

/// Window, decay, and threshold inputs; nothing here is hard-coded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalConfig {
    /// Entries older than this many days are ignored
    pub window_days: u32,
    /// Per-day decay factor in (0, 1]
    pub decay: f64,
    /// Decayed skip frequency above this emits a signal
    pub skip_threshold: f64,
    /// Base-weight reduction carried by each signal
    pub weight_delta: f64,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            window_days: 7,
            decay: 0.85,
            skip_threshold: 0.5,
            weight_delta: 0.05,
        }
    }
}

/// Signal that lowers one domain's base priority next cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSignal {
    pub domain: ActivityDomain,
    /// Decayed skip frequency that triggered the signal
    pub skip_rate: f64,
    /// Negative delta applied to the domain's base weight
    pub weight_delta: f64,
}

/// Result of one history scan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternScan {
    /// Decayed skip frequency per domain (only domains with history entries)
    pub domain_skip_rates: BTreeMap<ActivityDomain, f64>,
    /// Decayed skip frequency per weekday, Sunday first
    pub weekday_skip_rates: [f64; 7],
    pub signals: Vec<AdaptiveSignal>,
}

impl PatternScan {
    /// Skip rate for a domain, 0.0 when it has no history
    pub fn skip_rate(&self, domain: ActivityDomain) -> f64 {
        self.domain_skip_rates.get(&domain).copied().unwrap_or(0.0)
    }
}

/// Weekday index for a millisecond timestamp, Sunday = 0
///
/// The epoch fell on a Thursday, hence the +4 offset.
fn weekday_index(timestamp_ms: u64) -> usize {
    ((timestamp_ms / MS_PER_DAY + 4) % 7) as usize
}

pub fn weekday_name(index: usize) -> &'static str {
    match index {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        _ => "Saturday",
    }
}

/// Scan the history snapshot as of `now_ms`
pub fn scan(history: &[Decision], now_ms: u64, config: &TemporalConfig) -> PatternScan {
    let mut domain_weights: BTreeMap<ActivityDomain, (f64, f64)> = BTreeMap::new();
    let mut weekday_weights = [(0.0f64, 0.0f64); 7];

    for decision in history {
        if decision.timestamp_ms > now_ms {
            continue;
        }
        let age_days = (now_ms - decision.timestamp_ms) / MS_PER_DAY;
        if age_days >= u64::from(config.window_days) {
            continue;
        }

        let weight = config.decay.powi(age_days as i32);
        let skipped = if decision.action.is_skip() { weight } else { 0.0 };

        let entry = domain_weights.entry(decision.domain).or_insert((0.0, 0.0));
        entry.0 += skipped;
        entry.1 += weight;

        let wd = weekday_index(decision.timestamp_ms);
        weekday_weights[wd].0 += skipped;
        weekday_weights[wd].1 += weight;
    }

    let domain_skip_rates: BTreeMap<ActivityDomain, f64> = domain_weights
        .into_iter()
        .map(|(domain, (skipped, total))| (domain, skipped / total))
        .collect();

    let mut weekday_skip_rates = [0.0f64; 7];
    for (i, (skipped, total)) in weekday_weights.iter().enumerate() {
        if *total > 0.0 {
            weekday_skip_rates[i] = skipped / total;
        }
    }

    let signals = domain_skip_rates
        .iter()
        .filter(|(_, rate)| **rate > config.skip_threshold)
        .map(|(domain, rate)| AdaptiveSignal {
            domain: *domain,
            skip_rate: *rate,
            weight_delta: -config.weight_delta,
        })
        .collect();

    PatternScan {
        domain_skip_rates,
        weekday_skip_rates,
        signals,
    }
}
