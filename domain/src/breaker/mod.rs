//! Circuit breaker
//!
//! The non-bypassable safety gate. Runs after consensus but judges the
//! constraint set directly, never the vote: a dangerous combination forces a
//! blocking decision no matter what the council concluded.

use crate::constraint::{ConstraintKind, ConstraintSet};
use crate::core::ActivityDomain;
use serde::{Deserialize, Serialize};

/// One breaker rule: when every listed constraint is active, block the
/// listed domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerRule {
    pub all_of: Vec<ConstraintKind>,
    pub block: Vec<ActivityDomain>,
    pub reason: String,
}

/// A domain block produced by an engaged breaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBlock {
    pub domain: ActivityDomain,
    pub reason: String,
}

/// Outcome of the breaker assessment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BreakerVerdict {
    pub engaged: bool,
    pub blocks: Vec<DomainBlock>,
}

impl BreakerVerdict {
    /// The block covering a domain, if any
    pub fn block_for(&self, domain: ActivityDomain) -> Option<&DomainBlock> {
        self.blocks.iter().find(|b| b.domain == domain)
    }

    /// Verdict used when an engine invariant broke mid-cycle: every domain
    /// blocked.
    pub fn conservative(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            engaged: true,
            blocks: ActivityDomain::CANONICAL
                .iter()
                .map(|d| DomainBlock {
                    domain: *d,
                    reason: reason.clone(),
                })
                .collect(),
        }
    }
}

/// Evaluates breaker rules against the active constraints
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    rules: Vec<BreakerRule>,
}

impl CircuitBreaker {
    pub fn new(rules: Vec<BreakerRule>) -> Self {
        Self { rules }
    }

    /// Standard rules: critical sleep combined with high stress blocks
    /// fitness; a burnout warning blocks fitness and productivity.
    pub fn standard() -> Self {
        Self::new(vec![
            BreakerRule {
                all_of: vec![ConstraintKind::CriticalSleep, ConstraintKind::HighStress],
                block: vec![ActivityDomain::Fitness],
                reason: "critical sleep debt combined with high stress".to_string(),
            },
            BreakerRule {
                all_of: vec![ConstraintKind::BurnoutWarning],
                block: vec![ActivityDomain::Fitness, ActivityDomain::Productivity],
                reason: "burnout warning active".to_string(),
            },
        ])
    }

    pub fn rules(&self) -> &[BreakerRule] {
        &self.rules
    }

    /// Assess the constraints; independent of any consensus outcome
    pub fn assess(&self, constraints: &ConstraintSet) -> BreakerVerdict {
        let mut verdict = BreakerVerdict::default();

        for rule in &self.rules {
            if !rule.all_of.iter().all(|kind| constraints.has(*kind)) {
                continue;
            }
            verdict.engaged = true;
            for domain in &rule.block {
                if verdict.block_for(*domain).is_none() {
                    verdict.blocks.push(DomainBlock {
                        domain: *domain,
                        reason: rule.reason.clone(),
                    });
                }
            }
        }

        verdict
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::standard()
    }
}
