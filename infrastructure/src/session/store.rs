//! In-memory session store
//!
//! Owns the session-scoped state the engine reads: current health snapshot
//! with derived metrics, the append-only decision history, and the task
//! schedule. Writes are serialized through one mutex (single writer);
//! readers take a consistent snapshot at cycle start. Storage and eviction
//! beyond process lifetime are out of scope.

use pacekeeper_application::CycleOutcome;
use pacekeeper_domain::{
    ComputedMetrics, Decision, DecisionHistory, DomainError, HealthState, RiskBand, ScorerConfig,
    StressLevel, Task,
};
use std::sync::Mutex;

/// Consistent view of the session for one cycle
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: HealthState,
    pub metrics: ComputedMetrics,
    pub history: Vec<Decision>,
    pub tasks: Vec<Task>,
    pub prior_risk: Option<RiskBand>,
}

#[derive(Default)]
struct Inner {
    state: Option<HealthState>,
    metrics: Option<ComputedMetrics>,
    history: DecisionHistory,
    tasks: Vec<Task>,
    prior_risk: Option<RiskBand>,
}

/// Session-scoped state with serialized writes
pub struct SessionStore {
    scorer: ScorerConfig,
    inner: Mutex<Inner>,
}

impl SessionStore {
    pub fn new(scorer: ScorerConfig) -> Self {
        Self {
            scorer,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, DomainError> {
        self.inner
            .lock()
            .map_err(|_| DomainError::invariant("session store lock poisoned"))
    }

    /// Validate and store a new snapshot; derived metrics are always
    /// recomputed, never carried over.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] on out-of-range input; the stored state
    /// is untouched in that case.
    pub fn update_state(
        &self,
        sleep_hours: f64,
        energy_level: u8,
        stress_level: StressLevel,
        available_hours: f64,
    ) -> Result<(HealthState, ComputedMetrics), DomainError> {
        let state = HealthState::new(sleep_hours, energy_level, stress_level, available_hours)?;
        let metrics = ComputedMetrics::derive(&state, &self.scorer);

        let mut inner = self.lock()?;
        inner.state = Some(state.clone());
        inner.metrics = Some(metrics.clone());
        Ok((state, metrics))
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) -> Result<(), DomainError> {
        self.lock()?.tasks = tasks;
        Ok(())
    }

    /// Snapshot for one cycle; None until the first state update
    pub fn snapshot(&self) -> Result<Option<SessionSnapshot>, DomainError> {
        let inner = self.lock()?;
        let (Some(state), Some(metrics)) = (inner.state.clone(), inner.metrics.clone()) else {
            return Ok(None);
        };

        Ok(Some(SessionSnapshot {
            state,
            metrics,
            history: inner.history.snapshot(),
            tasks: inner.tasks.clone(),
            prior_risk: inner.prior_risk,
        }))
    }

    /// Fold a finished cycle back into the session: append the decision,
    /// adopt the finalized schedule, and remember the risk band for the next
    /// cycle's adaptive inputs.
    pub fn apply_outcome(&self, outcome: &CycleOutcome) -> Result<(), DomainError> {
        let mut inner = self.lock()?;
        inner.history.append(outcome.decision.clone());
        inner.tasks = outcome.schedule.clone();
        inner.prior_risk = Some(outcome.metrics.burnout_risk_label);
        Ok(())
    }

    /// Record an override on one blocked task instance
    pub fn record_override(
        &self,
        task_index: usize,
        justification: &str,
    ) -> Result<Task, DomainError> {
        let mut inner = self.lock()?;
        let task = inner.tasks.get_mut(task_index).ok_or_else(|| {
            DomainError::validation("override", format!("no task at index {}", task_index))
        })?;
        task.record_override(justification)?;
        Ok(task.clone())
    }

    pub fn history_len(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.history.len())
    }

    /// Explicit session reset
    pub fn reset(&self) -> Result<(), DomainError> {
        *self.lock()? = Inner::default();
        Ok(())
    }
}
