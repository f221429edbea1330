//! Priority matrix and trade-off engine
//!
//! Reweights domain priorities under active constraints and allocates the
//! day's capacity. Weights always sum to 1.0 within epsilon after every
//! adjustment; see [`weights::WEIGHT_EPSILON`].

pub mod modifier;
pub mod tradeoff;
pub mod weights;

pub use modifier::ModifierTable;
pub use tradeoff::{
    DomainAction, ForcedSkip, SkipReason, TradeOffConfig, TradeOffDecision, TradeOffEngine,
};
pub use weights::{PriorityWeights, WEIGHT_EPSILON};
