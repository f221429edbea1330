//! Reasoning service adapters

pub mod http_gateway;
pub mod offline;

pub use http_gateway::HttpReasoningGateway;
pub use offline::OfflineReasoning;
