//! Session-scoped state management

pub mod store;

pub use store::{SessionSnapshot, SessionStore};
