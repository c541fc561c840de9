//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations
//! - Partial updates name their columns explicitly (see [`changes`])

pub mod changes;
pub mod pool;
pub mod repos;
pub mod schema;

pub use changes::ChangeSet;
pub use pool::{create_lazy_pool, create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
