//! Store implementations

mod memory;

pub use memory::{InMemoryProjectStore, InMemoryUserStore};
