//! In-memory backend for the Agora topic store.
//!
//! Nothing is persisted; the store lives as long as the process. Useful for
//! tests and throwaway demo servers.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;

#[cfg(test)]
mod tests;
