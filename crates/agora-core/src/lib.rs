//! Core types, the storage trait, and the topic/subtopic services for Agora.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::TopicStore`]; the HTTP layer talks only
//! to the services in [`service`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod link;
pub mod service;
pub mod store;
pub mod subtopic;
pub mod title;
pub mod topic;

pub use error::{Error, Result};
