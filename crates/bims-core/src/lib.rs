//! Core types and trait definitions for the barangay records backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement the traits in [`store`]; the HTTP layer calls
//! the functions in [`service`], which is where the household aggregator,
//! the single-head rule, the status workflows and the audit trail are wired
//! together explicitly.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod announcement;
pub mod audit;
pub mod blotter;
pub mod document;
pub mod error;
pub mod household;
pub mod profile;
pub mod report;
pub mod resident;
pub mod service;
pub mod store;
pub mod user;
pub mod workflow;

pub use error::{Error, FieldError, Result};
