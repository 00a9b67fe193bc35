//! Use cases, one function per operation.
//!
//! Each function is generic over a [`RecordStore`](crate::store::RecordStore)
//! and is the only place where the cross-cutting rules are sequenced:
//!
//! 1. validate the input and check references,
//! 2. run the single-head rule or a workflow transition,
//! 3. write through the store,
//! 4. recompute the affected household summaries,
//! 5. append the audit entry.
//!
//! Steps are not wrapped in a transaction. A failure after the primary
//! write surfaces to the caller while the earlier writes stay committed.

pub mod announcements;
pub mod audit;
pub mod blotters;
pub mod documents;
pub mod households;
pub mod profile;
pub mod reports;
pub mod residents;
pub mod users;

/// Convert a backend error into the domain [`Error`](crate::Error).
pub(crate) fn backend<E: Into<crate::Error>>(e: E) -> crate::Error { e.into() }
