//! In-memory outline storage.
//!
//! # Responsibility
//! - Hold the notebook, section, and page forests.
//! - Keep structural rules (nesting, ordering, identity) inside the store
//!   boundary so services only decide placement.
//!
//! # Invariants
//! - A node lives in exactly one forest, exactly once.
//! - Lookup is by `NodeId`, never by label.

pub mod forest;
pub mod outline;
