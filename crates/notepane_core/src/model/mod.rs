//! Outline domain model.
//!
//! # Responsibility
//! - Define the node shape shared by the notebook, section, and page trees.
//! - Define the process-wide selection record the cascade maintains.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId` assigned at creation.
//! - Structure (group vs. plain, page vs. subpage) is explicit data, never
//!   derived from presentation state.

pub mod node;
pub mod selection;
