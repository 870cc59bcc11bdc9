//! Organizer use-case services.
//!
//! # Responsibility
//! - Drive the selection cascade and the mutation policy over the store.
//! - Keep presentation layers decoupled from structural rules.

pub mod cascade;
pub mod menu;
pub mod mutation;
pub mod organizer;
