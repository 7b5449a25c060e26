//! Domain model for the project board.
//!
//! # Responsibility
//! - Define the project record shared by the store and every board view.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are never deleted; only their status moves between partitions.

pub mod project;
