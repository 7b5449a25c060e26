//! In-memory project state and change notification.
//!
//! # Responsibility
//! - Own the ordered project sequence for one running board.
//! - Broadcast a consistent snapshot to subscribers after every mutation.
//!
//! # Invariants
//! - Insertion order is the canonical project order.
//! - Subscribers run synchronously, in registration order, after the
//!   mutation is applied, and all observe the same snapshot.
//! - No-op operations never notify.

pub mod project_store;
