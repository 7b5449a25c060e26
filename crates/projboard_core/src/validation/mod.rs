//! Field-level input validation.
//!
//! # Responsibility
//! - Provide pure predicates over one text or numeric field value.
//! - Report structured violations for callers that need field-level errors.
//!
//! # Invariants
//! - Validation never mutates state and never panics.
//! - An unconstrained validator accepts every input.

pub mod constraint;
