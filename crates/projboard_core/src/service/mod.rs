//! Board use-case services.
//!
//! # Responsibility
//! - Coordinate form input and list views with the project store.
//! - Keep UI/FFI layers free of validation and filtering rules.

pub mod project_input;
pub mod project_list;
