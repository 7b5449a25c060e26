//! Core domain logic for the project board.
//! This crate owns project state, input validation and partition views.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{Project, ProjectId, ProjectStatus, ProjectStatusParseError};
pub use service::project_input::{
    FieldViolation, FormField, FormRules, FormRulesError, ProjectForm, ProjectFormInput,
    ValidProject, ValidationErrors,
};
pub use service::project_list::{DragPayload, ProjectCard, ProjectListView, PROJECT_DRAG_MIME};
pub use store::project_store::{ProjectSnapshot, ProjectStore, StatusChange, SubscriptionHandle};
pub use validation::constraint::{
    BoundMode, ConstraintViolation, NumericConstraint, TextConstraint,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
