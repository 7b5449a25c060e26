//! Project input form use-case.
//!
//! # Responsibility
//! - Validate raw title/description/people input against `FormRules`.
//! - Create a project in the store only when every field passes.
//!
//! # Invariants
//! - A rejected submission never touches the store.
//! - All three fields are checked so hosts can mark every invalid field.

use crate::model::project::ProjectId;
use crate::store::project_store::ProjectStore;
use crate::validation::constraint::{ConstraintViolation, NumericConstraint, TextConstraint};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DESCRIPTION_MIN_LENGTH: usize = 10;
const PEOPLE_MIN: i64 = 1;
const PEOPLE_MAX: i64 = 5;

/// Input field of the project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Description,
    People,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::People => "people",
        }
    }
}

/// Per-field constraints applied by the input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    pub title: TextConstraint,
    pub description: TextConstraint,
    pub people: NumericConstraint,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            title: TextConstraint::required(),
            description: TextConstraint::required().with_min_length(DESCRIPTION_MIN_LENGTH),
            people: NumericConstraint::required()
                .with_min(PEOPLE_MIN)
                .with_max(PEOPLE_MAX),
        }
    }
}

impl FormRules {
    /// Loads rules from JSON. Omitted fields keep their defaults.
    ///
    /// # Errors
    /// - Returns `FormRulesError::Parse` for malformed JSON or unknown shapes.
    /// - Returns `FormRulesError::InvertedRange` when a min exceeds its max.
    pub fn from_json(raw: &str) -> Result<Self, FormRulesError> {
        let rules: Self = serde_json::from_str(raw).map_err(FormRulesError::Parse)?;
        rules.validate()?;
        Ok(rules)
    }

    fn validate(&self) -> Result<(), FormRulesError> {
        for (field, constraint) in [
            (FormField::Title, &self.title),
            (FormField::Description, &self.description),
        ] {
            if let (Some(min), Some(max)) = (constraint.min_length, constraint.max_length) {
                if min > max {
                    return Err(FormRulesError::InvertedRange(field));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.people.min, self.people.max) {
            if min > max {
                return Err(FormRulesError::InvertedRange(FormField::People));
            }
        }
        Ok(())
    }
}

/// Form rules configuration error.
#[derive(Debug)]
pub enum FormRulesError {
    Parse(serde_json::Error),
    InvertedRange(FormField),
}

impl Display for FormRulesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid form rules: {err}"),
            Self::InvertedRange(field) => write!(
                f,
                "invalid form rules: `{}` minimum exceeds its maximum",
                field.as_str()
            ),
        }
    }
}

impl Error for FormRulesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvertedRange(_) => None,
        }
    }
}

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFormInput {
    pub title: String,
    pub description: String,
    /// Raw people count; parsed as a whole number after trimming.
    pub people: String,
}

impl ProjectFormInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }
}

/// Input that passed every form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub title: String,
    pub description: String,
    pub members: u32,
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: FormField,
    pub violation: ConstraintViolation,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.violation)
    }
}

/// Every violation found in one submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    /// Returns whether `field` has at least one violation.
    pub fn has_field(&self, field: FormField) -> bool {
        self.0.iter().any(|violation| violation.field == field)
    }

    /// Distinct invalid fields in field order.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid input")?;
        for (index, violation) in self.0.iter().enumerate() {
            let separator = if index == 0 { ": " } else { "; " };
            write!(f, "{separator}{violation}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Project input form bound to a rule set.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    rules: FormRules,
}

impl ProjectForm {
    pub fn new(rules: FormRules) -> Self {
        Self { rules }
    }

    /// Checks all three fields without touching any store.
    pub fn validate(&self, input: &ProjectFormInput) -> Result<ValidProject, ValidationErrors> {
        let mut violations = Vec::new();
        collect(&mut violations, FormField::Title, self.rules.title.check(&input.title));
        collect(
            &mut violations,
            FormField::Description,
            self.rules.description.check(&input.description),
        );

        let members = match parse_people(&input.people) {
            Ok(count) => {
                let before = violations.len();
                collect(&mut violations, FormField::People, self.rules.people.check(count));
                if violations.len() == before {
                    members_from_count(&mut violations, count)
                } else {
                    None
                }
            }
            Err(violation) => {
                violations.push(FieldViolation {
                    field: FormField::People,
                    violation,
                });
                None
            }
        };

        if !violations.is_empty() {
            return Err(ValidationErrors(violations));
        }
        Ok(ValidProject {
            title: input.title.clone(),
            description: input.description.clone(),
            // Optional people count with no value is stored as zero members.
            members: members.unwrap_or(0),
        })
    }

    /// Validates `input` and, when every field passes, adds the project.
    ///
    /// # Errors
    /// - Returns `ValidationErrors` listing every failed rule; the store is
    ///   left untouched in that case.
    pub fn submit(
        &self,
        store: &mut ProjectStore,
        input: &ProjectFormInput,
    ) -> Result<ProjectId, ValidationErrors> {
        let valid = match self.validate(input) {
            Ok(valid) => valid,
            Err(errors) => {
                let fields = errors
                    .fields()
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                warn!("event=project_submit module=form status=rejected fields={fields}");
                return Err(errors);
            }
        };

        let id = store.add_project(valid.title, valid.description, valid.members);
        info!("event=project_submit module=form status=ok id={id}");
        Ok(id)
    }
}

fn collect(
    violations: &mut Vec<FieldViolation>,
    field: FormField,
    result: Result<(), Vec<ConstraintViolation>>,
) {
    if let Err(found) = result {
        violations.extend(
            found
                .into_iter()
                .map(|violation| FieldViolation { field, violation }),
        );
    }
}

/// Reads the raw people field as a whole non-negative count.
///
/// Digit-only input too large for `i64` saturates so the range check
/// reports it as above the maximum.
fn parse_people(raw: &str) -> Result<Option<i64>, ConstraintViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ConstraintViolation::NotACount(trimmed.to_string()));
    }
    Ok(Some(digits.parse::<i64>().unwrap_or(i64::MAX)))
}

/// Converts a range-checked count into the stored member count.
fn members_from_count(violations: &mut Vec<FieldViolation>, count: Option<i64>) -> Option<u32> {
    let count = count?;
    match u32::try_from(count) {
        Ok(members) => Some(members),
        Err(_) => {
            violations.push(FieldViolation {
                field: FormField::People,
                violation: ConstraintViolation::AboveMax {
                    max: i64::from(u32::MAX),
                    actual: count,
                },
            });
            None
        }
    }
}
