mod rules;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Local, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::domain::{CandidateRecord, Field, OnboardingRecord};

/// Reason a single field was rejected. `Display` is the message shown next to
/// the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{label} must be at least {min} characters.")]
    TooShort { label: &'static str, min: usize },
    #[error("{label} must be at most {max} characters.")]
    TooLong { label: &'static str, max: usize },
    #[error("Full name can only contain letters, spaces, hyphens, and apostrophes.")]
    InvalidNameCharacters,
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Please select at least one service.")]
    NoServiceSelected,
    #[error("Unknown service option: {0}.")]
    UnknownService(String),
    #[error("Budget must be a whole number.")]
    BudgetNotWholeNumber,
    #[error("Budget must be at least $100.")]
    BudgetBelowMinimum,
    #[error("Budget cannot exceed $1,000,000.")]
    BudgetAboveMaximum,
    #[error("Project start date must be a valid date.")]
    InvalidStartDate,
    #[error("Project start date must be today or a future date.")]
    StartDateInPast,
    #[error("You must accept the terms.")]
    TermsNotAccepted,
}

/// One message per rejected field; serializes as `{"fieldName": "message"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    /// Records `error` unless the field already failed an earlier rule.
    pub(crate) fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.entry(field).or_insert(error);
    }

    fn capture<T>(&mut self, field: Field, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.insert(field, error);
                None
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.errors.len())?;
        for (index, field) in self.errors.keys().enumerate() {
            let separator = if index == 0 { ": " } else { ", " };
            write!(f, "{separator}{field}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in &self.errors {
            map.serialize_entry(field.key(), &error.to_string())?;
        }
        map.end()
    }
}

/// Validates `candidate` against today's local date.
pub fn validate(candidate: &CandidateRecord) -> Result<OnboardingRecord, FieldErrors> {
    validate_on(candidate, Local::now().date_naive())
}

/// Applies every field rule independently and either returns the normalized
/// record or all field errors together.
pub fn validate_on(
    candidate: &CandidateRecord,
    today: NaiveDate,
) -> Result<OnboardingRecord, FieldErrors> {
    let mut errors = FieldErrors::default();

    let full_name = errors.capture(Field::FullName, rules::full_name(&candidate.full_name));
    let email = errors.capture(Field::Email, rules::email(&candidate.email));
    let company_name = errors.capture(
        Field::CompanyName,
        rules::company_name(&candidate.company_name),
    );
    let services = errors.capture(Field::Services, rules::services(&candidate.services));
    let budget_usd = errors.capture(
        Field::BudgetUsd,
        rules::budget(candidate.budget_usd.as_ref()),
    );
    let project_start_date = errors.capture(
        Field::ProjectStartDate,
        rules::project_start_date(&candidate.project_start_date, today),
    );
    let terms = errors.capture(Field::AcceptTerms, rules::accept_terms(candidate.accept_terms));

    match (
        full_name,
        email,
        company_name,
        services,
        budget_usd,
        project_start_date,
        terms,
    ) {
        (
            Some(full_name),
            Some(email),
            Some(company_name),
            Some(services),
            Some(budget_usd),
            Some(project_start_date),
            Some(()),
        ) => Ok(OnboardingRecord::new(
            full_name,
            email,
            company_name,
            candidate.services.clone(),
            services,
            budget_usd,
            candidate.project_start_date.clone(),
            project_start_date,
        )),
        _ => Err(errors),
    }
}
