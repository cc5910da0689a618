use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw intake payload exactly as the form posts it.
///
/// Every key is optional on the wire so an incomplete form produces field
/// errors during validation instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateRecord {
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub services: Vec<String>,
    pub budget_usd: Option<BudgetInput>,
    pub project_start_date: String,
    pub accept_terms: bool,
}

/// Budget as typed into the form: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Number(f64),
    Text(String),
}

impl From<u32> for BudgetInput {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for BudgetInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Services a client can request during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceOption {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Branding")]
    Branding,
    #[serde(rename = "Web Dev")]
    WebDev,
    #[serde(rename = "Mobile App")]
    MobileApp,
}

impl ServiceOption {
    pub const ALL: [ServiceOption; 4] = [
        ServiceOption::UiUx,
        ServiceOption::Branding,
        ServiceOption::WebDev,
        ServiceOption::MobileApp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceOption::UiUx => "UI/UX",
            ServiceOption::Branding => "Branding",
            ServiceOption::WebDev => "Web Dev",
            ServiceOption::MobileApp => "Mobile App",
        }
    }

    /// Exact, case-sensitive lookup by the label shown on the form.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.label() == label)
    }
}

impl fmt::Display for ServiceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form fields addressable by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    CompanyName,
    Services,
    BudgetUsd,
    ProjectStartDate,
    AcceptTerms,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::CompanyName => "companyName",
            Field::Services => "services",
            Field::BudgetUsd => "budgetUsd",
            Field::ProjectStartDate => "projectStartDate",
            Field::AcceptTerms => "acceptTerms",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Intake record that passed every field rule and may be transmitted.
///
/// Only [`validate`](super::validate) builds one, so holding an
/// `OnboardingRecord` is proof the constraints hold. The serialized form uses
/// the same keys as [`CandidateRecord`] and carries the service labels and
/// start date text as submitted; an absent budget is sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    full_name: String,
    email: String,
    company_name: String,
    #[serde(rename = "services")]
    service_labels: Vec<String>,
    #[serde(skip)]
    services: Vec<ServiceOption>,
    budget_usd: Option<u32>,
    #[serde(rename = "projectStartDate")]
    start_date_text: String,
    #[serde(skip)]
    project_start_date: NaiveDate,
    accept_terms: bool,
}

impl OnboardingRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        full_name: String,
        email: String,
        company_name: String,
        service_labels: Vec<String>,
        services: Vec<ServiceOption>,
        budget_usd: Option<u32>,
        start_date_text: String,
        project_start_date: NaiveDate,
    ) -> Self {
        Self {
            full_name,
            email,
            company_name,
            service_labels,
            services,
            budget_usd,
            start_date_text,
            project_start_date,
            accept_terms: true,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn services(&self) -> &[ServiceOption] {
        &self.services
    }

    pub fn budget_usd(&self) -> Option<u32> {
        self.budget_usd
    }

    pub fn project_start_date(&self) -> NaiveDate {
        self.project_start_date
    }

    pub fn accept_terms(&self) -> bool {
        self.accept_terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_defaults_missing_keys() {
        let candidate: CandidateRecord =
            serde_json::from_value(json!({ "fullName": "Ada" })).expect("partial payload decodes");

        assert_eq!(candidate.full_name, "Ada");
        assert!(candidate.services.is_empty());
        assert!(candidate.budget_usd.is_none());
        assert!(!candidate.accept_terms);
    }

    #[test]
    fn budget_accepts_numbers_and_text() {
        let candidate: CandidateRecord =
            serde_json::from_value(json!({ "budgetUsd": 5000 })).expect("numeric budget");
        assert_eq!(candidate.budget_usd, Some(BudgetInput::Number(5000.0)));

        let candidate: CandidateRecord =
            serde_json::from_value(json!({ "budgetUsd": "" })).expect("empty budget");
        assert_eq!(candidate.budget_usd, Some(BudgetInput::Text(String::new())));

        let candidate: CandidateRecord =
            serde_json::from_value(json!({ "budgetUsd": null })).expect("null budget");
        assert!(candidate.budget_usd.is_none());
    }

    #[test]
    fn service_labels_match_form_options() {
        assert_eq!(ServiceOption::from_label("Web Dev"), Some(ServiceOption::WebDev));
        assert_eq!(ServiceOption::from_label("web dev"), None);
        assert_eq!(
            serde_json::to_value(ServiceOption::UiUx).expect("serializes"),
            json!("UI/UX")
        );
    }
}
