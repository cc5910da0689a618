use chrono::{DateTime, NaiveDate};
use email_address::{EmailAddress, Options};

use super::super::domain::{BudgetInput, ServiceOption};
use super::FieldError;

/// Character-count bounds for a free-text field.
pub(crate) struct TextBounds {
    pub label: &'static str,
    pub min: usize,
    pub max: usize,
}

pub(crate) const FULL_NAME: TextBounds = TextBounds {
    label: "Full name",
    min: 2,
    max: 80,
};

pub(crate) const COMPANY_NAME: TextBounds = TextBounds {
    label: "Company name",
    min: 2,
    max: 100,
};

const BUDGET_MIN_USD: u32 = 100;
const BUDGET_MAX_USD: u32 = 1_000_000;

fn check_length(value: &str, bounds: &TextBounds) -> Result<(), FieldError> {
    let length = value.chars().count();
    if length < bounds.min {
        return Err(FieldError::TooShort {
            label: bounds.label,
            min: bounds.min,
        });
    }
    if length > bounds.max {
        return Err(FieldError::TooLong {
            label: bounds.label,
            max: bounds.max,
        });
    }
    Ok(())
}

fn is_name_character(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || c == '\'' || c == '-'
}

pub(crate) fn full_name(raw: &str) -> Result<String, FieldError> {
    check_length(raw, &FULL_NAME)?;
    if !raw.chars().all(is_name_character) {
        return Err(FieldError::InvalidNameCharacters);
    }
    Ok(raw.to_string())
}

pub(crate) fn email(raw: &str) -> Result<String, FieldError> {
    let options = Options::default()
        .with_required_tld()
        .without_display_text();
    let parsed =
        EmailAddress::parse_with_options(raw, options).map_err(|_| FieldError::InvalidEmail)?;

    // Domain literals and numeric TLDs pass RFC 5322 but not a deliverable address.
    let tld_is_alphabetic = parsed
        .domain()
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    if !tld_is_alphabetic {
        return Err(FieldError::InvalidEmail);
    }

    Ok(raw.to_string())
}

pub(crate) fn company_name(raw: &str) -> Result<String, FieldError> {
    check_length(raw, &COMPANY_NAME)?;
    Ok(raw.to_string())
}

pub(crate) fn services(raw: &[String]) -> Result<Vec<ServiceOption>, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::NoServiceSelected);
    }

    let mut selected = Vec::with_capacity(raw.len());
    for label in raw {
        let option = ServiceOption::from_label(label)
            .ok_or_else(|| FieldError::UnknownService(label.clone()))?;
        if !selected.contains(&option) {
            selected.push(option);
        }
    }
    Ok(selected)
}

/// Empty text and `null` mean "no budget given", which is not the same as zero.
pub(crate) fn budget(raw: Option<&BudgetInput>) -> Result<Option<u32>, FieldError> {
    let amount = match raw {
        None => return Ok(None),
        Some(BudgetInput::Number(value)) => *value,
        Some(BudgetInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| FieldError::BudgetNotWholeNumber)?
        }
    };

    if !amount.is_finite() || amount.fract() != 0.0 {
        return Err(FieldError::BudgetNotWholeNumber);
    }
    if amount < f64::from(BUDGET_MIN_USD) {
        return Err(FieldError::BudgetBelowMinimum);
    }
    if amount > f64::from(BUDGET_MAX_USD) {
        return Err(FieldError::BudgetAboveMaximum);
    }

    Ok(Some(amount as u32))
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Compared by calendar day, so any time on `today` is accepted.
pub(crate) fn project_start_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldError> {
    let date = parse_calendar_date(raw).ok_or(FieldError::InvalidStartDate)?;
    if date < today {
        return Err(FieldError::StartDateInPast);
    }
    Ok(date)
}

pub(crate) fn accept_terms(raw: bool) -> Result<(), FieldError> {
    if raw {
        Ok(())
    } else {
        Err(FieldError::TermsNotAccepted)
    }
}
