use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::EmployeeBucket;

/// Raw form fields as typed by the user.
///
/// Every field is a plain string so a half-filled form can be represented.
/// Blank optional fields mean "not provided".
#[derive(Validate, Deserialize, Serialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LeadInput {
    #[validate(custom(function = "not_blank"), length(max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "not_blank"), length(max = 160))]
    pub company: String,
    #[validate(length(max = 120))]
    pub role: String,
    #[validate(custom(function = "known_bucket"))]
    pub employees: String,
    #[validate(custom(function = "not_blank"), length(max = 4000))]
    pub processes: String,
    #[validate(length(max = 4000))]
    pub message: String,
}

impl LeadInput {
    /// True when every required field holds something other than whitespace.
    pub fn has_required_fields(&self) -> bool {
        [&self.name, &self.email, &self.company, &self.processes]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    /// Trim the input, validate it and build a [`LeadSubmission`].
    pub fn into_submission(self) -> crate::Result<LeadSubmission> {
        let input = LeadInput {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            company: self.company.trim().to_owned(),
            role: self.role.trim().to_owned(),
            employees: self.employees.trim().to_owned(),
            processes: self.processes,
            message: self.message,
        };

        input.validate()?;

        Ok(LeadSubmission {
            name: input.name,
            email: input.email,
            company: input.company,
            role: optional(input.role),
            employees: EmployeeBucket::from_str(&input.employees).ok(),
            processes: input.processes,
            message: optional(input.message),
        })
    }
}

/// A validated lead, as handed to the notification service.
#[derive(Validate, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LeadSubmission {
    #[validate(custom(function = "not_blank"), length(max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "not_blank"), length(max = 160))]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"), length(max = 120))]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<EmployeeBucket>,
    #[validate(custom(function = "not_blank"), length(max = 4000))]
    pub processes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"), length(max = 4000))]
    pub message: Option<String>,
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    Ok(())
}

fn known_bucket(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || EmployeeBucket::from_str(value).is_ok() {
        return Ok(());
    }

    Err(ValidationError::new("unknown_bucket"))
}
