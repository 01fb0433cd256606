use serde::Deserialize;

use crate::errors::AppError;
use crate::leads::routing::{DropCount, FacilityType, LeadSignals};

/// Lead form body as posted by the browser. Every field is optional at this
/// layer so that missing fields surface as a 400, not a deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub drop_count: Option<String>,
    pub facility_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub project_details: Option<String>,
}

/// A validated lead. Transient: forwarded to the CRM and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub project_details: Option<String>,
    pub signals: LeadSignals,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LeadSubmission {
    pub fn validate(self) -> Result<Lead, AppError> {
        let first_name = non_blank(self.first_name);
        let last_name = non_blank(self.last_name);
        let email = non_blank(self.email);
        let phone = non_blank(self.phone);

        let missing: Vec<&str> = [
            ("firstName", first_name.is_none()),
            ("lastName", last_name.is_none()),
            ("email", email.is_none()),
            ("phone", phone.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let drop_count = non_blank(self.drop_count)
            .map(|v| v.parse::<DropCount>())
            .transpose()
            .map_err(AppError::Validation)?;
        let facility_type = non_blank(self.facility_type)
            .map(|v| v.parse::<FacilityType>())
            .transpose()
            .map_err(AppError::Validation)?;

        Ok(Lead {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            company_name: non_blank(self.company_name).unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            city: non_blank(self.city).unwrap_or_default(),
            state: non_blank(self.state).unwrap_or_default(),
            project_details: non_blank(self.project_details),
            signals: LeadSignals {
                drop_count,
                facility_type,
            },
        })
    }
}
