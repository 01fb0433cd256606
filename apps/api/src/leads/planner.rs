//! Project planner submissions, relayed as a table-formatted email through a
//! form relay endpoint, one request per recipient.

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::leads::DeliveryOutcome;

const NOT_SPECIFIED: &str = "Not specified";
const NOT_PROVIDED: &str = "Not provided";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerSubmission {
    pub project: PlannerProject,
    pub contact: PlannerContact,
    pub newsletter: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerProject {
    pub project_type: String,
    pub location: String,
    pub timeline: String,
    pub budget: String,
    pub services: Vec<String>,
    pub rfp_file: Option<RfpFile>,
}

/// Metadata of an attached RFP. The file itself never reaches this service.
#[derive(Debug, Clone, Deserialize)]
pub struct RfpFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerContact {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub project_notes: String,
    pub project_details: String,
}

impl PlannerSubmission {
    pub fn validate(&self) -> Result<(), AppError> {
        let contact = &self.contact;
        if [&contact.email, &contact.first_name, &contact.last_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Missing required fields: firstName, lastName and email are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Flattens the submission into the relay's table layout.
    pub fn to_payload(&self) -> Value {
        let project = &self.project;
        let contact = &self.contact;

        let services = if project.services.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            project.services.join(", ")
        };
        let contact_name = [contact.first_name.trim(), contact.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let (attachment_name, attachment_size) = match &project.rfp_file {
            Some(file) => (file.name.clone(), format_megabytes(file.size)),
            None => ("No attachment".to_string(), "—".to_string()),
        };

        let mut payload = Map::new();
        payload.insert("_subject".into(), json!("Project Planning Tool Submission"));
        payload.insert("_template".into(), json!("table"));
        payload.insert("_captcha".into(), json!("false"));
        payload.insert("Project Type".into(), json!(or_default(&project.project_type, NOT_SPECIFIED)));
        payload.insert("Project Location".into(), json!(or_default(&project.location, NOT_SPECIFIED)));
        payload.insert("Timeline".into(), json!(or_default(&project.timeline, NOT_SPECIFIED)));
        payload.insert("Budget".into(), json!(or_default(&project.budget, NOT_SPECIFIED)));
        payload.insert("Requested Services".into(), json!(services));
        payload.insert("Attachment Name".into(), json!(attachment_name));
        payload.insert("Attachment Size".into(), json!(attachment_size));
        payload.insert("Contact Name".into(), json!(or_default(&contact_name, NOT_SPECIFIED)));
        payload.insert("Organization".into(), json!(or_default(&contact.company, NOT_SPECIFIED)));
        payload.insert("Email".into(), json!(or_default(&contact.email, NOT_SPECIFIED)));
        payload.insert("Phone".into(), json!(or_default(&contact.phone, NOT_SPECIFIED)));
        payload.insert(
            "Working Title / Facility".into(),
            json!(or_default(&contact.project_notes, NOT_PROVIDED)),
        );
        payload.insert(
            "Project Details".into(),
            json!(or_default(&contact.project_details, NOT_PROVIDED)),
        );
        payload.insert(
            "Newsletter Opt-In".into(),
            json!(if self.newsletter { "Yes" } else { "No" }),
        );
        Value::Object(payload)
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[derive(Clone)]
pub struct PlannerRelay {
    client: Client,
    endpoint: String,
    recipients: Vec<String>,
}

impl PlannerRelay {
    pub fn new(client: Client, endpoint: String, recipients: Vec<String>) -> Self {
        Self {
            client,
            endpoint,
            recipients,
        }
    }

    /// `{endpoint}/{recipient}` with every reserved character of the
    /// recipient percent-encoded (`@` -> `%40`, `+` -> `%2B`).
    pub fn recipient_url(&self, recipient: &str) -> Result<Url, String> {
        let endpoint = self.endpoint.trim_end_matches('/');
        let url = format!("{endpoint}/{}", urlencoding::encode(recipient));
        Url::parse(&url).map_err(|e| format!("invalid relay URL {url}: {e}"))
    }

    /// One outcome per configured recipient; empty when none are configured.
    pub async fn deliver(&self, payload: &Value) -> Vec<(String, DeliveryOutcome)> {
        let mut outcomes = Vec::with_capacity(self.recipients.len());
        for recipient in &self.recipients {
            let outcome = match self.recipient_url(recipient) {
                Ok(url) => self.post(url, payload).await,
                Err(e) => DeliveryOutcome::Failed(e),
            };
            outcomes.push((recipient.clone(), outcome));
        }
        outcomes
    }

    async fn post(&self, url: Url, payload: &Value) -> DeliveryOutcome {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => DeliveryOutcome::Delivered,
            Ok(r) => {
                let status = r.status().as_u16();
                let body = r.text().await.unwrap_or_default();
                DeliveryOutcome::Rejected { status, body }
            }
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }
}
