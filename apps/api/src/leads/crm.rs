//! CRM webhook delivery. Best-effort: never fails the lead submission.

use reqwest::Client;
use serde::Serialize;

use crate::leads::models::Lead;
use crate::leads::routing::Routing;
use crate::leads::DeliveryOutcome;

const LEAD_SOURCE: &str = "Website";

/// Flattened, field-mapped body the CRM webhook expects.
#[derive(Debug, Clone, Serialize)]
pub struct CrmPayload {
    #[serde(rename = "First_Name")]
    pub first_name: String,
    #[serde(rename = "Last_Name")]
    pub last_name: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Drop_Count")]
    pub drop_count: String,
    #[serde(rename = "Facility_Type")]
    pub facility_type: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Lead_Source")]
    pub lead_source: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl CrmPayload {
    pub fn new(lead: &Lead, routing: &Routing) -> Self {
        let drop_count = lead
            .signals
            .drop_count
            .map(|d| d.as_str())
            .unwrap_or("Not specified")
            .to_string();
        let facility_type = lead
            .signals
            .facility_type
            .map(|f| f.as_str())
            .unwrap_or("Not specified")
            .to_string();

        let mut description = format!(
            "Lead from {}, {}. Drop Count: {}, Facility Type: {}",
            lead.city, lead.state, drop_count, facility_type
        );
        if let Some(details) = &lead.project_details {
            description.push_str(&format!(". Project details: {details}"));
        }

        Self {
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            company: lead.company_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            drop_count,
            facility_type,
            city: lead.city.clone(),
            state: lead.state.clone(),
            owner: routing.owner.clone(),
            tag: routing.tag.to_string(),
            priority: routing.priority.to_string(),
            lead_source: LEAD_SOURCE.to_string(),
            description,
        }
    }
}

#[derive(Clone)]
pub struct CrmClient {
    client: Client,
    webhook_url: Option<String>,
}

impl CrmClient {
    pub fn new(client: Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// Posts the payload to the webhook. Every failure is folded into the outcome.
    pub async fn deliver(&self, payload: &CrmPayload) -> DeliveryOutcome {
        let Some(url) = &self.webhook_url else {
            return DeliveryOutcome::NotConfigured;
        };

        match self.client.post(url).json(payload).send().await {
            Ok(response) if response.status().is_success() => DeliveryOutcome::Delivered,
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                DeliveryOutcome::Rejected { status, body }
            }
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        }
    }
}
