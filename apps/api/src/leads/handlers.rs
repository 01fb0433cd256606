//! Axum route handlers for lead and planner forms.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::leads::crm::CrmPayload;
use crate::leads::models::LeadSubmission;
use crate::leads::planner::PlannerSubmission;
use crate::leads::routing::{classify, Routing};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub success: bool,
    pub routing: Routing,
    pub lead_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PlannerResponse {
    pub success: bool,
    pub message: String,
}

fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// POST /api/leads
///
/// Validates and classifies the lead, then forwards it to the CRM webhook.
/// A CRM failure is logged; the visitor still gets a success response.
pub async fn handle_submit_lead(
    State(state): State<AppState>,
    body: Result<Json<LeadSubmission>, JsonRejection>,
) -> Result<Json<LeadResponse>, AppError> {
    let Json(submission) = body.map_err(bad_body)?;
    let lead = submission.validate()?;

    let lead_id = Uuid::new_v4();
    let routing = classify(&lead.signals, &state.config.owners);
    info!(
        %lead_id,
        owner = %routing.owner,
        tag = %routing.tag,
        priority = %routing.priority,
        "Lead routed"
    );

    let payload = CrmPayload::new(&lead, &routing);
    state.crm.deliver(&payload).await.log("CRM webhook");

    Ok(Json(LeadResponse {
        success: true,
        routing,
        lead_id,
    }))
}

/// POST /api/planner/submit
///
/// Relays the planner submission to every configured recipient. Same
/// best-effort contract as the lead form.
pub async fn handle_planner_submit(
    State(state): State<AppState>,
    body: Result<Json<PlannerSubmission>, JsonRejection>,
) -> Result<Json<PlannerResponse>, AppError> {
    let Json(submission) = body.map_err(bad_body)?;
    submission.validate()?;

    let payload = submission.to_payload();
    let outcomes = state.planner.deliver(&payload).await;
    if outcomes.is_empty() {
        error!("PLANNER_RECIPIENTS is empty; planner submission was not relayed");
    }
    for (recipient, outcome) in &outcomes {
        outcome.log(&format!("planner relay for {recipient}"));
    }
    if !outcomes.is_empty() && !outcomes.iter().any(|(_, o)| o.is_delivered()) {
        warn!("Planner submission reached none of {} recipients", outcomes.len());
    }

    Ok(Json(PlannerResponse {
        success: true,
        message: "Submission received".to_string(),
    }))
}
