// Lead capture: validation, routing, and best-effort delivery to the CRM and
// the planner relay. Delivery outcomes are logged and never change the
// response the visitor sees.

pub mod crm;
pub mod handlers;
pub mod models;
pub mod planner;
pub mod routing;

use tracing::{error, info, warn};

/// Result of a best-effort side effect. Callers log it and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    NotConfigured,
    Rejected { status: u16, body: String },
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }

    pub fn log(&self, target: &str) {
        match self {
            DeliveryOutcome::Delivered => info!("Delivered to {target}"),
            DeliveryOutcome::NotConfigured => warn!("{target} not configured, delivery skipped"),
            DeliveryOutcome::Rejected { status, body } => {
                error!("{target} rejected delivery with status {status}: {body}")
            }
            DeliveryOutcome::Failed(e) => error!("Delivery to {target} failed: {e}"),
        }
    }
}
