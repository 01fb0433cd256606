//! Lead routing: classifies a lead into a CRM owner / tag / priority.
//!
//! Signals are the enumerated form fields only. Free-text project details are
//! never inspected here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Estimated number of network drops, as offered by the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropCount {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-50")]
    UpTo50,
    #[serde(rename = "51-200")]
    UpTo200,
    #[serde(rename = "200+")]
    Over200,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityType {
    Office,
    Retail,
    Warehouse,
    School,
}

impl DropCount {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropCount::UpTo10 => "1-10",
            DropCount::UpTo50 => "11-50",
            DropCount::UpTo200 => "51-200",
            DropCount::Over200 => "200+",
        }
    }
}

impl FromStr for DropCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1-10" => Ok(DropCount::UpTo10),
            "11-50" => Ok(DropCount::UpTo50),
            "51-200" => Ok(DropCount::UpTo200),
            "200+" => Ok(DropCount::Over200),
            other => Err(format!(
                "dropCount '{other}' must be one of 1-10, 11-50, 51-200, 200+"
            )),
        }
    }
}

impl FacilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityType::Office => "Office",
            FacilityType::Retail => "Retail",
            FacilityType::Warehouse => "Warehouse",
            FacilityType::School => "School",
        }
    }
}

impl FromStr for FacilityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Office" => Ok(FacilityType::Office),
            "Retail" => Ok(FacilityType::Retail),
            "Warehouse" => Ok(FacilityType::Warehouse),
            "School" => Ok(FacilityType::School),
            other => Err(format!(
                "facilityType '{other}' must be one of Office, Retail, Warehouse, School"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadSignals {
    pub drop_count: Option<DropCount>,
    pub facility_type: Option<FacilityType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadTag {
    #[serde(rename = "Enterprise_Opp_High_Value")]
    EnterpriseOppHighValue,
    #[serde(rename = "Small_Business_Lead")]
    SmallBusinessLead,
    #[serde(rename = "General_Lead")]
    GeneralLead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Urgent,
    Normal,
}

impl fmt::Display for LeadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeadTag::EnterpriseOppHighValue => "Enterprise_Opp_High_Value",
            LeadTag::SmallBusinessLead => "Small_Business_Lead",
            LeadTag::GeneralLead => "General_Lead",
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Urgent => "Urgent",
            Priority::Normal => "Normal",
        })
    }
}

/// CRM owner ids for each routing bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingOwners {
    pub enterprise: String,
    pub small_business: String,
    pub default: String,
}

impl Default for RoutingOwners {
    fn default() -> Self {
        Self {
            enterprise: "Preston_Brown_ID".to_string(),
            small_business: "Mazzy_ID".to_string(),
            default: "Default_ID".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routing {
    pub owner: String,
    pub tag: LeadTag,
    pub priority: Priority,
}

/// Decision table, first match wins:
/// 1. 51+ drops or a warehouse -> enterprise owner, urgent
/// 2. up to 50 drops -> small-business owner
/// 3. anything else -> default owner
pub fn classify(signals: &LeadSignals, owners: &RoutingOwners) -> Routing {
    let is_enterprise = matches!(
        signals.drop_count,
        Some(DropCount::UpTo200 | DropCount::Over200)
    ) || signals.facility_type == Some(FacilityType::Warehouse);

    let is_small_business = matches!(
        signals.drop_count,
        Some(DropCount::UpTo10 | DropCount::UpTo50)
    );

    if is_enterprise {
        Routing {
            owner: owners.enterprise.clone(),
            tag: LeadTag::EnterpriseOppHighValue,
            priority: Priority::Urgent,
        }
    } else if is_small_business {
        Routing {
            owner: owners.small_business.clone(),
            tag: LeadTag::SmallBusinessLead,
            priority: Priority::Normal,
        }
    } else {
        Routing {
            owner: owners.default.clone(),
            tag: LeadTag::GeneralLead,
            priority: Priority::Normal,
        }
    }
}
