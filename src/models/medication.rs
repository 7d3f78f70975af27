use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// A medication catalog entry.
///
/// Registered by pharmacists, or created as a bare-name stub when a
/// prescription references a medication the catalog does not know yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub photo_url: String,
    pub price: String,
    pub usage_type: String,
    pub dietary_precautions: Option<String>,
    pub administration_mode: Option<String>,
    pub meal_timing: Option<String>,
    pub added_at: NaiveDateTime,
}

/// An interaction between two catalog medications, joined with both names.
///
/// The pair is directional: (source, restricted) and (restricted, source)
/// are distinct rows and are not deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDetail {
    pub id: i64,
    pub source_name: String,
    pub restricted_name: String,
    pub risk_level: RiskLevel,
    pub description: String,
}
