use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::Frequency;

/// A prescription header. The medication lines live in
/// `PrescriptionItem`; the expanded calendar in `DoseEvent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub patient_weight_kg: Option<f64>,
    pub patient_age: Option<i64>,
    pub issued_on: NaiveDate,
    pub is_active: bool,
}

/// One medication's dosing rule within a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub id: i64,
    pub prescription_id: i64,
    pub medication_id: i64,
    pub frequency: Frequency,
    pub duration_days: i64,
    pub dose_value: f64,
    pub dose_unit: String,
}

/// One scheduled instance of taking a medication.
///
/// Generated in bulk when the prescription is created, never
/// regenerated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseEvent {
    pub id: i64,
    pub prescription_item_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub dose_value: f64,
    pub reminder_sent: bool,
    pub taken: bool,
}

/// A dose event joined with its medication, as listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingDose {
    pub id: i64,
    pub medication_id: i64,
    pub medication_name: String,
    pub dose_value: f64,
    pub dose_unit: String,
    pub scheduled_at: NaiveDateTime,
    pub reminder_sent: bool,
    pub taken: bool,
}
