use serde::{Deserialize, Serialize};

/// A pharmacy owned by one pharmacist account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub open_time: String,
    pub close_time: String,
    pub pharmacist_id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One stock row of a pharmacy, joined with the medication name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLine {
    pub id: i64,
    pub medication_id: i64,
    pub medication_name: String,
    pub quantity: i64,
}

/// A pharmacy holding positive stock of a searched medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockedPharmacy {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub quantity: i64,
}
