pub mod interaction;
pub mod medication;
pub mod pharmacy;
pub mod preference;
pub mod prescription;
pub mod stock;
pub mod user;
