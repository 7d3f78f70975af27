pub mod enums;
pub mod medication;
pub mod pharmacy;
pub mod prescription;
pub mod user;

pub use medication::*;
pub use pharmacy::*;
pub use prescription::*;
pub use user::*;
