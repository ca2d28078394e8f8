pub mod comparison;
pub mod dashboard;
