// Handler modules, one per resource
pub mod export;
pub mod health;
pub mod insights;
pub mod profile;
pub mod readings;
