// HearthPulse Data
// This crate handles data access and external service interactions

// Key-value storage backends
pub mod store;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;

// Hosted AI service client (insights and OCR extraction)
pub mod ai;
