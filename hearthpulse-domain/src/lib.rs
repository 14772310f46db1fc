// HearthPulse Domain
// This crate contains the business logic for the HearthPulse application

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Paginated report layout (summary and standardized log sheet)
pub mod report;
