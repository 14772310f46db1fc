// hearthpulse-api lib.rs
//
// This is the main library file for the HearthPulse API.
// It re-exports the APIs from the various modules.

// Public modules
pub mod api;
pub mod entities;
pub mod export;
pub mod openapi;
