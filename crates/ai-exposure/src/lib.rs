//! Scoring core for the AI-impact survey.
//!
//! Raw questionnaire answers flow one way: they are parsed into typed dimension
//! scores, optionally weighted into a 0-100 exposure index, classified into a
//! qualitative level and compared against reference job profiles.

pub mod config;
pub mod error;
pub mod survey;
pub mod telemetry;
