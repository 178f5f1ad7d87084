//! Request handlers

pub mod health;
pub mod claims;
pub mod distributions;
pub mod portfolio;
pub mod rules;
pub mod compliance;
