//! Request and response bodies that are not plain domain types

pub mod claims;
pub mod distributions;
pub mod portfolio;
pub mod rules;
