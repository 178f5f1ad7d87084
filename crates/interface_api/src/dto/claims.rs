//! Claims DTOs

use chrono::NaiveDate;
use serde::Deserialize;

/// Optional evaluation date; defaults to today in the configured timezone
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}
