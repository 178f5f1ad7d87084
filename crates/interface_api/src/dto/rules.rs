//! Rules DTOs

use serde::Serialize;

use domain_distribution::{DbaTerms, LfaTerms, PriorityRules};
use domain_redress::SchemeRules;

/// Active configuration the service evaluates against
#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub scheme: SchemeRules,
    pub priority: PriorityRules,
    pub dba: DbaTerms,
    pub lfa: LfaTerms,
}
