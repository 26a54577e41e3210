use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Developer, Ticket};

/// Largest record count a generation request may ask for
pub const MAX_GENERATE_COUNT: usize = 1000;

/// Request body for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub developers: Vec<Developer>,
    pub tickets: Vec<Ticket>,
}

/// Query string for the generation endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateQuery {
    #[validate(range(max = 1000))]
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_query_default_count() {
        let query: GenerateQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.count, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_generate_query_count_ceiling() {
        let at_limit = GenerateQuery { count: MAX_GENERATE_COUNT };
        let over_limit = GenerateQuery { count: MAX_GENERATE_COUNT + 1 };

        assert!(at_limit.validate().is_ok());
        assert!(over_limit.validate().is_err());
    }
}
